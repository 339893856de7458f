// src/reglages.rs
//
// Réglages de démarrage (fichier TOML optionnel).
//
// Exemple :
//   angle = "radian"
//   decimales = 6
//
// Champ absent => valeur par défaut. Champ inconnu => erreur de format.

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::eval::DECIMALES_DEFAUT;
use crate::noyau::AngleUnit;

/// Variable d’environnement qui désigne le fichier de réglages.
#[cfg(not(target_arch = "wasm32"))]
pub const VAR_REGLAGES: &str = "CALCULATRICE_REGLAGES";

/// Garde-fou : au-delà, l’arrondi ne change plus rien sur un f64.
pub const DECIMALES_MAX: u32 = 15;

#[derive(Error, Debug)]
pub enum ReglagesError {
    #[error("lecture du fichier de réglages impossible : {0}")]
    Lecture(#[from] std::io::Error),

    #[error("fichier de réglages invalide : {0}")]
    Format(#[from] toml::de::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reglages {
    /// Unité d’angle au lancement.
    pub angle: AngleUnit,
    /// Décimales conservées par l’arrondi d’affichage.
    pub decimales: u32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            angle: AngleUnit::default(),
            decimales: DECIMALES_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn depuis_toml(texte: &str) -> Result<Self, ReglagesError> {
        let mut r: Reglages = toml::from_str(texte)?;
        r.decimales = r.decimales.min(DECIMALES_MAX);
        Ok(r)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn charger(chemin: &std::path::Path) -> Result<Self, ReglagesError> {
        let texte = std::fs::read_to_string(chemin)?;
        Self::depuis_toml(&texte)
    }

    /// Lit le fichier désigné par `CALCULATRICE_REGLAGES`.
    /// Variable absente : défauts, sans bruit. Fichier illisible : défauts + warning.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn depuis_env() -> Self {
        let Some(chemin) = std::env::var_os(VAR_REGLAGES) else {
            return Self::default();
        };
        let chemin = std::path::PathBuf::from(chemin);

        match Self::charger(&chemin) {
            Ok(r) => {
                tracing::info!(chemin = %chemin.display(), ?r, "réglages chargés");
                r
            }
            Err(e) => {
                tracing::warn!(chemin = %chemin.display(), erreur = %e, "réglages ignorés");
                Self::default()
            }
        }
    }
}
