//! Session de calcul : tampon d’expression, historique, unité d’angle.
//!
//! Machine à états :
//! - `Saisie`   : le tampon se remplit jeton par jeton.
//! - `Resultat` : le tampon contient le résultat précédent. Un opérateur
//!   l’enchaîne, tout autre jeton le remplace.
//! - `Erreur`   : tampon et historique vidés, l’écran affiche "Error".
//!   Le prochain jeton repart d’un tampon neuf.
//!
//! C’est la seule interface du noyau vue par l’UI.

use tracing::{debug, warn};

use super::angle::AngleUnit;
use super::eval::{arrondi, eval_expression, DECIMALES_DEFAUT};
use super::format::format_resultat;

/// Marqueur affiché après toute erreur (normaliseur ou évaluateur).
pub const AFFICHAGE_ERREUR: &str = "Error";

const AFFICHAGE_VIDE: &str = "0";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Etat {
    #[default]
    Saisie,
    Resultat,
    Erreur,
}

/// Ce que l’UI lit après une évaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage {
    pub display: String,
    pub history: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    tampon: String,
    historique: String,
    unite: AngleUnit,
    etat: Etat,
    decimales: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AngleUnit::default(), DECIMALES_DEFAUT)
    }
}

impl Session {
    pub fn new(unite: AngleUnit, decimales: u32) -> Self {
        Self {
            tampon: String::new(),
            historique: String::new(),
            unite,
            etat: Etat::Saisie,
            decimales,
        }
    }

    /* ------------------------ Entrées ------------------------ */

    /// Ajoute une unité lexicale ("7", "+", "sin(", "π"…).
    pub fn on_token(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }

        match self.etat {
            Etat::Saisie => self.tampon.push_str(token),
            Etat::Resultat if enchaine_resultat(token) => {
                // -3 puis ^2 : la base est le résultat entier, pas 3
                if token.starts_with('^') && self.tampon.starts_with('-') {
                    self.tampon = format!("({})", self.tampon);
                }
                self.tampon.push_str(token);
            }
            Etat::Resultat | Etat::Erreur => {
                self.tampon.clear();
                self.tampon.push_str(token);
            }
        }
        self.etat = Etat::Saisie;
    }

    /// normalize -> evaluate -> arrondi. Le résultat devient le nouveau tampon.
    pub fn on_evaluate(&mut self) -> Affichage {
        let avant = std::mem::take(&mut self.tampon);

        match eval_expression(&avant, self.unite) {
            Ok(v) => {
                let r = arrondi(v, self.decimales);
                self.tampon = format_resultat(r);
                debug!(expression = %avant, resultat = %self.tampon, "évaluation");
                self.historique = avant;
                self.etat = Etat::Resultat;
            }
            Err(e) => {
                warn!(expression = %avant, kind = ?e.kind(), erreur = %e, "évaluation impossible");
                self.historique.clear();
                self.etat = Etat::Erreur;
            }
        }

        self.affichage()
    }

    /// Retire le dernier caractère (pas le dernier jeton). En erreur : efface tout.
    pub fn on_delete(&mut self) {
        match self.etat {
            Etat::Erreur => self.on_clear(),
            Etat::Saisie | Etat::Resultat => {
                self.tampon.pop();
                self.etat = Etat::Saisie;
            }
        }
    }

    /// AC : tampon et historique vides, écran à "0".
    pub fn on_clear(&mut self) {
        self.tampon.clear();
        self.historique.clear();
        self.etat = Etat::Saisie;
    }

    /// DEG <-> RAD. Effet à la prochaine évaluation seulement.
    pub fn toggle_angle_unit(&mut self) {
        self.unite = self.unite.toggled();
        debug!(unite = ?self.unite, "unité d’angle");
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn display(&self) -> &str {
        match self.etat {
            Etat::Erreur => AFFICHAGE_ERREUR,
            _ if self.tampon.is_empty() => AFFICHAGE_VIDE,
            _ => &self.tampon,
        }
    }

    pub fn history(&self) -> &str {
        &self.historique
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.unite
    }

    pub fn etat(&self) -> Etat {
        self.etat
    }

    pub fn affichage(&self) -> Affichage {
        Affichage {
            display: self.display().to_string(),
            history: self.historique.clone(),
        }
    }
}

/// Un jeton qui commence par un opérateur binaire prolonge le résultat affiché.
fn enchaine_resultat(token: &str) -> bool {
    token.starts_with(['+', '-', '*', '/', '^', '×', '÷'])
}
