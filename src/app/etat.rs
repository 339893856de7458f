//! src/app/etat.rs
//!
//! État UI : une Session du noyau + ce dont la vue a besoin pour se dessiner.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par la Session.
//! - Actions déterministes, sans effet de bord caché.

use tracing::debug;

use crate::noyau::session::Affichage;
use crate::noyau::{AngleUnit, Etat, Session};
use crate::reglages::Reglages;

#[derive(Clone, Debug)]
pub struct AppCalc {
    session: Session,

    // Réglages de lancement : AC y revient.
    reglages: Reglages,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            session: Session::new(reglages.angle, reglages.decimales),
            reglages,
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Touche du pavé ou caractère tapé au clavier.
    pub fn tape(&mut self, jeton: &str) {
        self.session.on_token(jeton);
    }

    /// "=" ou Entrée.
    pub fn evalue(&mut self) -> Affichage {
        let a = self.session.on_evaluate();
        debug!(display = %a.display, history = %a.history, "écran");
        a
    }

    /// DEL / Backspace.
    pub fn efface(&mut self) {
        self.session.on_delete();
    }

    /// AC : écran vide, et retour à l’unité d’angle des réglages.
    pub fn reset_total(&mut self) {
        self.session.on_clear();
        if self.session.angle_unit() != self.reglages.angle {
            self.session.toggle_angle_unit();
        }
    }

    /// Escape : écran vide, unité conservée.
    pub fn clear_entree(&mut self) {
        self.session.on_clear();
    }

    pub fn bascule_angle(&mut self) {
        self.session.toggle_angle_unit();
    }

    /* ------------------------ Lecture (pour vue.rs) ------------------------ */

    pub fn display(&self) -> &str {
        self.session.display()
    }

    pub fn history(&self) -> &str {
        self.session.history()
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.session.angle_unit()
    }

    pub fn en_erreur(&self) -> bool {
        self.session.etat() == Etat::Erreur
    }
}
