// src/noyau/angle.rs
//
// Unité d’angle active (DEG / RAD).
// Lue par le normaliseur au moment de l’évaluation, jamais à la saisie.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    #[serde(alias = "deg")]
    Degree,
    #[serde(alias = "rad")]
    Radian,
}

impl AngleUnit {
    /// Bascule DEG <-> RAD.
    pub fn toggled(self) -> Self {
        match self {
            AngleUnit::Degree => AngleUnit::Radian,
            AngleUnit::Radian => AngleUnit::Degree,
        }
    }

    /// Libellé court du bouton.
    pub fn label(self) -> &'static str {
        match self {
            AngleUnit::Degree => "DEG",
            AngleUnit::Radian => "RAD",
        }
    }
}
