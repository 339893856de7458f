//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - angle.rs    : unité d’angle DEG / RAD
//! - canon.rs    : normaliseur (saisie affichée -> forme canonique)
//! - jetons.rs   : tokenisation de la forme canonique
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST f64 + évaluation
//! - eval.rs     : pipeline complet + arrondi
//! - format.rs   : écriture du résultat (relisible)
//! - session.rs  : tampon / historique / machine à états (interface UI)
//! - erreur.rs   : erreurs typées

pub mod angle;
pub mod canon;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod session;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use angle::AngleUnit;
pub use session::{Etat, Session};
