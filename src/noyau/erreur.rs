//! Erreurs du noyau.
//!
//! Le normaliseur et l’évaluateur ont chacun leur type, pour pouvoir être
//! testés séparément. La vue les fusionne en un seul état "Error".

use thiserror::Error;

/// Nature d’un échec, indépendamment de l’étape qui l’a produit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedExpression,
    DivisionByZero,
}

/// Erreur structurelle de réécriture (ex: `√(` jamais refermée).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("expression mal formée : {0}")]
    MalformedExpression(String),
}

/// Erreur de l’évaluateur (jetons, parse, arithmétique).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression mal formée : {0}")]
    MalformedExpression(String),

    /// Division par zéro, ou toute valeur non finie (inf / NaN).
    #[error("division par zéro ou résultat non fini")]
    DivisionByZero,
}

impl EvalError {
    pub(crate) fn mal_formee(msg: impl Into<String>) -> Self {
        EvalError::MalformedExpression(msg.into())
    }
}

/// Erreur du pipeline complet normaliseur -> évaluateur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Normalize(NormalizeError::MalformedExpression(_)) => {
                ErrorKind::MalformedExpression
            }
            CalcError::Eval(EvalError::MalformedExpression(_)) => ErrorKind::MalformedExpression,
            CalcError::Eval(EvalError::DivisionByZero) => ErrorKind::DivisionByZero,
        }
    }
}
