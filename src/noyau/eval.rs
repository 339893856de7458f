//! Noyau : évaluation (pipeline réel)
//!
//! normalize -> tokenize -> RPN -> Expr -> eval (f64)
//!
//! L’arrondi d’affichage n’est pas fait ici : c’est l’appelant (la session)
//! qui l’applique avant d’afficher / d’enchaîner.

use tracing::debug;

use super::angle::AngleUnit;
use super::canon::normalize;
use super::erreur::{CalcError, EvalError};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Décimales gardées à l’affichage (absorbe le bruit binaire des flottants).
pub const DECIMALES_DEFAUT: u32 = 9;

/// Évalue une forme canonique (sortie de `normalize`).
pub fn evaluate(canonical: &str) -> Result<f64, EvalError> {
    let s = canonical.trim();
    if s.is_empty() {
        return Err(EvalError::mal_formee("entrée vide"));
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_tokens(&rpn),
        "analyse"
    );

    let expr = from_rpn(&rpn)?;
    debug!(arbre = %expr, "arbre");

    expr.eval()
}

/// API publique : saisie brute -> valeur (non arrondie).
pub fn eval_expression(raw: &str, unit: AngleUnit) -> Result<f64, CalcError> {
    let canonique = normalize(raw, unit)?;
    Ok(evaluate(&canonique)?)
}

/// Arrondi à `decimales` chiffres : x * 10^d, arrondi à l’entier, / 10^d.
/// Ne renvoie jamais -0.
pub fn arrondi(x: f64, decimales: u32) -> f64 {
    let facteur = 10f64.powi(decimales as i32);
    let scale = x * facteur;

    // au-delà, x n’a de toute façon plus de partie décimale représentable
    if !scale.is_finite() {
        return x;
    }

    let r = scale.round() / facteur;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
