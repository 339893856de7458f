// src/noyau/expr.rs
//
// AST flottant (f64), évalué de bas en haut.
//
// IMPORTANT:
// - Toute valeur non finie (inf / NaN) à n’importe quel noeud est une erreur :
//   elle n’est jamais propagée comme nombre.

use std::fmt;

use super::erreur::EvalError;
use super::jetons::{Constante, Fonction};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(Constante),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>), // ^ littéral

    Appel(Fonction, Vec<Expr>),
}

impl Expr {
    pub fn eval(&self) -> Result<f64, EvalError> {
        use Expr::*;

        let v = match self {
            Num(x) => *x,
            Const(k) => k.valeur(),

            Neg(x) => -x.eval()?,

            Add(a, b) => a.eval()? + b.eval()?,
            Sub(a, b) => a.eval()? - b.eval()?,
            Mul(a, b) => a.eval()? * b.eval()?,
            Div(a, b) => {
                let num = a.eval()?;
                let den = b.eval()?;
                if den == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                num / den
            }
            Pow(a, b) => a.eval()?.powf(b.eval()?),

            Appel(f, args) => {
                let valeurs = args
                    .iter()
                    .map(Expr::eval)
                    .collect::<Result<Vec<f64>, _>>()?;
                applique(*f, &valeurs)?
            }
        };

        fini(v)
    }
}

fn applique(f: Fonction, args: &[f64]) -> Result<f64, EvalError> {
    let v = match (f, args) {
        (Fonction::Pow, [a, b]) => a.powf(*b),
        (Fonction::Sqrt, [x]) => x.sqrt(),
        (Fonction::Sin, [x]) => x.sin(),
        (Fonction::Cos, [x]) => x.cos(),
        (Fonction::Tan, [x]) => x.tan(),
        (Fonction::Ln, [x]) => x.ln(),
        (Fonction::Log10, [x]) => x.log10(),
        (Fonction::Abs, [x]) => x.abs(),
        _ => {
            return Err(EvalError::mal_formee(format!("{} : nombre d’arguments invalide", f.nom())))
        }
    };
    Ok(v)
}

fn fini(v: f64) -> Result<f64, EvalError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::DivisionByZero)
    }
}

/// Forme entièrement parenthésée (journal / tests).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Num(x) => write!(f, "{x}"),
            Const(k) => write!(f, "{}", k.nom()),
            Neg(x) => write!(f, "-({x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Appel(fun, args) => {
                write!(f, "{}(", fun.nom())?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
