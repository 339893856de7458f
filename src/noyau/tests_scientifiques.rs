//! Tests scientifiques (campagne) : propriétés de bout en bout.
//!
//! Chaque test passe par le vrai pipeline : normalize -> evaluate -> arrondi,
//! ou par la Session quand il s’agit d’enchaînement.

use super::angle::AngleUnit::{self, Degree, Radian};
use super::canon::normalize;
use super::erreur::{ErrorKind, EvalError, NormalizeError};
use super::eval::{arrondi, evaluate, DECIMALES_DEFAUT};
use super::session::Session;

fn calc(expr: &str, unit: AngleUnit) -> Result<f64, String> {
    let canonique = normalize(expr, unit).map_err(|e| e.to_string())?;
    evaluate(&canonique).map_err(|e| e.to_string())
}

fn valeur(expr: &str, unit: AngleUnit) -> f64 {
    let v = calc(expr, unit).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    arrondi(v, DECIMALES_DEFAUT)
}

fn kind(expr: &str) -> ErrorKind {
    let canonique = match normalize(expr, Degree) {
        Ok(c) => c,
        Err(NormalizeError::MalformedExpression(_)) => return ErrorKind::MalformedExpression,
    };
    match evaluate(&canonique) {
        Ok(v) => panic!("expr={expr:?} devrait échouer, obtenu {v}"),
        Err(EvalError::MalformedExpression(_)) => ErrorKind::MalformedExpression,
        Err(EvalError::DivisionByZero) => ErrorKind::DivisionByZero,
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_addition() {
    assert_eq!(valeur("2+2", Degree), 4.0);
}

#[test]
fn sci_puissance() {
    assert_eq!(valeur("2^10", Degree), 1024.0);
    assert_eq!(valeur("2^3^2", Degree), 512.0);
    assert_eq!(valeur("(1+2)^2", Degree), 9.0);
}

#[test]
fn sci_racines() {
    assert_eq!(valeur("√(16)", Degree), 4.0);
    assert_eq!(valeur("√16", Degree), 4.0);
    assert_eq!(valeur("√(9+16)", Degree), 5.0);
    assert_eq!(valeur("2×√(√16)", Degree), 4.0);
}

#[test]
fn sci_operateurs_affichage() {
    assert_eq!(valeur("6×7", Degree), 42.0);
    assert_eq!(valeur("1÷4", Degree), 0.25);
    assert_eq!(valeur("0.1+0.2", Degree), 0.3);
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_sin_90_degres() {
    assert_eq!(valeur("sin(90)", Degree), 1.0);
}

#[test]
fn sci_meme_saisie_deux_unites() {
    let deg = valeur("sin(90)", Degree);
    let rad = valeur("sin(90)", Radian);
    assert_eq!(rad, 0.893996664);
    assert_ne!(deg, rad);
}

#[test]
fn sci_angles_remarquables_degres() {
    assert_eq!(valeur("cos(60)", Degree), 0.5);
    assert_eq!(valeur("tan(45)", Degree), 1.0);
    assert_eq!(valeur("sin(30)", Degree), 0.5);
    assert_eq!(valeur("sin((15+15))", Degree), 0.5);
    assert_eq!(valeur("cos(0)", Degree), 1.0);
}

#[test]
fn sci_radians_avec_pi() {
    assert_eq!(valeur("sin(π÷2)", Radian), 1.0);
    assert_eq!(valeur("cos(π)", Radian), -1.0);
}

#[test]
fn sci_unite_sans_effet_sur_constantes() {
    assert_eq!(valeur("π", Degree), valeur("π", Radian));
    assert_eq!(valeur("e", Degree), valeur("e", Radian));
    assert_eq!(valeur("π", Degree), arrondi(std::f64::consts::PI, 9));
}

/* ------------------------ Logarithmes & constante e ------------------------ */

#[test]
fn sci_log_decimal() {
    assert_eq!(valeur("log(100)", Degree), 2.0);
    assert_eq!(valeur("log10(1000)", Degree), 3.0);
}

#[test]
fn sci_ln_e() {
    assert_eq!(valeur("ln(e)", Degree), 1.0);
    assert_eq!(valeur("ln(e^2)", Degree), 2.0);
}

#[test]
fn sci_e_ne_corrompt_pas_les_jetons() {
    // "log", "ln", "log10" et les nombres 1e5 restent intacts
    assert_eq!(valeur("log(e)×ln(10)", Degree), 1.0);
    assert_eq!(valeur("1e5+1", Degree), 100001.0);
    assert_eq!(valeur("abs(-e)", Degree), arrondi(std::f64::consts::E, 9));
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(kind("5/0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("5÷(3-3)"), ErrorKind::DivisionByZero);
    assert_eq!(kind("√(-4)"), ErrorKind::DivisionByZero);
}

#[test]
fn sci_mal_formees() {
    for s in ["2+", "((3", "", "2×", "sin()", "√(16", "2π", "×3", "log(", "1..2"] {
        assert_eq!(kind(s), ErrorKind::MalformedExpression, "expr={s:?}");
    }
}

/* ------------------------ Enchaînement & idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    assert_eq!(valeur("4", Degree), 4.0);
    assert_eq!(valeur("-0.5", Degree), -0.5);
}

#[test]
fn sci_enchainement_session() {
    let mut s = Session::default();
    for t in ["√", "(", "1", "6", ")"] {
        s.on_token(t);
    }
    assert_eq!(s.on_evaluate().display, "4");

    s.on_token("+");
    assert_eq!(s.display(), "4+");
    s.on_token("1");
    s.on_token("0");
    let a = s.on_evaluate();
    assert_eq!(a.display, "14");
    assert_eq!(a.history, "4+10");
}

#[test]
fn sci_enchainement_resultat_decimal() {
    let mut s = Session::default();
    for t in ["1", "÷", "3"] {
        s.on_token(t);
    }
    assert_eq!(s.on_evaluate().display, "0.333333333");
    s.on_token("×");
    s.on_token("3");
    assert_eq!(s.on_evaluate().display, "0.999999999");
}
