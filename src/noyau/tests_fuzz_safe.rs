//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : un succès est toujours un nombre fini, jamais inf / NaN
//! - invariant UI : la session ne panique jamais, quelle que soit la suite de touches

use std::time::{Duration, Instant};

use super::angle::AngleUnit;
use super::erreur::{CalcError, EvalError};
use super::eval::{arrondi, eval_expression, DECIMALES_DEFAUT};
use super::session::{Etat, Session};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_resultat(expr: &str, r: &Result<f64, CalcError>) {
    if let Ok(v) = r {
        assert!(v.is_finite(), "résultat non fini pour {expr:?}: {v}");
        assert!(
            arrondi(*v, DECIMALES_DEFAUT).is_finite(),
            "arrondi non fini pour {expr:?}"
        );
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(200);
    if rng.coin() {
        format!("{entier}")
    } else {
        format!("{entier}.{}", rng.pick(100))
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "e".to_string(),
        _ => format!("√{}", rng.pick(100)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}×{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}÷{})", gen_expr(rng, depth - 1)),
        5 => format!("{}^{}", rng.pick(10), rng.pick(5)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => format!("ln({a})"),
        10 => format!("log({a})"),
        _ => format!("√({a})"),
    }
}

/// Touches de la calculatrice, tapées au hasard (donc souvent n’importe quoi).
const TOUCHES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "×", "÷", "^", "(", ")",
    "√", "π", "e", "sin(", "cos(", "tan(", "ln(", "log(", "abs(",
];

fn gen_touches(rng: &mut Rng, n: usize) -> String {
    (0..n).map(|_| rng.choix(TOUCHES)).collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_structurees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        for unit in [AngleUnit::Degree, AngleUnit::Radian] {
            let r = eval_expression(&expr, unit);
            check_resultat(&expr, &r);
            match r {
                Ok(_) => seen_ok += 1,
                Err(_) => seen_err += 1,
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..50 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(
            eval_expression(&ea, AngleUnit::Degree),
            eval_expression(&eb, AngleUnit::Degree),
            "expr={ea:?}"
        );
    }
}

#[test]
fn fuzz_safe_touches_au_hasard() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(12) as usize;
        let saisie = gen_touches(&mut rng, n);
        let r = eval_expression(&saisie, AngleUnit::Degree);
        check_resultat(&saisie, &r);
    }
}

#[test]
fn fuzz_safe_session_ne_panique_jamais() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xFACADE_u64);
    let mut s = Session::default();

    for _ in 0..1000 {
        budget(t0, max);

        match rng.pick(20) {
            0 => {
                let a = s.on_evaluate();
                if s.etat() == Etat::Erreur {
                    assert_eq!(a.display, "Error");
                    assert!(a.history.is_empty());
                } else {
                    assert!(a.display.parse::<f64>().is_ok(), "affichage {:?}", a.display);
                }
            }
            1 => s.on_delete(),
            2 => s.toggle_angle_unit(),
            3 if rng.coin() => s.on_clear(),
            _ => s.on_token(rng.choix(TOUCHES)),
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("1÷2", 800);
    let v = eval_expression(&expr, AngleUnit::Degree).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(arrondi(v, DECIMALES_DEFAUT), 400.0);
}

#[test]
fn fuzz_safe_moins_unaires_en_rafale() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // refusée proprement, sans débordement de pile
    let expr = format!("{}1", "-".repeat(100_000));
    let r = eval_expression(&expr, AngleUnit::Degree);
    budget(t0, max);
    assert!(matches!(r, Err(CalcError::Eval(EvalError::MalformedExpression(_)))));

    // même chose à travers la Session
    let mut s = Session::default();
    s.on_token(&expr);
    assert_eq!(s.on_evaluate().display, "Error");
}
