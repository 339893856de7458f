// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Précédences : + - (1) < * / (2) < moins unaire (3) < ^ (4)
// - ^ associatif à droite, le reste à gauche
// - '-' ou '+' quand on n’attend PAS une valeur => signe unaire
//   ('-' devient Tok::Neg, '+' est ignoré)
// - Fonction : toujours suivie de '(' ; sortie après sa parenthèse fermante,
//   avec vérification du nombre d’arguments
// - Pas de multiplication implicite : deux valeurs adjacentes = erreur

use super::erreur::EvalError;
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: Tok) -> u8 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn est_operateur(t: Tok) -> bool {
    matches!(
        t,
        Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Neg
    )
}

/// Sort les opérateurs vers `out` jusqu’à la prochaine '(' (laissée sur la pile).
fn depile_jusqu_a_parenthese(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(&top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        out.push(top);
        ops.pop();
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Pow), LPar, Num(2), Comma, Num(10), RPar, Minus, Num(1)]
///   rpn:    [Num(2), Num(10), Fonction(Pow), Num(1), Minus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::mal_formee("expression vide"));
    }

    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // Une entrée par '(' ouverte : Some(nb d’arguments) pour un appel, None pour un groupe.
    let mut groupes: Vec<Option<usize>> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le signe unaire et les trous.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().copied().peekable();

    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) | Tok::Const(_) => {
                if prev_was_value {
                    return Err(EvalError::mal_formee("opérateur manquant entre deux valeurs"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(f) => {
                if prev_was_value {
                    return Err(EvalError::mal_formee(format!(
                        "opérateur manquant avant {}",
                        f.nom()
                    )));
                }
                if !matches!(iter.peek(), Some(Tok::LPar)) {
                    return Err(EvalError::mal_formee(format!(
                        "{} : parenthèse ouvrante attendue",
                        f.nom()
                    )));
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(EvalError::mal_formee("opérateur manquant avant '('"));
                }
                let appel = matches!(ops.last(), Some(Tok::Fonction(_)));
                groupes.push(appel.then_some(1));
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(EvalError::mal_formee("argument vide"));
                }
                depile_jusqu_a_parenthese(&mut ops, &mut out);
                match groupes.last_mut() {
                    Some(Some(n)) => *n += 1,
                    _ => return Err(EvalError::mal_formee("virgule hors d’un appel de fonction")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(EvalError::mal_formee("sous-expression vide"));
                }
                depile_jusqu_a_parenthese(&mut ops, &mut out);

                // retire la '(' elle-même
                if ops.pop().is_none() {
                    return Err(EvalError::mal_formee("parenthèse fermante sans ouvrante"));
                }
                let groupe = groupes
                    .pop()
                    .ok_or_else(|| EvalError::mal_formee("parenthèse fermante sans ouvrante"))?;

                // appel : la fonction est juste sous sa '('
                if let Some(nb_args) = groupe {
                    let Some(Tok::Fonction(f)) = ops.pop() else {
                        return Err(EvalError::mal_formee("appel de fonction incohérent"));
                    };
                    if nb_args != f.arite() {
                        return Err(EvalError::mal_formee(format!(
                            "{} attend {} argument(s), {} reçu(s)",
                            f.nom(),
                            f.arite(),
                            nb_args
                        )));
                    }
                    out.push(Tok::Fonction(f));
                }

                prev_was_value = true;
            }

            // signe unaire
            Tok::Minus if !prev_was_value => {
                // pas de dépilement : un préfixe s’applique à ce qui suit
                ops.push(Tok::Neg);
            }
            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(EvalError::mal_formee(format!(
                        "opérande manquant avant '{}'",
                        super::jetons::format_tokens(&[tok])
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' (ni par une fonction, toujours sous sa '(')
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(&top) = ops.last() {
                    if !est_operateur(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.push(top);
                        ops.pop();
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(EvalError::mal_formee("jeton inattendu")),
        }
    }

    if !prev_was_value {
        return Err(EvalError::mal_formee("opérateur en fin d’expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(EvalError::mal_formee("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur maximale de l’arbre : eval, Display et Drop récursent par nœud.
pub const PROFONDEUR_MAX: usize = 1000;

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de la pile garde la profondeur de son sous-arbre ;
/// au-delà de `PROFONDEUR_MAX`, l’expression est refusée avant d’être construite.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, EvalError> {
    let invalide = || EvalError::mal_formee("expression invalide");
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let borne = |profondeur: usize| {
        if profondeur > PROFONDEUR_MAX {
            Err(EvalError::mal_formee("expression trop imbriquée"))
        } else {
            Ok(profondeur)
        }
    };

    for &tok in rpn {
        match tok {
            Tok::Num(x) => st.push((Expr::Num(x), 1)),
            Tok::Const(k) => st.push((Expr::Const(k), 1)),

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                let p = borne(p + 1)?;
                st.push((Expr::Neg(Box::new(x)), p));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let p = borne(pa.max(pb) + 1)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push((e, p));
            }

            Tok::Fonction(f) => {
                let n = f.arite();
                if st.len() < n {
                    return Err(EvalError::mal_formee(format!("{} sans argument", f.nom())));
                }
                let (args, profondeurs): (Vec<Expr>, Vec<usize>) =
                    st.split_off(st.len() - n).into_iter().unzip();
                let p = borne(profondeurs.into_iter().max().unwrap_or(0) + 1)?;
                st.push((Expr::Appel(f, args), p));
            }

            Tok::LPar | Tok::RPar | Tok::Comma => {
                return Err(EvalError::mal_formee("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}
