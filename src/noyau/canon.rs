// src/noyau/canon.rs
//
// Normaliseur : texte saisi -> forme canonique pour l’évaluateur.
// -----------------------------------------------------------------
// Étapes, dans cet ordre (une étape ne repasse jamais sur la sortie d’une autre) :
// 1) symboles   : × ÷ π, et `e` seulement comme identifiant isolé
// 2) puissances : a^b -> pow(a,b) (nombres décimaux seulement)
// 3) racines    : √(…) / √n -> sqrt(…)
// 4) fonctions  : log -> log10 ; sin/cos/tan en degrés -> f((x)*PI/180)
//
// Constantes canoniques : PI et E (majuscules). Après cette passe, aucun
// symbole d’affichage ne doit subsister.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::angle::AngleUnit;
use super::erreur::NormalizeError;

lazy_static! {
    /// `e` isolé (pas dans `sec`, `log10`, `1e5`…).
    static ref E_SEUL: Regex = Regex::new(r"\be\b").unwrap();

    /// Orthographe clavier de π.
    static ref PI_MOT: Regex = Regex::new(r"\bpi\b").unwrap();

    /// nombre ^ nombre (décimaux, espaces tolérés autour de ^).
    static ref PUISSANCE: Regex = Regex::new(r"(\d+\.?\d*)\s*\^\s*(\d+\.?\d*)").unwrap();

    /// Nombre en tête de chaîne (argument de `√n`).
    static ref NOMBRE_TETE: Regex = Regex::new(r"^\d+\.?\d*").unwrap();

    /// Identifiant en tête de chaîne (`√PI`, `√sin(…)`).
    static ref IDENT_TETE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap();

    /// `log(` affiché = logarithme décimal. `log10(` ne correspond pas.
    static ref LOG_OUVRANT: Regex = Regex::new(r"\blog\s*\(").unwrap();

    static ref TRIG_OUVRANT: Regex = Regex::new(r"\b(?:sin|cos|tan)\s*\(").unwrap();
}

/// Réécrit une saisie utilisateur en forme canonique.
///
/// L’unité d’angle est passée explicitement : elle est lue au moment de
/// l’évaluation, pas au moment de la saisie.
pub fn normalize(raw: &str, unit: AngleUnit) -> Result<String, NormalizeError> {
    let s = substitue_symboles(raw);
    let s = reecrit_puissances(&s);
    let s = reecrit_racines(&s)?;
    let s = LOG_OUVRANT.replace_all(&s, "log10(").into_owned();
    let s = match unit {
        AngleUnit::Radian => s,
        AngleUnit::Degree => convertit_trig_degres(&s),
    };

    debug!(entree = raw, canonique = %s, ?unit, "normalisation");
    Ok(s)
}

/* ------------------------ 1) symboles ------------------------ */

fn substitue_symboles(s: &str) -> String {
    let s = s.replace('×', "*").replace('÷', "/").replace('π', "PI");
    let s = PI_MOT.replace_all(&s, "PI");
    E_SEUL.replace_all(&s, "E").into_owned()
}

/* ------------------------ 2) puissances ------------------------ */

/// a^b -> pow(a,b), sauf si le motif est collé à autre chose :
/// un identifiant ou un point avant, ou une chaîne de ^ (laissée au ^ littéral,
/// associatif à droite dans l’évaluateur).
fn reecrit_puissances(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut dernier = 0;

    for caps in PUISSANCE.captures_iter(s) {
        let (Some(m), Some(base), Some(exposant)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let avant = s[..m.start()].trim_end().chars().next_back();
        let apres = s[m.end()..].trim_start().chars().next();

        let colle_avant =
            matches!(avant, Some(c) if c.is_alphanumeric() || c == '_' || c == '.' || c == '^');
        let colle_apres =
            matches!(apres, Some(c) if c.is_alphanumeric() || c == '_' || c == '.' || c == '^');
        if colle_avant || colle_apres {
            continue;
        }

        out.push_str(&s[dernier..m.start()]);
        out.push_str("pow(");
        out.push_str(base.as_str());
        out.push(',');
        out.push_str(exposant.as_str());
        out.push(')');
        dernier = m.end();
    }

    out.push_str(&s[dernier..]);
    out
}

/* ------------------------ 3) racines ------------------------ */

fn reecrit_racines(s: &str) -> Result<String, NormalizeError> {
    let mut out = String::with_capacity(s.len() + 8);
    let mut reste = s;

    while let Some(pos) = reste.find('√') {
        out.push_str(&reste[..pos]);

        let apres = reste[pos + '√'.len_utf8()..].trim_start();
        let (argument, suite) = argument_racine(apres)?;

        out.push_str("sqrt(");
        // l’argument peut lui-même contenir des √
        out.push_str(&reecrit_racines(argument)?);
        out.push(')');

        reste = suite;
    }

    out.push_str(reste);
    Ok(out)
}

/// Découpe l’argument d’un `√` : (argument sans parenthèses extérieures, suite).
fn argument_racine(s: &str) -> Result<(&str, &str), NormalizeError> {
    if let Some(interieur) = s.strip_prefix('(') {
        let fin = fermeture_correspondante(interieur).ok_or_else(|| {
            NormalizeError::MalformedExpression("√( sans parenthèse fermante".into())
        })?;
        return Ok((&interieur[..fin], &interieur[fin + 1..]));
    }

    if let Some(m) = NOMBRE_TETE.find(s) {
        return Ok(s.split_at(m.end()));
    }

    if let Some(m) = IDENT_TETE.find(s) {
        // √PI, √E, ou √f(…)
        let apres_nom = &s[m.end()..];
        let Some(interieur) = apres_nom.strip_prefix('(') else {
            return Ok(s.split_at(m.end()));
        };
        let fin = fermeture_correspondante(interieur).ok_or_else(|| {
            NormalizeError::MalformedExpression(format!(
                "√{}( sans parenthèse fermante",
                m.as_str()
            ))
        })?;
        // nom + '(' + intérieur + ')'
        let longueur = m.end() + 1 + fin + 1;
        return Ok(s.split_at(longueur));
    }

    Err(NormalizeError::MalformedExpression("√ sans argument".into()))
}

/* ------------------------ 4) trig en degrés ------------------------ */

/// sin(x) -> sin((x)*PI/180), idem cos/tan, appels imbriqués compris.
/// Un appel sans parenthèse fermante est laissé tel quel : l’évaluateur
/// signalera la parenthèse manquante.
fn convertit_trig_degres(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut reste = s;

    while let Some(m) = TRIG_OUVRANT.find(reste) {
        out.push_str(&reste[..m.end()]);
        let apres = &reste[m.end()..];

        match fermeture_correspondante(apres) {
            Some(fin) => {
                out.push('(');
                out.push_str(&convertit_trig_degres(&apres[..fin]));
                out.push_str(")*PI/180)");
                reste = &apres[fin + 1..];
            }
            None => reste = apres,
        }
    }

    out.push_str(reste);
    out
}

/* ------------------------ Outils ------------------------ */

/// Position (octets) de la `)` qui ferme le groupe déjà ouvert juste avant `s`.
fn fermeture_correspondante(s: &str) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' if profondeur == 0 => return Some(i),
            ')' => profondeur -= 1,
            _ => {}
        }
    }
    None
}
