// src/noyau/jetons.rs
//
// Tokenisation de la forme canonique (sortie du normaliseur).
// Vocabulaire fermé : nombres, + - * / ^, parenthèses, virgule,
// constantes PI / E, fonctions connues. Tout le reste est refusé.

use std::f64::consts;

use super::erreur::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "PI",
            Constante::E => "E",
        }
    }
}

/// Fonctions émises par le normaliseur, chacune d’arité fixe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Pow,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Ln,
    Log10,
    Abs,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let f = match nom {
            "pow" => Fonction::Pow,
            "sqrt" => Fonction::Sqrt,
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "ln" => Fonction::Ln,
            "log10" => Fonction::Log10,
            "abs" => Fonction::Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Pow => "pow",
            Fonction::Sqrt => "sqrt",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Ln => "ln",
            Fonction::Log10 => "log10",
            Fonction::Abs => "abs",
        }
    }

    pub fn arite(self) -> usize {
        match self {
            Fonction::Pow => 2,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    /// Moins unaire. Jamais produit par `tokenize`, seulement par la RPN.
    Neg,

    Comma,
    LPar,
    RPar,
}

/// Tokenize une chaîne canonique en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) avec exposant optionnel (1e5, 2.5E-3)
/// - opérateurs + - * / ^
/// - parenthèses ( ) et virgule (arguments de pow)
/// - constantes PI et E
/// - fonctions pow sqrt sin cos tan ln log10 abs (sensible à la casse)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        // Nombre : chiffres [. chiffres] [e|E [+|-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if let Some(fin) = fin_exposant(&chars, i) {
                i = fin;
            }

            let texte: String = chars[start..i].iter().collect();
            let x = texte
                .parse::<f64>()
                .map_err(|_| EvalError::mal_formee(format!("nombre invalide : '{texte}'")))?;
            out.push(Tok::Num(x));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();

            let tok = match mot.as_str() {
                "PI" => Tok::Const(Constante::Pi),
                "E" => Tok::Const(Constante::E),
                autre => match Fonction::depuis_nom(autre) {
                    Some(f) => Tok::Fonction(f),
                    None => {
                        return Err(EvalError::mal_formee(format!("symbole inconnu : '{mot}'")))
                    }
                },
            };
            out.push(tok);
            continue;
        }

        return Err(EvalError::mal_formee(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Si un exposant scientifique commence en `i`, renvoie l’indice juste après.
fn fin_exposant(chars: &[char], i: usize) -> Option<usize> {
    if !matches!(chars.get(i), Some('e') | Some('E')) {
        return None;
    }
    let mut j = i + 1;
    if matches!(chars.get(j), Some('+') | Some('-')) {
        j += 1;
    }
    if !chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
    }
    Some(j)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(x) => x.to_string(),
            Tok::Const(k) => k.nom().to_string(),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::Comma => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
