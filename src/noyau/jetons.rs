// src/noyau/jetons.rs
//
// Tokenisation de l’expression APRÈS substitution des mesures.
// Il ne reste que de l’arithmétique simple : nombres, + - * /, parenthèses.

use num_rational::BigRational;

use super::erreur::CalcError;
use super::lecture::parse_decimal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,

    /// Moins unaire (produit par rpn.rs seulement, jamais par tokenize).
    Neg,
}

/// Glyphes alternatifs : x X × -> *, ÷ -> /.
pub fn normalise_operateurs(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'x' | 'X' | '×' => '*',
            '÷' => '/',
            _ => c,
        })
        .collect()
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers et décimaux (ex: 12, 14.75), lus exactement
/// - opérateurs + - * /
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, CalcError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let op = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(t) = op {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre : chiffres, point décimal optionnel suivi de chiffres
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            let r = parse_decimal(&txt)
                .ok_or_else(|| CalcError::Syntax(format!("nombre invalide : {txt}")))?;
            out.push(Tok::Num(r));
            continue;
        }

        return Err(CalcError::Syntax(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        if r.is_integer() {
            format!("{}", r.numer())
        } else {
            format!("{}/{}", r.numer(), r.denom())
        }
    }

    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(r) => format_rat(r),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Neg => "neg".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
