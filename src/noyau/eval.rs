//! Noyau — évaluation (pipeline réel)
//!
//! validation -> extraction -> substitution (valeurs exactes) -> glyphes
//!        -> jetons -> RPN -> valeur exacte (pouces), sur pile explicite
//!
//! Le résultat n’a pas d’unité : format.rs s’en charge.

use once_cell::sync::Lazy;
use regex::Regex;

use super::erreur::{CalcError, EXEMPLE_FORMAT};
use super::extraction::{extract_measurements, Extraction};
use super::jetons::{format_tokens, normalise_operateurs, tokenize};
use super::lecture::{decimal_exact, decimal_tronque};
use super::mesure::RationalInches;
use super::rpn::{arbre_rpn, eval_rpn, to_rpn};
use super::validation::validate_expression;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub litteraux: String,
    pub substituee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    /// Résultat en pouces décimaux (tronqué).
    pub decimal: String,
    pub note: String,
}

/// Décimales de la lecture en pouces.
const DECIMALES_LECTURE: usize = 6;

/// API publique : évalue une expression pieds/pouces, résultat exact en pouces.
pub fn evaluate_expression(expression: &str) -> Result<RationalInches, CalcError> {
    evaluate_with_steps(expression).map(|(v, _)| v)
}

/// Comme [`evaluate_expression`], avec la démarche (formes intermédiaires).
pub fn evaluate_with_steps(expression: &str) -> Result<(RationalInches, DemarcheNoyau), CalcError> {
    let s = expression.trim();
    if s.is_empty() {
        return Err(CalcError::Syntax("entrée vide".into()));
    }

    // 1) Désignations ' et "
    validate_expression(s)?;

    // 2) Littéraux (le plus spécifique d’abord)
    let extraction = extract_measurements(s)?;

    // 3) Substitution par valeur exacte + glyphes x × ÷
    let substituee = extraction.substituer(s, nombre_exact);
    let normalisee = normalise_operateurs(&substituee);
    log::debug!("substitution : {s:?} -> {normalisee:?}");

    // 4) Jetons -> RPN
    let aide = |e: CalcError| avec_aide(e, s, &normalisee);
    let jetons = tokenize(&normalisee).map_err(aide)?;
    let rpn = to_rpn(&jetons).map_err(aide)?;

    // 5) Valeur exacte (arité contrôlée avant calcul)
    let valeur = RationalInches::from(eval_rpn(&rpn).map_err(aide)?);

    let d = DemarcheNoyau {
        litteraux: format_litteraux(&extraction),
        substituee: normalisee.clone(),
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: arbre_rpn(&rpn)?,
        decimal: format!("{} po", decimal_tronque(valeur.as_rational(), DECIMALES_LECTURE)),
        note: "Pipeline: validation → extraction → substitution → jetons → RPN → valeur exacte (pouces).".into(),
    };

    Ok((valeur, d))
}

/// Valeur écrite sans perte : décimal fini ("14.75") sinon rapport parenthésé ("(1/3)").
fn nombre_exact(v: &RationalInches) -> String {
    let r = v.as_rational();
    decimal_exact(r).unwrap_or_else(|| format!("({}/{})", r.numer(), r.denom()))
}

fn format_litteraux(e: &Extraction) -> String {
    e.valeurs()
        .iter()
        .map(|(texte, v)| format!("{texte} = {v} po"))
        .collect::<Vec<_>>()
        .join("\n")
}

/* ------------------------ Erreurs de syntaxe : aide au format ------------------------ */

static CHIFFRES_ESPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\s+[0-9]+").unwrap());

/// Complète une erreur de syntaxe par une aide qui cite le format canonique.
fn avec_aide(e: CalcError, original: &str, traitee: &str) -> CalcError {
    let CalcError::Syntax(detail) = e else {
        return e;
    };

    let aide = if CHIFFRES_ESPACES.is_match(original) {
        format!("Respectez le format {EXEMPLE_FORMAT}. Manque-t-il une désignation ' ou \" ?")
    } else if traitee.contains("  ") {
        format!("Espacement invalide. Respectez le format {EXEMPLE_FORMAT}.")
    } else if traitee.matches('(').count() != traitee.matches(')').count() {
        "Parenthèses non appariées.".to_string()
    } else {
        format!(
            "Format d’expression invalide. Respectez le format {EXEMPLE_FORMAT}. Manque-t-il une désignation ' ou \" ?"
        )
    };

    CalcError::Syntax(format!("{detail}. {aide}"))
}
