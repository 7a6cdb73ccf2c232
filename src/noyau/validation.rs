// src/noyau/validation.rs
//
// Validation AVANT extraction : pas de nombre ni de fraction sans ' ou ".
//
// Passe 0 (texte ORIGINAL) :
//   - un décimal collé à une fraction ("1.5/2\"") est une faute : la partie
//     entière est un nombre nu, le reste n’est pas une fraction lisible
// Passe 1 (texte masqué) :
//   - on masque toutes les formes avec unité (1..7)
//   - puis les nombres opérandes de * / (et x X × ÷), ex: "2' * 3", "2 * 1 1/2\""
//   - tout chiffre restant, non suivi de ' " ou /, est une faute
// Passe 2 (texte ORIGINAL) :
//   - toute fraction N/D non suivie de " est une faute
//
// Le masquage évite les faux positifs sur les multiplicateurs légitimes
// et sur les fractions qui font partie d’un littéral plus long.

use once_cell::sync::Lazy;
use regex::Regex;

use super::erreur::{CalcError, EXEMPLE_FORMAT};
use super::litteral::{masquer, occurrences, Forme};

/// Nombre suivi d’un opérateur multiplicatif : "3 *", "2x".
static OPERANDE_GAUCHE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?\s*[*/xX×÷]").unwrap());

/// Opérateur multiplicatif suivi d’un nombre : "* 2", "÷3".
static OPERANDE_DROITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*/xX×÷]\s*[0-9]+(?:\.[0-9]+)?").unwrap());

/// Décimal collé à une fraction : "1.5/2".
static DECIMAL_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\.[0-9]+/[0-9]+").unwrap());

static NOMBRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

static FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+/[0-9]+").unwrap());

/// Valide le format d’une expression (désignations ' et ").
///
/// `Ok(())` si l’expression peut passer à l’extraction; sinon
/// `CalcError::Validation` avec un diagnostic lisible.
pub fn validate_expression(expression: &str) -> Result<(), CalcError> {
    if let Some(caps) = DECIMAL_FRACTION.captures(expression) {
        return Err(nombre_nu(&caps[1]));
    }

    let masque = masque_valides(expression);

    if let Some(nombre) = premier_nombre_nu(&masque) {
        return Err(nombre_nu(nombre));
    }

    if let Some(fraction) = premiere_fraction_nue(expression) {
        return Err(CalcError::Validation(format!(
            "fraction '{fraction}' sans désignation pouces (\"). Exemple : {fraction}\""
        )));
    }

    Ok(())
}

fn nombre_nu(nombre: &str) -> CalcError {
    CalcError::Validation(format!(
        "nombre '{nombre}' sans désignation pieds (') ou pouces (\"). Exemple : {EXEMPLE_FORMAT}"
    ))
}

/// Passe 1 : masque littéraux valides + opérandes multiplicatifs.
fn masque_valides(expression: &str) -> String {
    let mut tampon = expression.to_string();

    for forme in Forme::AVEC_UNITE {
        for zone in occurrences(forme, &tampon) {
            masquer(&mut tampon, zone);
        }
    }

    // Opérandes : on ne masque que le nombre, l’opérateur reste visible.
    let zones: Vec<_> = OPERANDE_GAUCHE
        .find_iter(&tampon)
        .filter_map(|m| NOMBRE.find(m.as_str()).map(|n| m.start() + n.start()..m.start() + n.end()))
        .collect();
    for zone in zones {
        masquer(&mut tampon, zone);
    }

    let zones: Vec<_> = OPERANDE_DROITE
        .find_iter(&tampon)
        .filter_map(|m| NOMBRE.find(m.as_str()).map(|n| m.start() + n.start()..m.start() + n.end()))
        .collect();
    for zone in zones {
        masquer(&mut tampon, zone);
    }

    tampon
}

/// Premier nombre restant dont le prochain caractère non blanc n’est ni ' ni " ni /.
fn premier_nombre_nu(masque: &str) -> Option<&str> {
    NOMBRE
        .find_iter(masque)
        .find(|m| {
            let suivant = masque[m.end()..].chars().find(|c| !c.is_whitespace());
            !matches!(suivant, Some('\'' | '"' | '/'))
        })
        .map(|m| m.as_str())
}

/// Première fraction N/D du texte original non suivie immédiatement de ".
fn premiere_fraction_nue(expression: &str) -> Option<&str> {
    FRACTION
        .find_iter(expression)
        .find(|m| !expression[m.end()..].starts_with('"'))
        .map(|m| m.as_str())
}
