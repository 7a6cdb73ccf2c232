// src/noyau/extraction.rs
//
// Extraction des littéraux de mesure d’une expression (déjà validée).
//
// Une passe par forme, dans l’ordre de priorité (pieds + mixte d’abord).
// Après chaque passe, les zones prises sont masquées : une forme plus lâche
// ne peut plus rien capturer dedans (le 3/4" de 1' 2 3/4" reste au littéral long).

use std::collections::BTreeMap;
use std::ops::Range;

use super::erreur::CalcError;
use super::litteral::{masquer, occurrences, Forme};
use super::mesure::RationalInches;

/// Un littéral trouvé dans l’expression source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementLiteral {
    pub texte: String,
    pub valeur: RationalInches,
    pub forme: Forme,
    /// Position en octets dans l’expression source.
    pub zone: Range<usize>,
}

/// Résultat de l’extraction : toutes les occurrences, triées par position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub litteraux: Vec<MeasurementLiteral>,
}

impl Extraction {
    /// Table texte -> valeur (une entrée par texte distinct).
    pub fn valeurs(&self) -> BTreeMap<String, RationalInches> {
        self.litteraux
            .iter()
            .map(|l| (l.texte.clone(), l.valeur.clone()))
            .collect()
    }

    /// Remplace chaque occurrence par `rendu(valeur)` ; le reste du texte est intact.
    ///
    /// Les zones ne se chevauchent jamais (masquage), on reconstruit donc par position.
    pub fn substituer(&self, source: &str, rendu: impl Fn(&RationalInches) -> String) -> String {
        let mut out = String::with_capacity(source.len());
        let mut curseur = 0usize;
        for l in &self.litteraux {
            out.push_str(&source[curseur..l.zone.start]);
            out.push_str(&rendu(&l.valeur));
            curseur = l.zone.end;
        }
        out.push_str(&source[curseur..]);
        out
    }
}

/// Trouve tous les littéraux de mesure de `expression`.
///
/// Les nombres nus ne sont jamais extraits (ce sont des opérandes).
/// Erreur seulement si un littéral trouvé est illisible (ex: dénominateur nul).
pub fn extract_measurements(expression: &str) -> Result<Extraction, CalcError> {
    let mut tampon = expression.to_string();
    let mut litteraux = Vec::new();

    for forme in Forme::AVEC_UNITE {
        for zone in occurrences(forme, &tampon) {
            let texte = &expression[zone.clone()];
            let valeur = forme.lire(texte)?.ok_or_else(|| CalcError::parse(texte))?;

            log::debug!("littéral {texte:?} ({}) = {valeur} po", forme.nom());

            litteraux.push(MeasurementLiteral {
                texte: texte.to_string(),
                valeur,
                forme,
                zone: zone.clone(),
            });
            masquer(&mut tampon, zone);
        }
    }

    litteraux.sort_by_key(|l| l.zone.start);
    Ok(Extraction { litteraux })
}
