// src/noyau/litteral.rs
//
// Littéraux de mesure : grammaire fermée de huit formes.
//
// Ordre de priorité (du plus spécifique au plus lâche) :
//   1. 1' 2 3/4"   pieds + pouces mixtes
//   2. 1' 3/4"     pieds + fraction
//   3. 1' 6.5"     pieds + pouces (entier/décimal)
//   4. 1'          pieds seuls
//   5. 2 3/4"      pouces mixtes
//   6. 3/4"        fraction (guillemet optionnel en lecture isolée)
//   7. 6.5"        pouces seuls
//   8. 12          nombre nu (dernier recours, en pouces)
//
// Deux jeux de motifs :
// - LECTURE   : ancrés ^...$, pour un littéral isolé (parse_measurement)
// - RECHERCHE : non ancrés, pour balayer une expression (extraction + validation);
//               le guillemet y est obligatoire pour 5 et 6, et 8 n’existe pas.
//
// Chiffres ASCII seulement ([0-9], jamais \d qui est Unicode).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use std::ops::Range;

use super::erreur::CalcError;
use super::lecture::parse_decimal;
use super::mesure::{RationalInches, POUCES_PAR_PIED};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Forme {
    PiedsMixte,
    PiedsFraction,
    PiedsPouces,
    PiedsSeuls,
    Mixte,
    Fraction,
    Pouces,
    Nombre,
}

impl Forme {
    /// Ordre fixe d’essai.
    pub const PRIORITE: [Forme; 8] = [
        Forme::PiedsMixte,
        Forme::PiedsFraction,
        Forme::PiedsPouces,
        Forme::PiedsSeuls,
        Forme::Mixte,
        Forme::Fraction,
        Forme::Pouces,
        Forme::Nombre,
    ];

    /// Formes portant une désignation ' ou " (les seules extraites d’une expression).
    pub const AVEC_UNITE: [Forme; 7] = [
        Forme::PiedsMixte,
        Forme::PiedsFraction,
        Forme::PiedsPouces,
        Forme::PiedsSeuls,
        Forme::Mixte,
        Forme::Fraction,
        Forme::Pouces,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Forme::PiedsMixte => "pieds + pouces mixtes",
            Forme::PiedsFraction => "pieds + fraction",
            Forme::PiedsPouces => "pieds + pouces",
            Forme::PiedsSeuls => "pieds",
            Forme::Mixte => "pouces mixtes",
            Forme::Fraction => "fraction de pouce",
            Forme::Pouces => "pouces",
            Forme::Nombre => "nombre nu",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn motif_lecture(self) -> &'static Regex {
        &MOTIFS_LECTURE[self.index()]
    }

    fn motif_recherche(self) -> Option<&'static Regex> {
        MOTIFS_RECHERCHE.get(self.index())
    }

    /// Lit `texte` avec CETTE forme seulement (motif ancré).
    pub fn lire(self, texte: &str) -> Result<Option<RationalInches>, CalcError> {
        match self.motif_lecture().captures(texte) {
            Some(caps) => self.valeur(&caps, texte).map(Some),
            None => Ok(None),
        }
    }

    /// feet*12 + pouces + num/den, exact.
    fn valeur(self, caps: &Captures<'_>, texte: &str) -> Result<RationalInches, CalcError> {
        let entier = |i: usize| -> Result<BigInt, CalcError> {
            caps.get(i)
                .and_then(|m| BigInt::parse_bytes(m.as_str().as_bytes(), 10))
                .ok_or_else(|| CalcError::parse(texte))
        };
        let decimal = |i: usize| -> Result<BigRational, CalcError> {
            caps.get(i)
                .and_then(|m| parse_decimal(m.as_str()))
                .ok_or_else(|| CalcError::parse(texte))
        };
        let fraction = |i_num: usize, i_den: usize| -> Result<BigRational, CalcError> {
            let n = entier(i_num)?;
            let d = entier(i_den)?;
            if d.is_zero() {
                return Err(CalcError::parse(texte));
            }
            Ok(BigRational::new(n, d))
        };
        let pieds = |i: usize| -> Result<BigRational, CalcError> {
            Ok(BigRational::from_integer(entier(i)? * POUCES_PAR_PIED))
        };

        let r = match self {
            Forme::PiedsMixte => {
                pieds(1)? + BigRational::from_integer(entier(2)?) + fraction(3, 4)?
            }
            Forme::PiedsFraction => pieds(1)? + fraction(2, 3)?,
            Forme::PiedsPouces => pieds(1)? + decimal(2)?,
            Forme::PiedsSeuls => pieds(1)?,
            Forme::Mixte => BigRational::from_integer(entier(1)?) + fraction(2, 3)?,
            Forme::Fraction => fraction(1, 2)?,
            Forme::Pouces | Forme::Nombre => decimal(1)?,
        };
        Ok(RationalInches::from(r))
    }
}

/* ------------------------ Motifs ------------------------ */

const DEC: &str = r"[0-9]+(?:\.[0-9]+)?";

fn corps(forme: Forme, guillemet_facultatif: bool) -> String {
    let q = if guillemet_facultatif { "\"?" } else { "\"" };
    match forme {
        Forme::PiedsMixte => r#"([0-9]+)'\s*([0-9]+)\s+([0-9]+)/([0-9]+)""#.to_string(),
        Forme::PiedsFraction => r#"([0-9]+)'\s*([0-9]+)/([0-9]+)""#.to_string(),
        Forme::PiedsPouces => format!(r#"([0-9]+)'\s*({DEC})""#),
        Forme::PiedsSeuls => r"([0-9]+)'".to_string(),
        Forme::Mixte => format!(r"([0-9]+)\s+([0-9]+)/([0-9]+){q}"),
        Forme::Fraction => format!(r"([0-9]+)/([0-9]+){q}"),
        Forme::Pouces => format!(r#"({DEC})""#),
        Forme::Nombre => format!(r"({DEC})"),
    }
}

static MOTIFS_LECTURE: Lazy<Vec<Regex>> = Lazy::new(|| {
    Forme::PRIORITE
        .iter()
        .map(|f| Regex::new(&format!("^{}$", corps(*f, true))).unwrap())
        .collect()
});

static MOTIFS_RECHERCHE: Lazy<Vec<Regex>> = Lazy::new(|| {
    Forme::AVEC_UNITE
        .iter()
        .map(|f| Regex::new(&corps(*f, false)).unwrap())
        .collect()
});

/* ------------------------ Lecture d’un littéral isolé ------------------------ */

/// Lit un littéral de mesure (texte isolé, espaces de bord ignorés).
///
/// Les formes sont essayées dans l’ordre de [`Forme::PRIORITE`]; la première qui
/// couvre tout le texte gagne. Aucune forme => `CalcError::Parse`.
pub fn parse_measurement(text: &str) -> Result<RationalInches, CalcError> {
    parse_avec_forme(text).map(|(v, _)| v)
}

/// Comme [`parse_measurement`], en rendant aussi la forme reconnue.
pub fn parse_avec_forme(text: &str) -> Result<(RationalInches, Forme), CalcError> {
    let t = text.trim();
    for forme in Forme::PRIORITE {
        if let Some(v) = forme.lire(t)? {
            return Ok((v, forme));
        }
    }
    Err(CalcError::parse(t))
}

/* ------------------------ Balayage d’une expression ------------------------ */

/// Caractère de remplissage des zones déjà réclamées (neutre pour tous les motifs).
pub(crate) const REMPLISSAGE: &str = "#";

fn colle(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '\'' | '"')
}

/// Occurrences de `forme` dans `tampon`, non collées à un chiffre/marque voisin.
///
/// Un `/` juste après reste permis (division : `2'/2`).
pub(crate) fn occurrences(forme: Forme, tampon: &str) -> Vec<Range<usize>> {
    let Some(re) = forme.motif_recherche() else {
        return Vec::new();
    };

    re.find_iter(tampon)
        .filter(|m| {
            let avant = tampon[..m.start()].chars().next_back();
            let apres = tampon[m.end()..].chars().next();
            !avant.is_some_and(colle) && !apres.is_some_and(colle)
        })
        .map(|m| m.range())
        .collect()
}

/// Remplace la zone par du remplissage, même longueur en octets (les positions restent valides).
pub(crate) fn masquer(tampon: &mut String, zone: Range<usize>) {
    let bouche = REMPLISSAGE.repeat(zone.len());
    tampon.replace_range(zone, &bouche);
}
