// src/noyau/format.rs
//
// Pouces (rationnel exact) -> texte  F' I N/D"
//
// Étapes :
//   a) arrondi optionnel au multiple le plus proche d’un incrément (> 0), moitié loin de zéro
//   b) signe à part, on travaille sur |v|
//   c) pieds = ⌊v / 12⌋, reste = v mod 12
//   d) reste -> meilleure approximation rationnelle, dénominateur ≤ borne (fractions continues)
//   e) parties non nulles jointes par une espace : 1' 6 3/4"
//   f) tout nul => 0"
//   g) signe '-' en tête de la chaîne entière

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;

use super::litteral::parse_measurement;
use super::mesure::{RationalInches, POUCES_PAR_PIED};

/// Dénominateur maximal par défaut (1/64").
pub const DENOMINATEUR_MAX_DEFAUT: u32 = 64;

/// Réglages du formateur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Borne du dénominateur de la fraction de pouce (≥ 1).
    pub max_denominator: u32,
    /// Incrément d’arrondi (`None` ou ≤ 0 : pas d’arrondi).
    pub increment: Option<RationalInches>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_denominator: DENOMINATEUR_MAX_DEFAUT,
            increment: None,
        }
    }
}

/// Mesure décomposée, prête à afficher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedMeasurement {
    pub negatif: bool,
    pub pieds: BigInt,
    /// 0..=11
    pub pouces: BigInt,
    /// numerateur < denominateur ; 0/1 si pas de fraction
    pub numerateur: BigInt,
    pub denominateur: BigInt,
}

impl FormattedMeasurement {
    pub fn is_zero(&self) -> bool {
        self.pieds.is_zero() && self.pouces.is_zero() && self.numerateur.is_zero()
    }
}

impl fmt::Display for FormattedMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0\"");
        }

        let mut parts: Vec<String> = Vec::with_capacity(2);
        if !self.pieds.is_zero() {
            parts.push(format!("{}'", self.pieds));
        }

        let frac = !self.numerateur.is_zero();
        match (self.pouces.is_zero(), frac) {
            (true, false) => {}
            (false, false) => parts.push(format!("{}\"", self.pouces)),
            (true, true) => parts.push(format!("{}/{}\"", self.numerateur, self.denominateur)),
            (false, true) => parts.push(format!(
                "{} {}/{}\"",
                self.pouces, self.numerateur, self.denominateur
            )),
        }

        if self.negatif {
            write!(f, "-")?;
        }
        write!(f, "{}", parts.join(" "))
    }
}

/* ------------------------ Arrondi ------------------------ */

/// Multiple de `increment` le plus proche (moitié loin de zéro). Incrément ≤ 0 : inchangé.
pub fn arrondi_a(valeur: &RationalInches, increment: &RationalInches) -> RationalInches {
    if !increment.as_rational().is_positive() {
        return valeur.clone();
    }
    let inc = increment.as_rational();
    let k = (valeur.as_rational() / inc).round();
    RationalInches::from(k * inc)
}

/* ------------------------ Meilleure approximation (fractions continues) ------------------------ */

/// Fraction la plus proche de `x` (≥ 0) dont le dénominateur est ≤ `max_den`.
///
/// Algorithme “limit denominator” : convergents des fractions continues,
/// puis comparaison avec le meilleur semi-convergent.
pub fn limite_denominateur(x: &BigRational, max_den: u32) -> BigRational {
    let max_den = BigInt::from(max_den.max(1));
    if x.denom() <= &max_den {
        return x.clone();
    }

    let (mut p0, mut q0, mut p1, mut q1) =
        (BigInt::zero(), BigInt::one(), BigInt::one(), BigInt::zero());
    let mut n = x.numer().clone();
    let mut d = x.denom().clone();

    loop {
        let a = &n / &d;
        let q2 = &q0 + &a * &q1;
        if q2 > max_den {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
        if n.is_zero() || d.is_zero() {
            break;
        }
    }

    let k = (&max_den - &q0) / &q1;
    let borne1 = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let borne2 = BigRational::new(p1, q1);

    if (&borne2 - x).abs() <= (&borne1 - x).abs() {
        borne2
    } else {
        borne1
    }
}

/* ------------------------ Formatage ------------------------ */

/// Décompose `valeur` selon `opts` (arrondi puis réduction de la fraction).
pub fn format_measurement(valeur: &RationalInches, opts: &FormatOptions) -> FormattedMeasurement {
    let v = match &opts.increment {
        Some(inc) => arrondi_a(valeur, inc),
        None => valeur.clone(),
    };

    let negatif = v.is_negative();
    let abs = v.as_rational().abs();

    let douze = BigInt::from(POUCES_PAR_PIED);
    let mut pieds = (&abs / BigRational::from_integer(douze.clone())).floor().to_integer();
    let reste = &abs - BigRational::from_integer(&pieds * &douze);

    let approx = limite_denominateur(&reste, opts.max_denominator);
    let mut pouces = approx.numer() / approx.denom();
    let numerateur = approx.numer() % approx.denom();
    let denominateur = approx.denom().clone();

    // 11 63/64" arrondi à 12" => un pied de plus
    if pouces >= douze {
        pouces -= &douze;
        pieds += 1;
    }

    let mut out = FormattedMeasurement {
        negatif,
        pieds,
        pouces,
        numerateur,
        denominateur,
    };
    if out.is_zero() {
        out.negatif = false;
    }
    out
}

/// API publique : pouces -> texte, avec arrondi optionnel (`round_to` est un littéral, ex: `1/8"`).
///
/// Un `round_to` illisible ou ≤ 0 signifie “pas d’arrondi” (jamais une erreur).
pub fn format_result(value: &RationalInches, round_to: Option<&str>) -> String {
    let opts = FormatOptions {
        increment: round_to.and_then(increment_depuis_texte),
        ..FormatOptions::default()
    };
    format_measurement(value, &opts).to_string()
}

/// Lit un incrément d’arrondi ; vide ou illisible => None (journalisé).
pub fn increment_depuis_texte(texte: &str) -> Option<RationalInches> {
    let t = texte.trim();
    if t.is_empty() {
        return None;
    }
    match parse_measurement(t) {
        Ok(v) if v.as_rational().is_positive() => Some(v),
        Ok(_) => None,
        Err(e) => {
            log::warn!("arrondi ignoré ({t:?}) : {e}");
            None
        }
    }
}
