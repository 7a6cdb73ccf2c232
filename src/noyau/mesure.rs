// src/noyau/mesure.rs
//
// RationalInches : longueur exacte en pouces (rationnel, jamais de flottant).
// - créée par le lecteur de littéraux ou par l’arithmétique
// - consommée par format.rs
//
// f64 seulement en entrée (from_f64).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Pouces par pied.
pub const POUCES_PAR_PIED: i64 = 12;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RationalInches(BigRational);

impl RationalInches {
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// n/d pouces. `None` si d == 0.
    pub fn from_ratio(n: i64, d: i64) -> Option<Self> {
        if d == 0 {
            return None;
        }
        Some(Self(BigRational::new(BigInt::from(n), BigInt::from(d))))
    }

    pub fn from_integer(n: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }

    /// Valeur binaire EXACTE du flottant (0.4 n’est donc pas 2/5).
    /// `None` pour NaN / infini.
    pub fn from_f64(x: f64) -> Option<Self> {
        BigRational::from_float(x).map(Self)
    }

    pub fn as_rational(&self) -> &BigRational {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

impl From<BigRational> for RationalInches {
    fn from(r: BigRational) -> Self {
        Self(r)
    }
}

impl From<RationalInches> for BigRational {
    fn from(v: RationalInches) -> Self {
        v.0
    }
}

impl Add for RationalInches {
    type Output = RationalInches;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for RationalInches {
    type Output = RationalInches;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for RationalInches {
    type Output = RationalInches;
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

/// Panique si `rhs` est nul : l’évaluateur vérifie avant (voir rpn.rs).
impl Div for RationalInches {
    type Output = RationalInches;
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for RationalInches {
    type Output = RationalInches;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// "n/d" réduit, ou "n" si entier.
impl fmt::Display for RationalInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_reduit_et_affiche() {
        let v = RationalInches::from_ratio(6, 8).unwrap();
        assert_eq!(v.to_string(), "3/4");
        assert_eq!(RationalInches::from_ratio(24, 2).unwrap().to_string(), "12");
    }

    #[test]
    fn denominateur_nul_refuse() {
        assert!(RationalInches::from_ratio(1, 0).is_none());
    }

    #[test]
    fn un_tiers_reste_exact() {
        let tiers = RationalInches::from_ratio(1, 3).unwrap();
        let somme = tiers.clone() + tiers.clone() + tiers;
        assert_eq!(somme, RationalInches::from_integer(1));
    }

    fn pieds(n: i64) -> RationalInches {
        RationalInches::from_integer(n * POUCES_PAR_PIED)
    }

    #[test]
    fn pieds_en_pouces() {
        assert_eq!(pieds(3), RationalInches::from_integer(36));
        assert!((-pieds(1)).is_negative());
        assert_eq!((-pieds(1)).abs(), pieds(1));
    }

    #[test]
    fn flottant_binaire_exact() {
        let v = RationalInches::from_f64(-0.5).unwrap();
        assert_eq!(v, RationalInches::from_ratio(-1, 2).unwrap());
        assert!(RationalInches::from_f64(f64::NAN).is_none());
    }
}
