// src/noyau/lecture.rs
//
// Décimal <-> rationnel exact.
// - lecture d’un décimal ("6.5") en rationnel exact (13/2)
// - écriture exacte d’un rationnel à développement fini (29/2 -> "14.5")
// - lecture tronquée (affichage "≈ ... po" dans l’UI)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/* ------------------------ Décimal (texte -> rationnel) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// "12", "6.5", "0.015625" -> rationnel exact.
/// Chiffres ASCII seulement, point décimal optionnel (jamais de signe).
pub fn parse_decimal(s: &str) -> Option<BigRational> {
    let (ent, frac) = match s.split_once('.') {
        Some((e, f)) => (e, f),
        None => (s, ""),
    };
    if ent.is_empty() || !ent.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.contains('.') && frac.is_empty() {
        return None;
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    Some(BigRational::new(n, pow10(frac.len())))
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = trunc(r * 10^digits)
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/// Lecture tronquée à `digits` décimales (zéros finaux retirés).
pub fn decimal_tronque(r: &BigRational, digits: usize) -> String {
    let txt = scaled_to_decimal(rational_scaled(r, digits), digits);
    nettoie_zeros(txt)
}

/// Écriture décimale EXACTE si le dénominateur n’a que des facteurs 2 et 5.
/// Sinon `None` (ex: 1/3).
pub fn decimal_exact(r: &BigRational) -> Option<String> {
    let d = r.denom();
    let (reste2, a) = retire_facteur(d.clone(), 2);
    let (reste, b) = retire_facteur(reste2, 5);
    if reste != BigInt::from(1) {
        return None;
    }

    let digits = a.max(b);
    let txt = scaled_to_decimal(rational_scaled(r, digits), digits);
    Some(nettoie_zeros(txt))
}

/// "14.7500" -> "14.75" ; "12.000" -> "12" ; "-0.0" -> "0"
fn nettoie_zeros(mut txt: String) -> String {
    if txt.contains('.') {
        while txt.ends_with('0') {
            txt.pop();
        }
        if txt.ends_with('.') {
            txt.pop();
        }
    }
    if txt == "-0" {
        txt = "0".to_string();
    }
    txt
}

/* ------------------------ Outil interne ------------------------ */

/// Retire tous les facteurs `p` de `n` : (n / p^k, k).
fn retire_facteur(mut n: BigInt, p: u32) -> (BigInt, usize) {
    let p = BigInt::from(p);
    let mut k = 0usize;
    if n.is_zero() {
        return (n, 0);
    }
    while (&n % &p).is_zero() {
        n /= &p;
        k += 1;
    }
    (n, k)
}
