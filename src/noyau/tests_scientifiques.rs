//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du noyau sur des grilles bornées.
//! - aller-retour : format(parse(s)) relu == parse(s) (à 1/64" près)
//! - idempotence du formatage
//! - commutativité / priorité / négatifs / arrondi
//! - spécificité de l’extraction
//!
//! Notes :
//! - La grammaire des littéraux n’a pas de signe : relire() retire le '-' puis négative.
//! - Les grilles restent petites (budget temps global).

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::erreur::CalcError;
use super::eval::evaluate_expression;
use super::extraction::extract_measurements;
use super::format::{format_result, DENOMINATEUR_MAX_DEFAUT};
use super::litteral::parse_measurement;
use super::mesure::RationalInches;

fn eval_ok(expr: &str) -> RationalInches {
    evaluate_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn pouces(n: i64, d: i64) -> RationalInches {
    RationalInches::from_ratio(n, d).unwrap()
}

/// Relit une sortie du formateur (signe compris).
fn relire(txt: &str) -> RationalInches {
    match txt.strip_prefix('-') {
        Some(reste) => -parse_measurement(reste).unwrap_or_else(|e| panic!("{txt:?}: {e}")),
        None => parse_measurement(txt).unwrap_or_else(|e| panic!("{txt:?}: {e}")),
    }
}

/// |a - b| ≤ 1/(2·64)
fn proche(a: &RationalInches, b: &RationalInches) -> bool {
    let ecart = (a.as_rational() - b.as_rational()).abs();
    ecart <= BigRational::new(BigInt::from(1), BigInt::from(2 * DENOMINATEUR_MAX_DEFAUT))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Aller-retour par forme ------------------------ */

const LITTERAUX: &[&str] = &[
    // 1. pieds + pouces mixtes
    "1' 2 3/4\"",
    "5' 11 7/8\"",
    "10' 5 1/16\"",
    // 2. pieds + fraction
    "1' 1/2\"",
    "10' 11/16\"",
    // 3. pieds + pouces
    "1' 6\"",
    "2' 6.25\"",
    "5' 11\"",
    // 4. pieds seuls
    "1'",
    "100'",
    // 5. pouces mixtes
    "0 1/2\"",
    "11 15/16\"",
    // 6. fraction
    "1/64\"",
    "1/3\"",
    "15/16",
    // 7. pouces seuls
    "6.5\"",
    "30\"",
    // 8. nombre nu
    "14.75",
];

#[test]
fn sci_aller_retour_toutes_formes() {
    for s in LITTERAUX {
        let v = parse_measurement(s).unwrap();
        let txt = format_result(&v, None);
        let relu = relire(&txt);
        assert!(proche(&relu, &v), "s={s:?} txt={txt:?}");
    }
}

#[test]
fn sci_aller_retour_exact_si_denominateur_borne() {
    // dénominateurs ≤ 64 : égalité stricte
    for s in ["1' 2 3/4\"", "1/64\"", "1/3\"", "30\"", "6.5\""] {
        let v = parse_measurement(s).unwrap();
        assert_eq!(relire(&format_result(&v, None)), v, "s={s:?}");
    }
}

#[test]
fn sci_idempotence_formatage() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    for n in -300..=300 {
        budget(t0, max);
        for d in [1, 2, 3, 8, 64, 100, 1000] {
            let v = pouces(n, d);
            let une = format_result(&v, None);
            let deux = format_result(&relire(&une), None);
            assert_eq!(une, deux, "v={v}");
        }
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_commutativite() {
    let a = eval_ok("2' 6\" + 1' 8\"");
    let b = eval_ok("1' 8\" + 2' 6\"");
    assert_eq!(a, b);
    assert_eq!(a, pouces(62, 1));
}

#[test]
fn sci_associativite() {
    let a = eval_ok("(1' 1/2\" + 3 3/8\") + 7/16\"");
    let b = eval_ok("1' 1/2\" + (3 3/8\" + 7/16\")");
    assert_eq!(a, b);
}

#[test]
fn sci_priorite() {
    assert_eq!(eval_ok("1' + 2' * 2"), pouces(60, 1));
    assert_ne!(eval_ok("1' + 2' * 2"), pouces(72, 1));
}

#[test]
fn sci_negatifs() {
    assert_eq!(format_result(&pouces(-1, 2), None), "-1/2\"");
    assert_eq!(eval_ok("1' - 2'"), pouces(-12, 1));
    assert_eq!(format_result(&eval_ok("1' - 2'"), None), "-1'");
}

#[test]
fn sci_validation_rejette() {
    for s in ["10 11", "1/2 + 1"] {
        let e = evaluate_expression(s).unwrap_err();
        assert!(matches!(e, CalcError::Validation(_)), "s={s:?} e={e:?}");
    }
}

#[test]
fn sci_arrondi() {
    let v = RationalInches::from_f64(0.4).unwrap();
    assert_eq!(format_result(&v, Some("1/8\"")), "3/8\"");
}

#[test]
fn sci_specificite_extraction() {
    let e = extract_measurements("1' 2 3/4\" + 1\"").unwrap();
    let table = e.valeurs();
    assert_eq!(table.len(), 2);
    assert_eq!(table["1' 2 3/4\""], pouces(59, 4));
    assert_eq!(table["1\""], pouces(1, 1));
    assert!(!table.contains_key("3/4\""));
    assert_eq!(eval_ok("1' 2 3/4\" + 1\""), pouces(63, 4));
}

#[test]
fn sci_division_par_zero() {
    let e = evaluate_expression("1' / 0").unwrap_err();
    assert!(matches!(e, CalcError::Evaluation(_)), "e={e:?}");
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut expr = String::new();
    for k in 0..200 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1' 1/64\"");
        budget(t0, max);
    }

    // 200 * (12 + 1/64) = 2403.125 = 200' 3 1/8"
    let v = eval_ok(&expr);
    assert_eq!(v, pouces(19225, 8));
    assert_eq!(format_result(&v, None), "200' 3 1/8\"");
}

#[test]
fn sci_stress_grands_nombres() {
    // pieds à 40 chiffres : BigInt, pas de débordement
    let big = "9".repeat(40);
    let v = eval_ok(&format!("{big}' + 1'"));
    let txt = format_result(&v, None);
    assert_eq!(txt, format!("1{}'", "0".repeat(40)));
}
