//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - seule erreur acceptée sur une expression bien formée : division par zéro
//! - invariant clé : le texte formaté se relit à 1/64" près

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::eval::{evaluate_expression, evaluate_with_steps};
use super::format::format_result;
use super::litteral::parse_measurement;
use super::mesure::RationalInches;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn relire(txt: &str) -> RationalInches {
    match txt.strip_prefix('-') {
        Some(reste) => -parse_measurement(reste).unwrap_or_else(|e| panic!("{txt:?}: {e}")),
        None => parse_measurement(txt).unwrap_or_else(|e| panic!("{txt:?}: {e}")),
    }
}

fn check_relecture(expr: &str, v: &RationalInches) {
    let txt = format_result(v, None);
    let relu = relire(&txt);
    let ecart = (relu.as_rational() - v.as_rational()).abs();
    let tolerance = BigRational::new(BigInt::from(1), BigInt::from(128));
    assert!(
        ecart <= tolerance,
        "relecture trop loin: expr={expr:?} v={v} txt={txt:?}"
    );
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_fraction(rng: &mut Rng) -> String {
    let d = [2, 4, 8, 16, 32, 64][rng.pick(6) as usize];
    let n = 1 + rng.pick(d - 1);
    format!("{n}/{d}")
}

/// Un littéral bien désigné, dans l’une des sept formes avec unité.
fn gen_litteral(rng: &mut Rng) -> String {
    let pieds = rng.pick(21);
    let pouces = rng.pick(12);

    match rng.pick(8) {
        0 => format!("{pieds}' {pouces} {}\"", gen_fraction(rng)),
        1 => format!("{pieds}' {}\"", gen_fraction(rng)),
        2 => format!("{pieds}' {pouces}\""),
        3 => format!("{pieds}'"),
        4 => format!("{pouces} {}\"", gen_fraction(rng)),
        5 => format!("{}\"", gen_fraction(rng)),
        6 => format!("{pouces}.{}\"", [25, 5, 75, 125][rng.pick(4) as usize]),
        _ => format!("{pouces}\""),
    }
}

fn gen_scalaire(rng: &mut Rng) -> String {
    // 0 inclus : la division par zéro doit arriver par là
    ["0", "1", "2", "3", "4", "8", "1.5", "0.25"][rng.pick(8) as usize].to_string()
}

fn gen_terme(rng: &mut Rng, depth: usize) -> String {
    let base = if depth > 0 && rng.pick(4) == 0 {
        format!("({})", gen_expr(rng, depth - 1))
    } else {
        gen_litteral(rng)
    };

    match rng.pick(5) {
        0 => format!("{base} * {}", gen_scalaire(rng)),
        1 => format!("{base} / {}", gen_scalaire(rng)),
        2 => format!("{} x {base}", gen_scalaire(rng)),
        _ => base,
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    let mut out = String::new();
    if rng.pick(6) == 0 {
        out.push('-');
    }
    out.push_str(&gen_terme(rng, depth));

    for _ in 0..rng.pick(4) {
        let op = if rng.coin() { " + " } else { " - " };
        out.push_str(op);
        out.push_str(&gen_terme(rng, depth));
    }
    out
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0\"".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_relecture() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 2);

        match evaluate_expression(&expr) {
            Ok(v) => {
                // même entrée => même sortie
                assert_eq!(evaluate_expression(&expr).ok(), Some(v.clone()), "expr={expr:?}");
                check_relecture(&expr, &v);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    e.is_evaluation() && e.to_string().contains("division par zéro"),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_litteraux_isoles() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let lit = gen_litteral(&mut rng);
        let direct = parse_measurement(&lit).unwrap_or_else(|e| panic!("lit={lit:?} err={e}"));
        let via_expr = evaluate_expression(&lit).unwrap_or_else(|e| panic!("lit={lit:?} err={e}"));
        assert_eq!(direct, via_expr, "lit={lit:?}");
        check_relecture(&lit, &direct);
    }
}

#[test]
fn fuzz_safe_entrees_arbitraires_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', ' ', '\'', '"', '/', '.', '+', '-', '*', '(', ')', 'x', '÷', '×', 'a',
    ];
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);

        let len = 1 + rng.pick(16) as usize;
        let s: String = (0..len)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        // Ok ou Err, jamais de panique
        if let Ok(v) = evaluate_expression(&s) {
            let _ = format_result(&v, None);
        }
        let _ = parse_measurement(&s);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2\"", 800);
    let v = evaluate_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800 * 1/2" = 400" = 33' 4"
    assert_eq!(v, RationalInches::from_ratio(400, 1).unwrap());
    assert_eq!(format_result(&v, None), "33' 4\"");
}

#[test]
fn fuzz_safe_chaine_plate_anti_pile() {
    // 1" + 1" + ... : arbre gauche de 100 000 niveaux si on le construisait
    let t0 = Instant::now();
    let max = Duration::from_secs(60);

    let n = 100_000usize;
    let expr = vec!["1\""; n].join(" + ");
    let v = evaluate_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, RationalInches::from_ratio(n as i64, 1).unwrap());
    assert_eq!(format_result(&v, None), "8333' 4\"");
}

#[test]
fn fuzz_safe_chaine_plate_demarche() {
    let n = 2_000usize;
    let expr = vec!["1' 1/2\""; n].join(" - ");
    let (v, d) = evaluate_with_steps(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 12.5 - (n-1) * 12.5
    let attendu = RationalInches::from_ratio(-(25 * (n as i64 - 2)), 2).unwrap();
    assert_eq!(v, attendu);
    assert!(d.arbre.starts_with("(arbre omis"), "{}", &d.arbre[..40.min(d.arbre.len())]);
}

