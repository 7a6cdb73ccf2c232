//! Noyau exact pieds/pouces
//!
//! Organisation interne :
//! - mesure.rs     : RationalInches (pouces, rationnel exact)
//! - erreur.rs     : CalcError (Parse / Validation / Syntax / Evaluation)
//! - lecture.rs    : décimal <-> rationnel exact
//! - litteral.rs   : grammaire des huit formes + parse_measurement
//! - validation.rs : désignations ' et " obligatoires
//! - extraction.rs : littéraux d’une expression, le plus spécifique d’abord
//! - jetons.rs     : tokenisation (après substitution)
//! - rpn.rs        : shunting-yard + évaluation exacte sur pile explicite
//! - eval.rs       : pipeline complet
//! - format.rs     : pouces -> F' I N/D" (+ arrondi)

pub mod erreur;
pub mod eval;
pub mod extraction;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod litteral;
pub mod mesure;
pub mod rpn;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use erreur::CalcError;
pub use eval::{evaluate_expression, evaluate_with_steps, DemarcheNoyau};
pub use extraction::{extract_measurements, Extraction, MeasurementLiteral};
pub use format::{format_measurement, format_result, FormatOptions, FormattedMeasurement};
pub use litteral::{parse_measurement, Forme};
pub use mesure::RationalInches;
pub use validation::validate_expression;
