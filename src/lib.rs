// src/lib.rs
//
// Calculatrice pieds-pouces — bibliothèque
// ----------------------------------------
// Noyau exact (sans UI) : lecture des mesures, validation, extraction,
// évaluation arithmétique, formatage F' I N/D".
//
// L’interface egui (src/app) vit dans le binaire et consomme ce noyau.

pub mod noyau;

pub use noyau::{
    evaluate_expression, evaluate_with_steps, extract_measurements, format_measurement,
    format_result, parse_measurement, validate_expression, CalcError, DemarcheNoyau,
    FormatOptions, FormattedMeasurement, RationalInches,
};
