// src/noyau/erreur.rs
//
// Erreurs du noyau. Le message (Display) est affiché tel quel par l’UI.

use thiserror::Error;

/// Format canonique cité dans les messages d’aide.
pub const EXEMPLE_FORMAT: &str = "10' 2 1/2\"";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Littéral qui ne correspond à aucune des huit formes.
    #[error("Mesure illisible : {texte:?}. Exemple : {ex}", ex = EXEMPLE_FORMAT)]
    Parse { texte: String },

    /// Nombre ou fraction sans désignation pieds/pouces.
    #[error("Erreur de format : {0}")]
    Validation(String),

    /// Arithmétique mal formée après substitution.
    #[error("Erreur de syntaxe : {0}")]
    Syntax(String),

    /// Faute arithmétique (division par zéro).
    #[error("Erreur de calcul : {0}")]
    Evaluation(String),
}

impl CalcError {
    pub fn parse(texte: impl Into<String>) -> Self {
        CalcError::Parse {
            texte: texte.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CalcError::Validation(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, CalcError::Syntax(_))
    }

    pub fn is_evaluation(&self) -> bool {
        matches!(self, CalcError::Evaluation(_))
    }
}
