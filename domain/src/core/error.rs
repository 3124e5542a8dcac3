//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Scenario has no personas")]
    NoPersonas,

    #[error("Scenario has {0} personas, at most {max} are supported", max = crate::CHOICE_LETTERS.len())]
    TooManyPersonas(usize),

    #[error("Persona name cannot be empty")]
    EmptyPersonaName,

    #[error("Duplicate persona name: {0}")]
    DuplicatePersona(String),

    #[error("Scenario field `{0}` cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}
