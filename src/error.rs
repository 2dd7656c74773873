//! Error types for tennis scoring

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TennisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Structural invariant violated: {0}")]
    StructuralInvariantViolation(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TennisError>;
