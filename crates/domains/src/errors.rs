//! # DomainError
//!
//! Centralized error handling for the message board.
//! Expected negative outcomes (wrong password, unknown id on a moderation
//! action) are not errors; they are modelled as outcomes in `services`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required creation field is missing or blank
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (e.g. Thread, Reply)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// The stored document changed between load and save
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store unreachable or an update failed unexpectedly
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    pub fn thread_not_found(id: impl ToString) -> Self {
        Self::NotFound("thread", id.to_string())
    }

    /// Short stable label, e.g. for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::NotFound(..) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::Infrastructure(_) => "infrastructure",
        }
    }
}

/// A specialized Result type for message board logic.
pub type Result<T> = std::result::Result<T, DomainError>;
