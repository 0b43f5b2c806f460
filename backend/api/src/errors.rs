//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No campaign with the requested id exists.
    #[error("Fundraiser not found")]
    NotFound,

    /// The operation is not permitted in the entity's current state
    /// (e.g. donating to a completed campaign).
    #[error("{0}")]
    InvalidState(String),

    /// One or more field-level violations. Always carries the complete
    /// list, never just the first failure.
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure; mapped to 500 at the facade boundary.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
