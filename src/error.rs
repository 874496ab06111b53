//! Error types for u-evolve.
//!
//! Every failure that can reach a caller is an [`EvolveError`]. The
//! variants separate rejected requests (bad input, bad configuration,
//! unreadable matrix sources, oversized runs) from faults inside the
//! engine, so the serving layer can map them to different responses.

use thiserror::Error;

/// Unified error type for all u-evolve operations.
#[derive(Error, Debug)]
pub enum EvolveError {
    /// The request describes an invalid problem instance
    /// (empty items, mismatched matrix, negative weights, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The evolutionary parameters are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A distance-matrix source could not be parsed.
    #[error("invalid matrix source: {0}")]
    Ingestion(String),

    /// The requested run exceeds the configured resource limits.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// An unexpected fault inside the engine.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EvolveError {
    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EvolveError::InvalidInput(message.into())
    }

    /// Creates an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EvolveError::InvalidConfig(message.into())
    }

    /// Creates an ingestion error.
    pub fn ingestion(message: impl Into<String>) -> Self {
        EvolveError::Ingestion(message.into())
    }

    /// Returns `true` if the error was caused by the caller's request
    /// rather than by the engine.
    pub fn is_rejected_request(&self) -> bool {
        !matches!(self, EvolveError::Internal(_))
    }
}

impl From<csv::Error> for EvolveError {
    fn from(err: csv::Error) -> Self {
        EvolveError::Ingestion(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolveError>;
