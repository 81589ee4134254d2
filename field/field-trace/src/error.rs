//! Error types for the tracing pipeline.

use field_lattice::LatticeError;
use thiserror::Error;

/// Errors that can occur during a boundary extraction pass.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A configuration field failed validation. The whole pass fails before
    /// any lattice work happens.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        /// The offending parameter.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// An underlying lattice operation failed.
    #[error("lattice error: {0}")]
    Lattice(#[from] LatticeError),
}

impl TraceError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for tracing operations.
pub type TraceResult<T> = std::result::Result<T, TraceError>;
