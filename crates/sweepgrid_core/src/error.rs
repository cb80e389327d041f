//! Error types for sweepgrid_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while loading and validating trial records.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A raw trial could not be turned into a [`crate::TrialRecord`].
    #[error("Invalid trial #{index}: {reason}")]
    InvalidTrial {
        /// Position of the trial in its input sequence.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A parameter value has a shape that cannot be used as a sweep coordinate.
    #[error("Unsupported value for parameter '{name}': {got}")]
    UnsupportedValue {
        /// Parameter name.
        name: String,
        /// The offending value, as JSON.
        got: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
