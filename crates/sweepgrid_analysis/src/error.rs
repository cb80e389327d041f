//! Error types for sweep aggregation.

use thiserror::Error;

use crate::grid::Coordinate;

/// Result type alias for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

/// Errors local to one algorithm's sweep. None of them abort a batch.
#[derive(Error, Debug)]
pub enum SweepError {
    /// No trial tag matched the algorithm.
    #[error("No trials matched algorithm '{algorithm}'")]
    NoTrialsMatched {
        /// Canonical algorithm token.
        algorithm: String,
    },

    /// A grid cell has no exactly matching trial.
    #[error("No trial of '{algorithm}' covers {coordinate}")]
    UnresolvedCoordinate {
        /// Canonical algorithm token.
        algorithm: String,
        /// The uncovered cell.
        coordinate: Coordinate,
    },

    /// More swept hyperparameters than any grid shape can hold.
    #[error("Algorithm '{algorithm}' sweeps {found} hyperparameters ({names:?}), at most {max} supported")]
    TooManyAxes {
        /// Canonical algorithm token.
        algorithm: String,
        /// Number of distinct hyperparameters found.
        found: usize,
        /// Largest accepted number.
        max: usize,
        /// All discovered names, in discovery order.
        names: Vec<String>,
    },

    /// No swept hyperparameters but several trials, so no single score.
    #[error("Algorithm '{algorithm}' has no swept hyperparameters but {count} trials")]
    AmbiguousScalar {
        /// Canonical algorithm token.
        algorithm: String,
        /// Number of matched trials.
        count: usize,
    },

    /// Core error.
    #[error("Core error: {0}")]
    CoreError(#[from] sweepgrid_core::CoreError),

    /// Serialization error while rendering.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error while rendering.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SweepError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SweepError::NoTrialsMatched { .. } => "no_trials_matched",
            SweepError::UnresolvedCoordinate { .. } => "unresolved_coordinate",
            SweepError::TooManyAxes { .. } => "too_many_axes",
            SweepError::AmbiguousScalar { .. } => "ambiguous_scalar",
            SweepError::CoreError(_) => "core",
            SweepError::SerializationError(_) => "serialization",
            SweepError::IoError(_) => "io",
        }
    }
}
