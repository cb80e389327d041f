//! # sweepgrid
//!
//! Hyperparameter sweep aggregation in Rust.
//!
//! sweepgrid turns the trials of a model-selection run into per-algorithm
//! score grids ready for heatmap rendering:
//!
//! - **Core**: parameter values, ordered parameter sets, trial ingestion, config
//! - **Analysis**: algorithm normalization, trial filtering, axis discovery,
//!   grid resolution, figure metadata and renderers
//!
//! ## Quick Start
//!
//! ```rust
//! use sweepgrid::prelude::*;
//!
//! let trials = vec![
//!     TrialRecord::new("DecisionTreeClassifier()", ParamSet::new().with("max_depth", 5), 0.81),
//!     TrialRecord::new("DecisionTreeClassifier()", ParamSet::new().with("max_depth", 25), 0.77),
//! ];
//!
//! let config = SweepConfig::default();
//! let report = run_batch(&["tree"], &trials, &config);
//! for result in report.succeeded() {
//!     let figure = SweepFigure::from_result(result, &config);
//!     assert_eq!(figure.file_name, "Parameter sweep TREE algorithm.png");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub use sweepgrid_analysis as analysis;
pub use sweepgrid_core as core;

/// Prelude module for convenient imports.
///
/// ```rust
/// use sweepgrid::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sweepgrid_core::{
        parse_trials, read_trials, MissingCellPolicy, ParamSet, ParamValue, SweepConfig,
        TrialRecord,
    };

    // Aggregation
    pub use sweepgrid_analysis::{
        plan, run_batch, sweep, Algorithm, Axis, BatchReport, Cell, Coordinate, SweepError,
        SweepGrid, SweepResult,
    };

    // Rendering
    pub use sweepgrid_analysis::{
        JsonRenderer, SweepFigure, SweepRenderer, TextRenderer,
    };
}
