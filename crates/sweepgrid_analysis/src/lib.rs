//! # sweepgrid_analysis
//!
//! Parameter sweep aggregation for hyperparameter search results.
//!
//! For each requested algorithm this crate:
//! - normalizes the user label to a canonical [`Algorithm`]
//! - selects the trials whose estimator tag matches it
//! - discovers the swept hyperparameters as ordered [`Axis`] values
//! - resolves every grid coordinate to a score, producing a [`SweepGrid`]
//! - describes the result for plotting as a [`SweepFigure`]
//!
//! Several algorithms are processed with [`run_batch`], which isolates
//! failures per algorithm.
//!
//! ## Example
//!
//! ```rust
//! use sweepgrid_analysis::{sweep, SweepGrid};
//! use sweepgrid_core::{ParamSet, SweepConfig, TrialRecord};
//!
//! let trials = vec![TrialRecord::new("GaussianNB()", ParamSet::new(), 0.93)];
//! let result = sweep("naive bayes", &trials, &SweepConfig::default()).unwrap();
//! assert_eq!(result.grid, SweepGrid::Scalar { score: 0.93 });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod algorithm;
mod axis;
mod batch;
mod error;
mod figure;
mod filter;
mod grid;
mod render;
mod selector;
mod sweep;

pub use algorithm::{normalize, title_case, Algorithm};
pub use axis::{extract_axes, Axis};
pub use batch::{run_batch, BatchOutcome, BatchReport};
pub use error::{Result, SweepError};
pub use figure::{
    figure_file_name, figure_title, format_score, HeatmapPanel, PanelLayout, SweepFigure,
};
pub use filter::{filter_trials, FilteredTrials};
pub use grid::{build_grid, lookup, Cell, Coordinate, SweepGrid};
pub use render::{JsonRenderer, SweepRenderer, TextRenderer};
pub use selector::{panel_index, select_dimensions, PanelSelection};
pub use sweep::{plan, sweep, SweepPlan, SweepResult};
