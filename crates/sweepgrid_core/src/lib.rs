//! # sweepgrid_core
//!
//! Core types for sweepgrid hyperparameter sweep aggregation.
//!
//! This crate provides:
//! - [`ParamValue`] and the insertion-ordered [`ParamSet`]
//! - [`TrialRecord`] plus ingestion of raw search output ([`RawTrial`])
//! - [`SweepConfig`] and the [`MissingCellPolicy`]
//! - Error types and common utilities
//!
//! ## Example
//!
//! ```rust
//! use sweepgrid_core::{ParamSet, TrialRecord};
//!
//! let params = ParamSet::new().with("max_depth", 5);
//! let trial = TrialRecord::new("DecisionTreeClassifier(max_depth=5)", params, 0.81);
//! assert_eq!(trial.param("max_depth").and_then(|v| v.as_int()), Some(5));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod params;
mod trial;
mod value;

pub use config::{MissingCellPolicy, SweepConfig, MAX_SUPPORTED_AXES};
pub use error::{CoreError, Result};
pub use params::ParamSet;
pub use trial::{parse_trials, read_trials, RawTrial, TrialInput, TrialRecord, ESTIMATOR_KEY};
pub use value::ParamValue;
