//! Per-algorithm sweep aggregation.
//!
//! [`plan`] runs normalization, filtering and axis discovery; [`sweep`]
//! continues through grid construction and applies the missing-cell policy.

use serde::{Deserialize, Serialize};
use sweepgrid_core::{MissingCellPolicy, SweepConfig, TrialRecord};
use tracing::{debug, info, warn};

use crate::algorithm::Algorithm;
use crate::axis::{extract_axes, Axis};
use crate::error::{Result, SweepError};
use crate::filter::{filter_trials, FilteredTrials};
use crate::grid::{build_grid, Coordinate, SweepGrid};
use crate::selector::panel_index;

/// Discovered sweep structure of one algorithm, before any grid is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Label as supplied by the caller.
    pub label: String,
    /// Normalized algorithm.
    pub algorithm: Algorithm,
    /// Number of matching trials.
    pub n_trials: usize,
    /// Swept axes in discovery order.
    pub axes: Vec<Axis>,
    /// Index into `axes` of the panel axis, for three-axis sweeps.
    pub panel: Option<usize>,
}

/// A finished sweep: grid plus the labeling metadata a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Label as supplied by the caller.
    pub label: String,
    /// Normalized algorithm.
    pub algorithm: Algorithm,
    /// Number of matching trials.
    pub n_trials: usize,
    /// The resolved grid.
    pub grid: SweepGrid,
    /// Cells no trial covers (empty unless the policy is `Blank`).
    pub unresolved: Vec<Coordinate>,
}

impl SweepResult {
    /// Upper-cased canonical token.
    pub fn display_token(&self) -> String {
        self.algorithm.display_token()
    }

    /// Check if every cell was resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Normalize `label`, select its trials and discover the swept axes.
pub fn plan(label: &str, trials: &[TrialRecord], config: &SweepConfig) -> Result<SweepPlan> {
    prepare(label, trials, config).map(|(plan, _)| plan)
}

fn prepare<'a>(
    label: &str,
    trials: &'a [TrialRecord],
    config: &SweepConfig,
) -> Result<(SweepPlan, FilteredTrials<'a>)> {
    let algorithm = Algorithm::normalize(label);
    let filtered = filter_trials(&algorithm, trials);

    if filtered.is_empty() {
        return Err(SweepError::NoTrialsMatched {
            algorithm: algorithm.token().to_string(),
        });
    }

    let axes = extract_axes(filtered.trials());
    debug!(
        algorithm = %algorithm,
        n_trials = filtered.len(),
        axes = ?axes.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        "discovered sweep axes"
    );

    let limit = config.axis_limit();
    if axes.len() > limit {
        warn!(
            algorithm = %algorithm,
            found = axes.len(),
            max = limit,
            "too many swept hyperparameters"
        );
        return Err(SweepError::TooManyAxes {
            algorithm: algorithm.token().to_string(),
            found: axes.len(),
            max: limit,
            names: axes.into_iter().map(|a| a.name).collect(),
        });
    }

    let panel = if axes.len() == 3 { panel_index(&axes) } else { None };

    let plan = SweepPlan {
        label: label.to_string(),
        algorithm,
        n_trials: filtered.len(),
        axes,
        panel,
    };
    Ok((plan, filtered))
}

/// Aggregate the trials of one algorithm into a score grid.
pub fn sweep(label: &str, trials: &[TrialRecord], config: &SweepConfig) -> Result<SweepResult> {
    let (plan, filtered) = prepare(label, trials, config)?;
    let grid = build_grid(&plan.algorithm, filtered.trials(), plan.axes)?;

    let unresolved = grid.unresolved();
    if let Some(first) = unresolved.first() {
        match config.missing_cells {
            MissingCellPolicy::Reject => {
                return Err(SweepError::UnresolvedCoordinate {
                    algorithm: plan.algorithm.token().to_string(),
                    coordinate: first.clone(),
                });
            }
            MissingCellPolicy::Blank => {
                warn!(
                    algorithm = %plan.algorithm,
                    missing = unresolved.len(),
                    first = %first,
                    "grid has cells without a matching trial"
                );
            }
        }
    }

    info!(
        algorithm = %plan.algorithm,
        kind = grid.kind(),
        shape = ?grid.shape(),
        "sweep aggregated"
    );

    Ok(SweepResult {
        label: plan.label,
        algorithm: plan.algorithm,
        n_trials: plan.n_trials,
        grid,
        unresolved,
    })
}
