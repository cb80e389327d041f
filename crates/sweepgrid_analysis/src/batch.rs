//! Batch processing over several algorithms.

use rayon::prelude::*;
use sweepgrid_core::{SweepConfig, TrialRecord};
use tracing::{info, warn};

use crate::error::SweepError;
use crate::sweep::{sweep, SweepResult};

/// Outcome of one algorithm in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Label as supplied by the caller.
    pub label: String,
    /// The sweep, or the error that stopped this algorithm.
    pub result: Result<SweepResult, SweepError>,
}

/// Outcomes of a batch, in the order the labels were given.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per requested label.
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Successful sweeps.
    pub fn succeeded(&self) -> impl Iterator<Item = &SweepResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed algorithms with their errors.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &SweepError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.label.as_str(), e)))
    }

    /// Number of successful sweeps.
    pub fn n_succeeded(&self) -> usize {
        self.succeeded().count()
    }

    /// Number of failed algorithms.
    pub fn n_failed(&self) -> usize {
        self.failed().count()
    }

    /// One line per algorithm.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "{:<22} {:<14} {:>7} {:>10}  {}\n",
            "algorithm", "grid", "trials", "unresolved", "status"
        ));
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(result) => s.push_str(&format!(
                    "{:<22} {:<14} {:>7} {:>10}  ok\n",
                    outcome.label,
                    result.grid.kind(),
                    result.n_trials,
                    result.unresolved.len()
                )),
                Err(err) => s.push_str(&format!(
                    "{:<22} {:<14} {:>7} {:>10}  {}\n",
                    outcome.label, "-", "-", "-", err
                )),
            }
        }
        s
    }
}

/// Sweep every label independently.
///
/// A failure is recorded for its label and never stops the rest of the
/// batch. With `config.parallel` the labels are processed on the rayon pool;
/// the report keeps input order either way.
pub fn run_batch<S: AsRef<str> + Sync>(
    labels: &[S],
    trials: &[TrialRecord],
    config: &SweepConfig,
) -> BatchReport {
    let run_one = |label: &S| {
        let label = label.as_ref();
        let result = sweep(label, trials, config);
        if let Err(err) = &result {
            warn!(label = %label, kind = err.kind(), error = %err, "sweep failed");
        }
        BatchOutcome {
            label: label.to_string(),
            result,
        }
    };

    let outcomes: Vec<BatchOutcome> = if config.parallel {
        labels.par_iter().map(run_one).collect()
    } else {
        labels.iter().map(run_one).collect()
    };

    let report = BatchReport { outcomes };
    info!(
        succeeded = report.n_succeeded(),
        failed = report.n_failed(),
        "batch finished"
    );
    report
}
