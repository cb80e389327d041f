//! Swept-axis discovery.

use serde::{Deserialize, Serialize};
use sweepgrid_core::{ParamValue, TrialRecord};

/// One swept hyperparameter and the values it took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Hyperparameter name.
    pub name: String,
    /// Distinct values in order of first appearance.
    pub values: Vec<ParamValue>,
    /// The value each filtered trial took, aligned 1:1 with the trials.
    /// `None` where a trial does not set this hyperparameter.
    pub original_sequence: Vec<Option<ParamValue>>,
}

impl Axis {
    /// Number of distinct values.
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    /// Index of `value` in [`values`](Self::values).
    pub fn position(&self, value: &ParamValue) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Value taken by the `trial`-th filtered trial.
    pub fn value_at(&self, trial: usize) -> Option<&ParamValue> {
        self.original_sequence.get(trial).and_then(Option::as_ref)
    }
}

/// Discover the swept axes of a trial sequence.
///
/// Names are collected in order of first occurrence, scanning each trial's
/// hyperparameters in their own insertion order. Every discovered axis is
/// returned; callers decide how many they support.
pub fn extract_axes(trials: &[&TrialRecord]) -> Vec<Axis> {
    let mut names: Vec<&str> = Vec::new();
    for trial in trials {
        for name in trial.hyperparameters.names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let original_sequence: Vec<Option<ParamValue>> =
                trials.iter().map(|t| t.param(name).cloned()).collect();

            let mut values: Vec<ParamValue> = Vec::new();
            for value in original_sequence.iter().flatten() {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }

            Axis {
                name: name.to_string(),
                values,
                original_sequence,
            }
        })
        .collect()
}
