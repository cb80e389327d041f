//! Trial records and their ingestion from model-selection output.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::params::ParamSet;
use crate::value::ParamValue;

/// Name of the raw parameter entry that carries the estimator tag.
pub const ESTIMATOR_KEY: &str = "classifier";

/// One fitted-model evaluation: estimator tag, hyperparameters, held-out score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Tag identifying the fitted estimator, e.g. `"RandomForestClassifier(max_depth=8)"`.
    pub classifier_tag: String,
    /// Swept hyperparameters with their scope prefix already removed.
    pub hyperparameters: ParamSet,
    /// Held-out evaluation score.
    pub score: f64,
}

impl TrialRecord {
    /// Create a trial record.
    pub fn new(classifier_tag: impl Into<String>, hyperparameters: ParamSet, score: f64) -> Self {
        Self {
            classifier_tag: classifier_tag.into(),
            hyperparameters,
            score,
        }
    }

    /// Value this trial took for a hyperparameter.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.hyperparameters.get(name)
    }

    /// Build a record from a raw search result.
    ///
    /// The `classifier` entry becomes the tag. Every key containing `prefix`
    /// is a swept setting; all occurrences of the prefix are removed from its
    /// name. Keys without the prefix belong to other pipeline steps and are
    /// dropped.
    pub fn from_raw(index: usize, raw: RawTrial, prefix: &str) -> Result<Self> {
        let classifier_tag = match raw.params.get(ESTIMATOR_KEY) {
            Some(serde_json::Value::String(tag)) => tag.clone(),
            Some(other) => {
                return Err(CoreError::InvalidTrial {
                    index,
                    reason: format!("'{ESTIMATOR_KEY}' must be a string, got {other}"),
                })
            }
            None => {
                return Err(CoreError::InvalidTrial {
                    index,
                    reason: format!("missing '{ESTIMATOR_KEY}' entry"),
                })
            }
        };

        let mut hyperparameters = ParamSet::new();
        if !prefix.is_empty() {
            for (key, value) in &raw.params {
                if key.contains(prefix) {
                    let name = key.replace(prefix, "");
                    hyperparameters.insert(name.clone(), ParamValue::from_json(&name, value)?);
                }
            }
        }

        Ok(Self {
            classifier_tag,
            hyperparameters,
            score: raw.score,
        })
    }
}

/// A search result before prefix stripping.
///
/// `params` keeps the producer's key order (serde_json is built with
/// `preserve_order`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrial {
    /// Raw parameter mapping, including the `classifier` tag entry.
    pub params: serde_json::Map<String, serde_json::Value>,
    /// Held-out evaluation score.
    pub score: f64,
}

/// One element of a trial file: either already structured or raw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrialInput {
    /// Already-stripped record.
    Record(TrialRecord),
    /// Raw search output.
    Raw(RawTrial),
}

impl TrialInput {
    /// Normalize into a [`TrialRecord`].
    pub fn into_record(self, index: usize, prefix: &str) -> Result<TrialRecord> {
        match self {
            TrialInput::Record(record) => Ok(record),
            TrialInput::Raw(raw) => TrialRecord::from_raw(index, raw, prefix),
        }
    }
}

/// Parse a JSON array of trials from a reader.
pub fn parse_trials<R: Read>(reader: R, prefix: &str) -> Result<Vec<TrialRecord>> {
    let inputs: Vec<TrialInput> = serde_json::from_reader(reader)?;
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| input.into_record(i, prefix))
        .collect()
}

/// Read a JSON trial file.
pub fn read_trials<P: AsRef<Path>>(path: P, prefix: &str) -> Result<Vec<TrialRecord>> {
    let file = File::open(path.as_ref())?;
    parse_trials(BufReader::new(file), prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_strips_prefix() {
        let raw: RawTrial = serde_json::from_str(
            r#"{
                "params": {
                    "scaler": "StandardScaler()",
                    "classifier": "RandomForestClassifier(max_depth=25, n_estimators=5)",
                    "classifier__n_estimators": 5,
                    "classifier__max_depth": 25,
                    "scaler__with_mean": true
                },
                "score": 0.71
            }"#,
        )
        .unwrap();

        let record = TrialRecord::from_raw(0, raw, "classifier__").unwrap();

        assert!(record.classifier_tag.starts_with("RandomForestClassifier"));
        let names: Vec<_> = record.hyperparameters.names().collect();
        assert_eq!(names, vec!["n_estimators", "max_depth"]);
        assert_eq!(record.param("max_depth"), Some(&ParamValue::Int(25)));
        assert_eq!(record.score, 0.71);
    }

    #[test]
    fn test_from_raw_missing_tag() {
        let raw: RawTrial =
            serde_json::from_str(r#"{"params": {"classifier__C": 1.0}, "score": 0.5}"#).unwrap();
        let result = TrialRecord::from_raw(3, raw, "classifier__");
        assert!(matches!(result, Err(CoreError::InvalidTrial { index: 3, .. })));
    }

    #[test]
    fn test_parse_mixed_forms() {
        let json = r#"[
            {"classifier_tag": "SVC()", "hyperparameters": {"C": 0.1}, "score": 0.6},
            {"params": {"classifier": "GaussianNB()"}, "score": 0.93}
        ]"#;

        let trials = parse_trials(json.as_bytes(), "classifier__").unwrap();

        assert_eq!(trials.len(), 2);
        assert_eq!(trials[0].classifier_tag, "SVC()");
        assert_eq!(trials[0].param("C"), Some(&ParamValue::Float(0.1)));
        assert_eq!(trials[1].classifier_tag, "GaussianNB()");
        assert!(trials[1].hyperparameters.is_empty());
    }
}
