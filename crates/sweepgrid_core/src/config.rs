//! Sweep aggregation configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Largest number of swept axes any grid shape can hold (a stack of matrices).
pub const MAX_SUPPORTED_AXES: usize = 3;

/// What to do with a grid cell that no trial covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingCellPolicy {
    /// Keep the cell as `Missing`, report it, render it blank.
    #[default]
    Blank,
    /// Fail the algorithm with an unresolved-coordinate error.
    Reject,
}

/// Configuration for sweep aggregation and figure labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Scope prefix that marks a raw parameter key as a swept setting.
    pub param_prefix: String,
    /// Maximum number of swept axes accepted (at most [`MAX_SUPPORTED_AXES`]).
    pub max_axes: usize,
    /// Policy for cells with no matching trial.
    pub missing_cells: MissingCellPolicy,
    /// Columns in the panel layout of a three-axis figure.
    pub panel_columns: usize,
    /// Decimal places for score annotations.
    pub decimals: usize,
    /// Process algorithms of a batch in parallel.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            param_prefix: "classifier__".to_string(),
            max_axes: MAX_SUPPORTED_AXES,
            missing_cells: MissingCellPolicy::Blank,
            panel_columns: 2,
            decimals: 4,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the parameter scope prefix.
    pub fn with_param_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.param_prefix = prefix.into();
        self
    }

    /// Set the maximum number of axes.
    pub fn with_max_axes(mut self, max_axes: usize) -> Self {
        self.max_axes = max_axes;
        self
    }

    /// Set the missing-cell policy.
    pub fn with_missing_cells(mut self, policy: MissingCellPolicy) -> Self {
        self.missing_cells = policy;
        self
    }

    /// Set the number of panel columns.
    pub fn with_panel_columns(mut self, columns: usize) -> Self {
        self.panel_columns = columns;
        self
    }

    /// Set the annotation precision.
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective axis limit, never above [`MAX_SUPPORTED_AXES`].
    pub fn axis_limit(&self) -> usize {
        self.max_axes.min(MAX_SUPPORTED_AXES)
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.param_prefix.is_empty() {
            return Err(CoreError::InvalidConfig(
                "param_prefix must not be empty".to_string(),
            ));
        }
        if self.panel_columns == 0 {
            return Err(CoreError::InvalidConfig(
                "panel_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.param_prefix, "classifier__");
        assert_eq!(config.axis_limit(), 3);
        assert_eq!(config.missing_cells, MissingCellPolicy::Blank);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_axis_limit_is_clamped() {
        let config = SweepConfig::new().with_max_axes(7);
        assert_eq!(config.axis_limit(), MAX_SUPPORTED_AXES);

        let config = SweepConfig::new().with_max_axes(1);
        assert_eq!(config.axis_limit(), 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SweepConfig =
            serde_json::from_str(r#"{"missing_cells": "reject", "decimals": 2}"#).unwrap();
        assert_eq!(config.missing_cells, MissingCellPolicy::Reject);
        assert_eq!(config.decimals, 2);
        assert_eq!(config.panel_columns, 2);
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        let config = SweepConfig::new().with_panel_columns(0);
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }
}
