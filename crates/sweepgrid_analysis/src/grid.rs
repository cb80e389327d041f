//! Score grids and coordinate resolution.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use sweepgrid_core::{ParamValue, TrialRecord, MAX_SUPPORTED_AXES};
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::axis::Axis;
use crate::error::{Result, SweepError};
use crate::selector::select_dimensions;

/// The score at one grid coordinate.
///
/// Serialized as the bare score, or `null` when missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Score of the first trial matching the coordinate exactly.
    Found(f64),
    /// No trial matches the coordinate.
    Missing,
}

impl Cell {
    /// The score, if resolved.
    pub fn score(&self) -> Option<f64> {
        match self {
            Cell::Found(score) => Some(*score),
            Cell::Missing => None,
        }
    }

    /// Check if no trial matched.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

/// A grid coordinate as `(axis name, value)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub Vec<(String, ParamValue)>);

impl Coordinate {
    fn from_pairs(pairs: &[(&Axis, &ParamValue)]) -> Self {
        Coordinate(
            pairs
                .iter()
                .map(|(axis, value)| (axis.name.clone(), (*value).clone()))
                .collect(),
        )
    }

    /// Value of the named axis at this coordinate.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Resolved scores, shaped by the number of swept axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepGrid {
    /// Nothing swept: the single trial's score.
    Scalar {
        /// The score.
        score: f64,
    },
    /// One swept axis.
    Vector {
        /// The swept axis.
        axis: Axis,
        /// One cell per axis value.
        scores: Vec<Cell>,
    },
    /// Two swept axes.
    Matrix {
        /// First discovered axis, indexing rows.
        row_axis: Axis,
        /// Second discovered axis, indexing columns.
        col_axis: Axis,
        /// `row_axis.values.len()` x `col_axis.values.len()` cells.
        scores: Array2<Cell>,
    },
    /// Three swept axes: one matrix per panel value.
    PanelStack {
        /// Axis held fixed per panel.
        panel_axis: Axis,
        /// Axis indexing rows of every panel.
        row_axis: Axis,
        /// Axis indexing columns of every panel.
        col_axis: Axis,
        /// One matrix per `panel_axis` value, in value order.
        panels: Vec<Array2<Cell>>,
    },
}

impl SweepGrid {
    /// Short name of the grid shape.
    pub fn kind(&self) -> &'static str {
        match self {
            SweepGrid::Scalar { .. } => "scalar",
            SweepGrid::Vector { .. } => "vector",
            SweepGrid::Matrix { .. } => "matrix",
            SweepGrid::PanelStack { .. } => "panel_stack",
        }
    }

    /// Number of swept axes.
    pub fn n_axes(&self) -> usize {
        match self {
            SweepGrid::Scalar { .. } => 0,
            SweepGrid::Vector { .. } => 1,
            SweepGrid::Matrix { .. } => 2,
            SweepGrid::PanelStack { .. } => 3,
        }
    }

    /// Grid dimensions, outermost first (panels, rows, columns).
    pub fn shape(&self) -> Vec<usize> {
        match self {
            SweepGrid::Scalar { .. } => Vec::new(),
            SweepGrid::Vector { scores, .. } => vec![scores.len()],
            SweepGrid::Matrix { scores, .. } => {
                let (rows, cols) = scores.dim();
                vec![rows, cols]
            }
            SweepGrid::PanelStack {
                panel_axis,
                row_axis,
                col_axis,
                ..
            } => vec![
                panel_axis.cardinality(),
                row_axis.cardinality(),
                col_axis.cardinality(),
            ],
        }
    }

    /// Axes in the order they index the grid.
    pub fn axes(&self) -> Vec<&Axis> {
        match self {
            SweepGrid::Scalar { .. } => Vec::new(),
            SweepGrid::Vector { axis, .. } => vec![axis],
            SweepGrid::Matrix {
                row_axis, col_axis, ..
            } => vec![row_axis, col_axis],
            SweepGrid::PanelStack {
                panel_axis,
                row_axis,
                col_axis,
                ..
            } => vec![panel_axis, row_axis, col_axis],
        }
    }

    /// Coordinates of every cell no trial covers.
    pub fn unresolved(&self) -> Vec<Coordinate> {
        match self {
            SweepGrid::Scalar { .. } => Vec::new(),
            SweepGrid::Vector { axis, scores } => scores
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_missing())
                .map(|(i, _)| Coordinate::from_pairs(&[(axis, &axis.values[i])]))
                .collect(),
            SweepGrid::Matrix {
                row_axis,
                col_axis,
                scores,
            } => scores
                .indexed_iter()
                .filter(|(_, cell)| cell.is_missing())
                .map(|((r, c), _)| {
                    Coordinate::from_pairs(&[
                        (row_axis, &row_axis.values[r]),
                        (col_axis, &col_axis.values[c]),
                    ])
                })
                .collect(),
            SweepGrid::PanelStack {
                panel_axis,
                row_axis,
                col_axis,
                panels,
            } => panels
                .iter()
                .enumerate()
                .flat_map(|(p, matrix)| {
                    matrix
                        .indexed_iter()
                        .filter(|(_, cell)| cell.is_missing())
                        .map(move |((r, c), _)| {
                            Coordinate::from_pairs(&[
                                (panel_axis, &panel_axis.values[p]),
                                (row_axis, &row_axis.values[r]),
                                (col_axis, &col_axis.values[c]),
                            ])
                        })
                })
                .collect(),
        }
    }

    /// Number of resolved cells.
    pub fn resolved_count(&self) -> usize {
        match self {
            SweepGrid::Scalar { .. } => 1,
            SweepGrid::Vector { scores, .. } => scores.iter().filter(|c| !c.is_missing()).count(),
            SweepGrid::Matrix { scores, .. } => scores.iter().filter(|c| !c.is_missing()).count(),
            SweepGrid::PanelStack { panels, .. } => panels
                .iter()
                .map(|m| m.iter().filter(|c| !c.is_missing()).count())
                .sum(),
        }
    }
}

/// Score of the first candidate trial whose values equal every constraint.
///
/// `candidates` are indices into `trials` (and into each axis's
/// `original_sequence`), scanned in order.
pub fn lookup(
    trials: &[&TrialRecord],
    constraints: &[(&Axis, &ParamValue)],
    candidates: &[usize],
) -> Cell {
    candidates
        .iter()
        .copied()
        .find(|&i| {
            constraints
                .iter()
                .all(|(axis, value)| axis.value_at(i) == Some(*value))
        })
        .map(|i| Cell::Found(trials[i].score))
        .unwrap_or(Cell::Missing)
}

/// Build the grid for one algorithm's filtered trials and discovered axes.
///
/// Cells are resolved by exact match, first trial wins. Cells without a
/// matching trial are left [`Cell::Missing`]; what to do about them is the
/// caller's decision. In a panel stack each panel only considers trials that
/// carry that panel's value.
pub fn build_grid(algorithm: &Algorithm, trials: &[&TrialRecord], axes: Vec<Axis>) -> Result<SweepGrid> {
    if trials.is_empty() {
        return Err(SweepError::NoTrialsMatched {
            algorithm: algorithm.token().to_string(),
        });
    }
    if axes.len() > MAX_SUPPORTED_AXES {
        return Err(SweepError::TooManyAxes {
            algorithm: algorithm.token().to_string(),
            found: axes.len(),
            max: MAX_SUPPORTED_AXES,
            names: axes.iter().map(|a| a.name.clone()).collect(),
        });
    }

    let all: Vec<usize> = (0..trials.len()).collect();
    let mut axes = axes.into_iter();

    let grid = match (axes.next(), axes.next(), axes.next()) {
        (None, _, _) => {
            if trials.len() != 1 {
                return Err(SweepError::AmbiguousScalar {
                    algorithm: algorithm.token().to_string(),
                    count: trials.len(),
                });
            }
            SweepGrid::Scalar {
                score: trials[0].score,
            }
        }
        (Some(axis), None, _) => {
            let scores = axis
                .values
                .iter()
                .map(|value| lookup(trials, &[(&axis, value)], &all))
                .collect();
            SweepGrid::Vector { axis, scores }
        }
        (Some(row_axis), Some(col_axis), None) => {
            let scores = resolve_matrix(trials, &row_axis, &col_axis, None, &all);
            SweepGrid::Matrix {
                row_axis,
                col_axis,
                scores,
            }
        }
        (Some(a), Some(b), Some(c)) => {
            let selection = select_dimensions([a, b, c]);
            debug!(
                algorithm = %algorithm,
                panel = %selection.panel.name,
                x = %selection.x.name,
                y = %selection.y.name,
                "selected panel dimension"
            );

            let panels = selection
                .panel
                .values
                .iter()
                .map(|panel_value| {
                    let members: Vec<usize> = all
                        .iter()
                        .copied()
                        .filter(|&i| selection.panel.value_at(i) == Some(panel_value))
                        .collect();
                    resolve_matrix(
                        trials,
                        &selection.y,
                        &selection.x,
                        Some((&selection.panel, panel_value)),
                        &members,
                    )
                })
                .collect();

            SweepGrid::PanelStack {
                panel_axis: selection.panel,
                row_axis: selection.y,
                col_axis: selection.x,
                panels,
            }
        }
    };

    debug!(
        algorithm = %algorithm,
        kind = grid.kind(),
        shape = ?grid.shape(),
        "built sweep grid"
    );
    Ok(grid)
}

fn resolve_matrix(
    trials: &[&TrialRecord],
    row_axis: &Axis,
    col_axis: &Axis,
    fixed: Option<(&Axis, &ParamValue)>,
    candidates: &[usize],
) -> Array2<Cell> {
    Array2::from_shape_fn(
        (row_axis.cardinality(), col_axis.cardinality()),
        |(r, c)| {
            let mut constraints = vec![
                (row_axis, &row_axis.values[r]),
                (col_axis, &col_axis.values[c]),
            ];
            if let Some(fixed) = fixed {
                constraints.push(fixed);
            }
            lookup(trials, &constraints, candidates)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::extract_axes;
    use sweepgrid_core::ParamSet;

    fn build(trials: &[TrialRecord]) -> Result<SweepGrid> {
        let refs: Vec<&TrialRecord> = trials.iter().collect();
        let axes = extract_axes(&refs);
        build_grid(&Algorithm::normalize("forest"), &refs, axes)
    }

    fn trial(params: ParamSet, score: f64) -> TrialRecord {
        TrialRecord::new("RandomForestClassifier()", params, score)
    }

    #[test]
    fn test_scalar() {
        let grid = build(&[trial(ParamSet::new(), 0.93)]).unwrap();
        assert_eq!(grid, SweepGrid::Scalar { score: 0.93 });
        assert!(grid.shape().is_empty());
    }

    #[test]
    fn test_scalar_requires_single_trial() {
        let result = build(&[trial(ParamSet::new(), 0.9), trial(ParamSet::new(), 0.8)]);
        assert!(matches!(result, Err(SweepError::AmbiguousScalar { count: 2, .. })));
    }

    #[test]
    fn test_vector_first_match_wins() {
        let grid = build(&[
            trial(ParamSet::new().with("max_depth", 5), 0.81),
            trial(ParamSet::new().with("max_depth", 25), 0.77),
            trial(ParamSet::new().with("max_depth", 5), 0.50),
        ])
        .unwrap();

        match grid {
            SweepGrid::Vector { axis, scores } => {
                assert_eq!(axis.values, vec![ParamValue::Int(5), ParamValue::Int(25)]);
                assert_eq!(scores, vec![Cell::Found(0.81), Cell::Found(0.77)]);
            }
            other => panic!("expected vector, got {}", other.kind()),
        }
    }

    #[test]
    fn test_matrix_marks_missing_cells() {
        let grid = build(&[
            trial(ParamSet::new().with("a", 1).with("b", 10), 0.1),
            trial(ParamSet::new().with("a", 2).with("b", 20), 0.2),
        ])
        .unwrap();

        assert_eq!(grid.shape(), vec![2, 2]);
        assert_eq!(grid.resolved_count(), 2);

        let unresolved = grid.unresolved();
        assert_eq!(unresolved.len(), 2);
        assert_eq!(unresolved[0].get("a"), Some(&ParamValue::Int(1)));
        assert_eq!(unresolved[0].get("b"), Some(&ParamValue::Int(20)));
        assert_eq!(unresolved[0].to_string(), "a=1, b=20");
    }

    #[test]
    fn test_panel_lookup_restricted_to_panel() {
        // "p" has the fewest values and becomes the panel axis.
        let trials = vec![
            trial(ParamSet::new().with("x", 1).with("y", 1).with("p", 0), 0.1),
            trial(ParamSet::new().with("x", 2).with("y", 2).with("p", 0), 0.2),
            trial(ParamSet::new().with("x", 3).with("y", 3).with("p", 1), 0.3),
        ];
        let grid = build(&trials).unwrap();

        match &grid {
            SweepGrid::PanelStack {
                panel_axis,
                row_axis,
                col_axis,
                panels,
            } => {
                assert_eq!(panel_axis.name, "p");
                assert_eq!(col_axis.name, "x");
                assert_eq!(row_axis.name, "y");
                assert_eq!(panels.len(), 2);
                assert_eq!(panels[0][[0, 0]], Cell::Found(0.1));
                assert_eq!(panels[0][[1, 1]], Cell::Found(0.2));
                assert_eq!(panels[0][[2, 2]], Cell::Missing);
                assert_eq!(panels[1][[2, 2]], Cell::Found(0.3));
                assert_eq!(panels[1][[0, 0]], Cell::Missing);
            }
            other => panic!("expected panel stack, got {}", other.kind()),
        }
        assert_eq!(grid.shape(), vec![2, 3, 3]);
    }

    #[test]
    fn test_too_many_axes_rejected() {
        let params = ParamSet::new().with("a", 1).with("b", 2).with("c", 3).with("d", 4);
        let result = build(&[trial(params, 0.5)]);
        match result {
            Err(SweepError::TooManyAxes { found, max, names, .. }) => {
                assert_eq!(found, 4);
                assert_eq!(max, 3);
                assert_eq!(names, vec!["a", "b", "c", "d"]);
            }
            other => panic!("expected TooManyAxes, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_trials() {
        let result = build(&[]);
        assert!(matches!(result, Err(SweepError::NoTrialsMatched { .. })));
    }

    #[test]
    fn test_cell_serializes_as_number_or_null() {
        let json = serde_json::to_string(&vec![Cell::Found(0.5), Cell::Missing]).unwrap();
        assert_eq!(json, "[0.5,null]");
    }
}
