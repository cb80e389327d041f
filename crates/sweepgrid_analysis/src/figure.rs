//! Render-facing labeling metadata for sweep figures.
//!
//! A [`SweepFigure`] is passive data: titles, axis labels, tick labels,
//! formatted annotations and panel layout. Plotting backends draw it; this
//! crate never rasterises anything.

use serde::{Deserialize, Serialize};
use sweepgrid_core::SweepConfig;

use crate::axis::Axis;
use crate::grid::{Cell, SweepGrid};
use crate::sweep::SweepResult;

/// Grid of panel slots in a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Number of slot rows.
    pub rows: usize,
    /// Number of slot columns.
    pub columns: usize,
}

impl PanelLayout {
    /// Layout for `n_panels` panels in at most `columns` columns.
    ///
    /// Rows are `ceil(n / columns)`; a single panel gets a 1x1 layout.
    pub fn for_panels(n_panels: usize, columns: usize) -> Self {
        if n_panels <= 1 {
            return Self { rows: 1, columns: 1 };
        }
        let columns = columns.max(1);
        Self {
            rows: n_panels.div_ceil(columns),
            columns,
        }
    }

    /// Total number of slots.
    pub fn slots(&self) -> usize {
        self.rows * self.columns
    }
}

/// One heatmap (or scalar annotation) inside a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPanel {
    /// Panel title, for panels of a three-axis figure.
    pub title: Option<String>,
    /// Horizontal axis label.
    pub x_label: Option<String>,
    /// Vertical axis label.
    pub y_label: Option<String>,
    /// Column tick labels.
    pub x_ticks: Vec<String>,
    /// Row tick labels (empty for a single strip).
    pub y_ticks: Vec<String>,
    /// Raw scores, rows x columns, `None` where missing.
    pub values: Vec<Vec<Option<f64>>>,
    /// Formatted scores, rows x columns, empty where missing.
    pub annotations: Vec<Vec<String>>,
}

/// Everything a plotting backend needs to draw one algorithm's sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFigure {
    /// Upper-cased algorithm token.
    pub algorithm: String,
    /// Figure title.
    pub title: String,
    /// Conventional image file name.
    pub file_name: String,
    /// Panel slot layout.
    pub layout: PanelLayout,
    /// Panels in reading order.
    pub panels: Vec<HeatmapPanel>,
}

/// Round `score` to `decimals` places and drop trailing zeros, keeping at
/// least one fractional digit: `0.8100` -> `"0.81"`, `1.0` -> `"1.0"`.
pub fn format_score(score: f64, decimals: usize) -> String {
    if !score.is_finite() {
        return score.to_string();
    }
    let mut s = format!("{score:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').len();
        s.truncate(trimmed);
        if s.ends_with('.') {
            s.push('0');
        }
    } else {
        s.push_str(".0");
    }
    s
}

/// Figure title for an algorithm token.
pub fn figure_title(display_token: &str) -> String {
    format!("Test score assessment per parameter sweep with {display_token} algorithm")
}

/// Conventional image file name for an algorithm token.
///
/// Path separators in the token become `_`, so the name always stays a
/// single path component.
pub fn figure_file_name(display_token: &str) -> String {
    let stem: String = display_token
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("Parameter sweep {stem} algorithm.png")
}

fn axis_label(axis: &Axis) -> String {
    format!("Parameter sweep {}", axis.name)
}

fn ticks(axis: &Axis) -> Vec<String> {
    axis.values.iter().map(ToString::to_string).collect()
}

fn annotate(cells: &[Vec<Cell>], decimals: usize) -> (Vec<Vec<Option<f64>>>, Vec<Vec<String>>) {
    let values = cells
        .iter()
        .map(|row| row.iter().map(Cell::score).collect())
        .collect();
    let annotations = cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Found(score) => format_score(*score, decimals),
                    Cell::Missing => String::new(),
                })
                .collect()
        })
        .collect();
    (values, annotations)
}

fn matrix_rows(matrix: &ndarray::Array2<Cell>) -> Vec<Vec<Cell>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn heatmap(
    title: Option<String>,
    row_axis: &Axis,
    col_axis: &Axis,
    cells: &[Vec<Cell>],
    decimals: usize,
) -> HeatmapPanel {
    let (values, annotations) = annotate(cells, decimals);
    HeatmapPanel {
        title,
        x_label: Some(axis_label(col_axis)),
        y_label: Some(axis_label(row_axis)),
        x_ticks: ticks(col_axis),
        y_ticks: ticks(row_axis),
        values,
        annotations,
    }
}

impl SweepFigure {
    /// Build the labeling metadata for a finished sweep.
    pub fn from_result(result: &SweepResult, config: &SweepConfig) -> Self {
        let token = result.display_token();
        let decimals = config.decimals;

        let panels = match &result.grid {
            SweepGrid::Scalar { score } => {
                let (values, annotations) = annotate(&[vec![Cell::Found(*score)]], decimals);
                vec![HeatmapPanel {
                    title: None,
                    x_label: None,
                    y_label: None,
                    x_ticks: Vec::new(),
                    y_ticks: Vec::new(),
                    values,
                    annotations,
                }]
            }
            SweepGrid::Vector { axis, scores } => {
                let (values, annotations) = annotate(&[scores.clone()], decimals);
                vec![HeatmapPanel {
                    title: None,
                    x_label: Some(axis_label(axis)),
                    y_label: None,
                    x_ticks: ticks(axis),
                    y_ticks: Vec::new(),
                    values,
                    annotations,
                }]
            }
            SweepGrid::Matrix {
                row_axis,
                col_axis,
                scores,
            } => vec![heatmap(None, row_axis, col_axis, &matrix_rows(scores), decimals)],
            SweepGrid::PanelStack {
                panel_axis,
                row_axis,
                col_axis,
                panels,
            } => panel_axis
                .values
                .iter()
                .zip(panels)
                .map(|(value, matrix)| {
                    let title = format!("Parameter sweep with fixed {} = {}", panel_axis.name, value);
                    heatmap(Some(title), row_axis, col_axis, &matrix_rows(matrix), decimals)
                })
                .collect(),
        };

        let layout = match &result.grid {
            SweepGrid::PanelStack { .. } => PanelLayout::for_panels(panels.len(), config.panel_columns),
            _ => PanelLayout::for_panels(1, 1),
        };

        Self {
            title: figure_title(&token),
            file_name: figure_file_name(&token),
            algorithm: token,
            layout,
            panels,
        }
    }

    /// Layout slots left empty after placing every panel.
    pub fn spare_slots(&self) -> usize {
        self.layout.slots().saturating_sub(self.panels.len())
    }

    /// Plain-text rendering of every panel.
    pub fn to_string_table(&self) -> String {
        let mut s = String::new();
        s.push_str(&self.title);
        s.push('\n');
        s.push_str(&"=".repeat(self.title.chars().count()));
        s.push('\n');

        for panel in &self.panels {
            s.push('\n');
            if let Some(title) = &panel.title {
                s.push_str(&format!("[{title}]\n"));
            }
            s.push_str(&panel.to_string_table());
        }
        s
    }
}

impl HeatmapPanel {
    /// Plain-text table of this panel: columns are x ticks, rows y ticks.
    pub fn to_string_table(&self) -> String {
        let corner = match (&self.y_label, &self.x_label) {
            (Some(y), Some(x)) => format!("{} \\ {}", strip_label(y), strip_label(x)),
            (None, Some(x)) => strip_label(x).to_string(),
            _ => String::from("score"),
        };

        let width = self
            .x_ticks
            .iter()
            .chain(self.annotations.iter().flatten())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(6)
            + 2;
        let label_width = self
            .y_ticks
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(corner.chars().count()))
            .max()
            .unwrap_or(0);

        let mut s = String::new();
        s.push_str(&format!("{corner:<label_width$}"));
        for tick in &self.x_ticks {
            s.push_str(&format!("{tick:>width$}"));
        }
        s.push('\n');

        for (i, row) in self.annotations.iter().enumerate() {
            let label = self.y_ticks.get(i).map(String::as_str).unwrap_or("");
            s.push_str(&format!("{label:<label_width$}"));
            for cell in row {
                let cell = if cell.is_empty() { "-" } else { cell.as_str() };
                s.push_str(&format!("{cell:>width$}"));
            }
            s.push('\n');
        }
        s
    }
}

fn strip_label(label: &str) -> &str {
    label.strip_prefix("Parameter sweep ").unwrap_or(label)
}
