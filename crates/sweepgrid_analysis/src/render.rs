//! Renderer seam for finished sweeps.
//!
//! Plotting backends implement [`SweepRenderer`]. Two renderers ship here:
//! [`JsonRenderer`] writes one document per algorithm and [`TextRenderer`]
//! prints the plain-text tables.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::figure::SweepFigure;
use crate::sweep::SweepResult;

/// Consumes a sweep and its labeling metadata.
pub trait SweepRenderer {
    /// Render one algorithm's sweep.
    fn render(&mut self, figure: &SweepFigure, result: &SweepResult) -> Result<()>;
}

#[derive(Serialize)]
struct RenderedSweep<'a> {
    figure: &'a SweepFigure,
    result: &'a SweepResult,
}

/// Writes `Parameter sweep {TOKEN} algorithm.json` per sweep into a directory.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    output_dir: PathBuf,
    pretty: bool,
    written: Vec<PathBuf>,
}

impl JsonRenderer {
    /// Create a renderer writing into `output_dir`, created on first use.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            pretty: true,
            written: Vec::new(),
        }
    }

    /// Toggle pretty-printed output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Output path for a figure.
    pub fn path_for(&self, figure: &SweepFigure) -> PathBuf {
        self.output_dir
            .join(Path::new(&figure.file_name).with_extension("json"))
    }

    /// Files written so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SweepRenderer for JsonRenderer {
    fn render(&mut self, figure: &SweepFigure, result: &SweepResult) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(figure);
        let doc = RenderedSweep { figure, result };
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        fs::write(&path, json)?;
        info!(path = %path.display(), "wrote sweep document");
        self.written.push(path);
        Ok(())
    }
}

/// Writes each figure's text table to a writer.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    /// Create a renderer over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SweepRenderer for TextRenderer<W> {
    fn render(&mut self, figure: &SweepFigure, result: &SweepResult) -> Result<()> {
        writeln!(self.writer, "{}", figure.to_string_table())?;
        for coordinate in &result.unresolved {
            writeln!(self.writer, "  no trial for {coordinate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::sweep;
    use sweepgrid_core::{ParamSet, SweepConfig, TrialRecord};

    fn result() -> (SweepFigure, SweepResult) {
        let trials = vec![
            TrialRecord::new("MLPClassifier()", ParamSet::new().with("a", 1).with("b", 1), 0.6),
            TrialRecord::new("MLPClassifier()", ParamSet::new().with("a", 2).with("b", 2), 0.7),
        ];
        let config = SweepConfig::default();
        let result = sweep("mlp", &trials, &config).unwrap();
        (SweepFigure::from_result(&result, &config), result)
    }

    #[test]
    fn test_text_renderer() {
        let (figure, result) = result();
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&figure, &result).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("Test score assessment per parameter sweep with MLP algorithm"));
        assert!(text.contains("no trial for a=1, b=2"));
    }

    #[test]
    fn test_json_renderer_writes_file() {
        let dir = std::env::temp_dir().join(format!("sweepgrid_render_{}", std::process::id()));
        let (figure, result) = result();

        let mut renderer = JsonRenderer::new(&dir);
        renderer.render(&figure, &result).unwrap();

        let path = dir.join("Parameter sweep MLP algorithm.json");
        assert_eq!(renderer.written(), &[path.clone()]);

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["figure"]["algorithm"], "MLP");
        assert_eq!(doc["result"]["grid"]["kind"], "matrix");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_renderer_keeps_slashed_labels_in_output_dir() {
        let dir = std::env::temp_dir().join(format!("sweepgrid_slash_{}", std::process::id()));
        let trials = vec![TrialRecord::new("Rbf/LinearKernel()", ParamSet::new(), 0.55)];
        let config = SweepConfig::default();
        let result = sweep("rbf/linear", &trials, &config).unwrap();
        let figure = SweepFigure::from_result(&result, &config);

        let mut renderer = JsonRenderer::new(&dir);
        renderer.render(&figure, &result).unwrap();

        let path = dir.join("Parameter sweep RBF_LINEAR algorithm.json");
        assert_eq!(renderer.written(), &[path.clone()]);
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
