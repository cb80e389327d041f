//! sweepgrid CLI: aggregate hyperparameter search results into score grids.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sweepgrid_analysis::{
    plan, run_batch, BatchReport, JsonRenderer, SweepError, SweepFigure, SweepRenderer,
    TextRenderer,
};
use sweepgrid_core::{read_trials, MissingCellPolicy, SweepConfig, TrialRecord};

#[derive(Parser)]
#[command(name = "sweepgrid")]
#[command(author, version)]
#[command(about = "Aggregate hyperparameter search results into per-algorithm score grids")]
#[command(long_about = "sweepgrid: turn model-selection trials into score grids ready for heatmaps.

EXAMPLES:
  # Write a demonstration trial file
  sweepgrid sample --output trials.json

  # Inspect the swept axes of one algorithm
  sweepgrid axes --trials trials.json --algorithm forest

  # Render several algorithms as JSON documents
  sweepgrid render --trials trials.json --algorithm tree --algorithm forest --output plots

  # Print text tables, failing on uncovered cells
  sweepgrid render --trials trials.json --algorithm gradient --format text --reject-missing

ALGORITHM LABELS:
  linearsvc, logreg, svm, naive bayes   - well-known aliases
  anything else                         - matched in title or upper case (\"forest\" -> Forest, FOREST)")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate and render one or more algorithms
    Render {
        /// Trial file (JSON array of raw or structured trials)
        #[arg(long, value_name = "FILE")]
        trials: PathBuf,

        /// Algorithm label, repeatable
        #[arg(long = "algorithm", short = 'a', value_name = "LABEL", required = true)]
        algorithms: Vec<String>,

        /// Output directory for rendered documents
        #[arg(long, default_value = ".", value_name = "DIR")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Sweep configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Fail an algorithm when a grid cell has no matching trial
        #[arg(long, default_value = "false")]
        reject_missing: bool,
    },
    /// Show the swept axes and panel dimension of one algorithm
    Axes {
        /// Trial file (JSON array of raw or structured trials)
        #[arg(long, value_name = "FILE")]
        trials: PathBuf,

        /// Algorithm label
        #[arg(long, short = 'a', value_name = "LABEL")]
        algorithm: String,

        /// Sweep configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Write a demonstration trial file
    Sample {
        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON document per algorithm
    Json,
    /// Plain-text tables on stdout
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    match cli.command {
        Commands::Render {
            trials,
            algorithms,
            output,
            format,
            config,
            reject_missing,
        } => handle_render(trials, algorithms, output, format, config, reject_missing),
        Commands::Axes {
            trials,
            algorithm,
            config,
        } => handle_axes(trials, algorithm, config),
        Commands::Sample { output } => handle_sample(output),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SweepConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found at {:?}", path);
            }
            SweepConfig::from_file(&path)
                .with_context(|| format!("Failed to load config {:?}", path))
        }
        None => Ok(SweepConfig::default()),
    }
}

fn load_trials(path: &PathBuf, config: &SweepConfig) -> Result<Vec<TrialRecord>> {
    let trials = read_trials(path, &config.param_prefix)
        .with_context(|| format!("Failed to read trials from {:?}", path))?;
    info!(path = %path.display(), n_trials = trials.len(), "loaded trials");
    Ok(trials)
}

fn handle_render(
    trials: PathBuf,
    algorithms: Vec<String>,
    output: PathBuf,
    format: OutputFormat,
    config: Option<PathBuf>,
    reject_missing: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if reject_missing {
        config = config.with_missing_cells(MissingCellPolicy::Reject);
    }
    let trials = load_trials(&trials, &config)?;

    let report = run_batch(&algorithms, &trials, &config);

    let render_failures = match format {
        OutputFormat::Json => {
            let mut renderer = JsonRenderer::new(&output);
            let failures = render_succeeded(&report, &mut renderer, &config);
            for path in renderer.written() {
                println!("Wrote {}", path.display());
            }
            failures
        }
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new(io::stdout());
            render_succeeded(&report, &mut renderer, &config)
        }
    };

    for (label, err) in report.failed() {
        eprintln!("{label}: {err}");
    }
    for (label, err) in &render_failures {
        eprintln!("{label}: render failed: {err}");
    }

    println!();
    println!("{}", report.summary());
    Ok(())
}

/// Render every successful sweep; a failing algorithm is recorded and skipped.
fn render_succeeded(
    report: &BatchReport,
    renderer: &mut dyn SweepRenderer,
    config: &SweepConfig,
) -> Vec<(String, SweepError)> {
    let mut failures = Vec::new();
    for result in report.succeeded() {
        let figure = SweepFigure::from_result(result, config);
        if let Err(err) = renderer.render(&figure, result) {
            warn!(label = %result.label, error = %err, "render failed");
            failures.push((result.label.clone(), err));
        }
    }
    failures
}

fn handle_axes(trials: PathBuf, algorithm: String, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let trials = load_trials(&trials, &config)?;

    let plan = plan(&algorithm, &trials, &config)
        .with_context(|| format!("Failed to discover axes for '{algorithm}'"))?;

    println!("Algorithm: {} ({} trials)", plan.algorithm.display_token(), plan.n_trials);
    println!("─────────────────────────────────────────");
    if plan.axes.is_empty() {
        println!("  no swept hyperparameters");
    }
    for (i, axis) in plan.axes.iter().enumerate() {
        let values: Vec<String> = axis.values.iter().map(ToString::to_string).collect();
        let marker = if plan.panel == Some(i) { "  [panel]" } else { "" };
        println!(
            "  {:<24} {:>3} values: {}{}",
            axis.name,
            axis.cardinality(),
            values.join(", "),
            marker
        );
    }
    Ok(())
}

fn handle_sample(output: Option<PathBuf>) -> Result<()> {
    let trials = sample_trials();
    let json = serde_json::to_string_pretty(&trials).context("Failed to serialize sample trials")?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote {} sample trials to {}", trials.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn raw_trial(tag: &str, params: Value, score: f64) -> Value {
    let mut entries = serde_json::Map::new();
    entries.insert("classifier".to_string(), Value::String(tag.to_string()));
    if let Value::Object(params) = params {
        for (name, value) in params {
            entries.insert(format!("classifier__{name}"), value);
        }
    }
    json!({ "params": entries, "score": score })
}

/// Trials shaped like a typical cardiovascular-dataset model selection run.
fn sample_trials() -> Vec<Value> {
    vec![
        raw_trial("KNeighborsClassifier(n_neighbors=2)", json!({"n_neighbors": 2}), 0.6512),
        raw_trial("KNeighborsClassifier(n_neighbors=7)", json!({"n_neighbors": 7}), 0.6934),
        raw_trial("KNeighborsClassifier(n_neighbors=25)", json!({"n_neighbors": 25}), 0.7103),
        raw_trial("LinearSVC(C=0.01)", json!({"C": 0.01}), 0.7241),
        raw_trial("LinearSVC(C=1000)", json!({"C": 1000}), 0.6877),
        raw_trial("LogisticRegression(C=0.01)", json!({"C": 0.01}), 0.7236),
        raw_trial("LogisticRegression(C=1000)", json!({"C": 1000}), 0.7229),
        raw_trial("GaussianNB()", json!({}), 0.7012),
        raw_trial("DecisionTreeClassifier(max_depth=25)", json!({"max_depth": 25}), 0.6345),
        raw_trial("DecisionTreeClassifier(max_depth=5)", json!({"max_depth": 5}), 0.7318),
        raw_trial(
            "RandomForestClassifier(max_depth=25, max_features=11, n_estimators=5)",
            json!({"n_estimators": 5, "max_features": 11, "max_depth": 25}),
            0.6812,
        ),
        raw_trial(
            "RandomForestClassifier(max_depth=25, max_features=4, n_estimators=5)",
            json!({"n_estimators": 5, "max_features": 4, "max_depth": 25}),
            0.6855,
        ),
        raw_trial(
            "RandomForestClassifier(max_depth=25, max_features=4, n_estimators=100)",
            json!({"n_estimators": 100, "max_features": 4, "max_depth": 25}),
            0.7064,
        ),
        raw_trial(
            "RandomForestClassifier(max_depth=8, max_features=4, n_estimators=100)",
            json!({"n_estimators": 100, "max_features": 4, "max_depth": 8}),
            0.7342,
        ),
        raw_trial(
            "RandomForestClassifier(max_depth=8, max_features=4, n_estimators=200)",
            json!({"n_estimators": 200, "max_features": 4, "max_depth": 8}),
            0.7351,
        ),
        raw_trial(
            "GradientBoostingClassifier(learning_rate=1, max_depth=4, n_estimators=500)",
            json!({"n_estimators": 500, "learning_rate": 1, "max_depth": 4}),
            0.7098,
        ),
        raw_trial(
            "GradientBoostingClassifier(learning_rate=1, max_depth=4, n_estimators=25)",
            json!({"n_estimators": 25, "learning_rate": 1, "max_depth": 4}),
            0.7287,
        ),
        raw_trial(
            "GradientBoostingClassifier(learning_rate=0.2, max_depth=4, n_estimators=25)",
            json!({"n_estimators": 25, "learning_rate": 0.2, "max_depth": 4}),
            0.7356,
        ),
        raw_trial(
            "MLPClassifier(activation='tanh', alpha=0.01, hidden_layer_sizes=[50, 50])",
            json!({"activation": "tanh", "alpha": 0.01, "hidden_layer_sizes": [50, 50]}),
            0.7302,
        ),
        raw_trial(
            "MLPClassifier(activation='tanh', alpha=0.01, hidden_layer_sizes=100)",
            json!({"activation": "tanh", "alpha": 0.01, "hidden_layer_sizes": 100}),
            0.7311,
        ),
        raw_trial(
            "MLPClassifier(activation='tanh', alpha=10, hidden_layer_sizes=100)",
            json!({"activation": "tanh", "alpha": 10, "hidden_layer_sizes": 100}),
            0.7254,
        ),
        raw_trial(
            "SVC(C=0.1, gamma=1)",
            json!({"kernel": "rbf", "C": 0.1, "gamma": 1}),
            0.7019,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepgrid_analysis::{sweep, SweepResult};
    use sweepgrid_core::parse_trials;

    fn sample_records() -> Vec<TrialRecord> {
        let json = serde_json::to_string(&sample_trials()).unwrap();
        parse_trials(json.as_bytes(), "classifier__").unwrap()
    }

    #[test]
    fn test_sample_trials_parse() {
        let trials = sample_records();
        assert_eq!(trials.len(), 22);
        assert_eq!(trials[0].classifier_tag, "KNeighborsClassifier(n_neighbors=2)");
        assert!(trials[0].param("n_neighbors").is_some());
    }

    #[test]
    fn test_sample_forest_is_panel_stack() {
        let result = sweep("forest", &sample_records(), &SweepConfig::default()).unwrap();
        assert_eq!(result.grid.kind(), "panel_stack");
        assert_eq!(result.n_trials, 5);
    }

    /// Fails on one label and records every label it was asked to render.
    struct FlakyRenderer {
        fail_on: &'static str,
        rendered: Vec<String>,
    }

    impl SweepRenderer for FlakyRenderer {
        fn render(&mut self, _figure: &SweepFigure, result: &SweepResult) -> sweepgrid_analysis::Result<()> {
            self.rendered.push(result.label.clone());
            if result.label == self.fail_on {
                return Err(SweepError::IoError(io::Error::new(io::ErrorKind::Other, "disk full")));
            }
            Ok(())
        }
    }

    #[test]
    fn test_render_failure_does_not_stop_other_algorithms() {
        let trials = sample_records();
        let config = SweepConfig::default().with_parallel(false);
        let report = run_batch(&["tree", "forest", "gradient"], &trials, &config);
        assert_eq!(report.n_succeeded(), 3);

        let mut renderer = FlakyRenderer { fail_on: "tree", rendered: Vec::new() };
        let failures = render_succeeded(&report, &mut renderer, &config);

        assert_eq!(renderer.rendered, vec!["tree", "forest", "gradient"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "tree");
        assert!(matches!(failures[0].1, SweepError::IoError(_)));
    }

    #[test]
    fn test_json_render_reports_written_paths() {
        let dir = std::env::temp_dir().join(format!("sweepgrid_cli_{}", std::process::id()));
        let trials = vec![TrialRecord::new("Rbf/LinearKernel()", sweepgrid_core::ParamSet::new(), 0.5)];
        let config = SweepConfig::default();
        let report = run_batch(&["rbf/linear"], &trials, &config);

        let mut renderer = JsonRenderer::new(&dir);
        let failures = render_succeeded(&report, &mut renderer, &config);

        assert!(failures.is_empty());
        assert_eq!(
            renderer.written(),
            &[dir.join("Parameter sweep RBF_LINEAR algorithm.json")]
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cli_parses_repeated_algorithms() {
        let cli = Cli::parse_from([
            "sweepgrid", "-vv", "render", "--trials", "t.json", "-a", "tree", "-a", "forest",
            "--format", "text",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render { algorithms, format, .. } => {
                assert_eq!(algorithms, vec!["tree", "forest"]);
                assert!(matches!(format, OutputFormat::Text));
            }
            _ => panic!("expected render"),
        }
    }
}
