//! Benchmarks for sweep aggregation.
//!
//! Run with: cargo bench --bench sweep_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use sweepgrid::prelude::*;

const TAGS: &[&str] = &[
    "RandomForestClassifier()",
    "GradientBoostingClassifier()",
    "DecisionTreeClassifier()",
    "MLPClassifier()",
];

/// Create a synthetic trial set with `n_axes` swept parameters per tag.
fn create_synthetic_trials(n_trials: usize, n_axes: usize, cardinality: i64) -> Vec<TrialRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let names = ["n_estimators", "max_depth", "max_features"];

    (0..n_trials)
        .map(|i| {
            let params = names[..n_axes]
                .iter()
                .map(|name| (*name, ParamValue::Int(rng.gen_range(0..cardinality))))
                .collect::<ParamSet>();
            TrialRecord::new(TAGS[i % TAGS.len()], params, rng.gen::<f64>())
        })
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    let config = SweepConfig::default();

    for n_axes in [1, 2, 3] {
        let trials = create_synthetic_trials(2_000, n_axes, 8);
        group.bench_with_input(BenchmarkId::new("forest", n_axes), &trials, |b, trials| {
            b.iter(|| {
                let result = sweep("forest", black_box(trials), &config);
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let labels = ["forest", "gradient", "tree", "mlp"];
    let trials = create_synthetic_trials(4_000, 3, 6);

    for parallel in [false, true] {
        let config = SweepConfig::default().with_parallel(parallel);
        group.bench_with_input(
            BenchmarkId::new("run_batch", if parallel { "parallel" } else { "sequential" }),
            &trials,
            |b, trials| {
                b.iter(|| {
                    let report = run_batch(&labels, black_box(trials), &config);
                    black_box(report.n_succeeded())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sweep, bench_batch);
criterion_main!(benches);
