//! Criterion micro-benchmarks for densification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skein_bench::SyntheticRun;
use skein_dense::DenseFrame;
use skein_index::PidIndex;

/// Benchmark: materialize a 1K-step run onto the dense grid.
///
/// Short lifetimes (20 of 1000 steps) make the grid ~50× larger than the
/// ragged source — the shape the size warning in `skein-dense` is about.
fn bench_densify_short_lifetimes(c: &mut Criterion) {
    let run = SyntheticRun::generate(1_000, 10, 20);
    let idx = run.count_index();
    let pid_index = PidIndex::build(&run.pids, &idx);
    c.bench_function("densify_1k_steps_short_lifetimes", |b| {
        b.iter(|| {
            let frame = DenseFrame::densify(black_box(&run.x), &idx, &pid_index, f64::NAN);
            black_box(frame);
        });
    });
}

/// Benchmark: densify a near-dense run (every particle lives the whole
/// run), the layout where the grid and the source are the same size.
fn bench_densify_long_lifetimes(c: &mut Criterion) {
    let run = SyntheticRun::generate(200, 50, 200);
    let idx = run.count_index();
    let pid_index = PidIndex::build(&run.pids, &idx);
    c.bench_function("densify_200_steps_long_lifetimes", |b| {
        b.iter(|| {
            let frame = DenseFrame::densify(black_box(&run.x), &idx, &pid_index, f64::NAN);
            black_box(frame);
        });
    });
}

criterion_group!(
    benches,
    bench_densify_short_lifetimes,
    bench_densify_long_lifetimes
);
criterion_main!(benches);
