//! Criterion benchmarks for decision tree construction

use balance_engine::simulate_optimal_play;
use balance_tree::{build_from_history, DecisionTreeBuilder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_build_from_history(c: &mut Criterion) {
    let history = simulate_optimal_play(4_096, 1_234).unwrap();
    c.bench_function("tree_replay_4096", |b| {
        b.iter(|| black_box(build_from_history(black_box(&history)).unwrap().len()))
    });
}

fn benchmark_build_optimal(c: &mut Criterion) {
    let mut builder = DecisionTreeBuilder::new();
    c.bench_function("tree_build_4096_warm", |b| {
        b.iter(|| black_box(builder.build(black_box(4_096), black_box(4_095)).unwrap().len()))
    });
}

criterion_group!(benches, benchmark_build_from_history, benchmark_build_optimal);
criterion_main!(benches);
