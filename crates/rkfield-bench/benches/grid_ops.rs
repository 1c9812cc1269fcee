//! Criterion micro-benchmarks for grid construction, cloning and scans.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rkfield_arena::FieldGrid;
use rkfield_bench::{reference_grid, stress_grid};
use rkfield_core::FieldKind;

/// Benchmark: allocate and default-fill a grid.
fn bench_grid_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_new");
    for side in [100usize, 316, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter(|| black_box(FieldGrid::<f64>::new(side, side)));
        });
    }
    group.finish();
}

/// Benchmark: deep copy of a 10K-cell grid, fresh and into an existing buffer.
fn bench_grid_clone(c: &mut Criterion) {
    let grid = reference_grid(42);
    c.bench_function("grid_clone_10k", |b| {
        b.iter(|| black_box(grid.clone()));
    });

    let mut target = FieldGrid::<f64>::new(100, 100);
    c.bench_function("grid_clone_from_10k", |b| {
        b.iter(|| {
            target.clone_from(&grid);
            black_box(target.potential()[0]);
        });
    });
}

/// Benchmark: finiteness scan and field statistics over ~100K cells.
fn bench_grid_scans(c: &mut Criterion) {
    let grid = stress_grid(7);
    c.bench_function("grid_first_non_finite_100k", |b| {
        b.iter(|| black_box(grid.first_non_finite()));
    });
    c.bench_function("grid_field_stats_100k", |b| {
        b.iter(|| black_box(grid.field_stats(FieldKind::Potential)));
    });
}

criterion_group!(benches, bench_grid_new, bench_grid_clone, bench_grid_scans);
criterion_main!(benches);
