//! Benchmark profiles for the rkfield kernels.
//!
//! - [`reference_grid`]: 100x100 grid (10K cells)
//! - [`stress_grid`]: 316x316 grid (~100K cells)
//! - [`warmed_solver`]: a solver whose scratch already matches a grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rkfield_arena::FieldGrid;
use rkfield_solver::{Derivative, Rk4Solver};
use rkfield_test_utils::seeded_grid;

/// Timestep used by every solver benchmark.
pub const BENCH_DT: f64 = 0.01;

/// Seeded 100x100 grid (10K cells).
pub fn reference_grid(seed: u64) -> FieldGrid<f64> {
    seeded_grid(100, 100, seed)
}

/// Seeded 316x316 grid (~100K cells).
pub fn stress_grid(seed: u64) -> FieldGrid<f64> {
    seeded_grid(316, 316, seed)
}

/// A solver around `kernel` that has already taken one step on a
/// grid shaped like `grid`, so timed steps never reallocate.
///
/// # Panics
///
/// Panics if the warm-up step fails.
pub fn warmed_solver<K: Derivative<f64>>(kernel: K, grid: &FieldGrid<f64>) -> Rk4Solver<f64, K> {
    let mut solver = Rk4Solver::with_kernel(kernel);
    let mut probe = grid.clone();
    solver
        .step(&mut probe, BENCH_DT)
        .expect("warm-up step on an existing grid shape");
    solver
}
