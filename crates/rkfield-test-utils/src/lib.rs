//! Test utilities for rkfield development.
//!
//! Provides fixture [`Derivative`](rkfield_solver::Derivative) kernels
//! with known analytic solutions and deterministic grid builders for
//! property tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rkfield_arena::FieldGrid;
use rkfield_core::FieldKind;

pub use fixtures::{ConstantRate, LinearDecay, PoisonKernel, ZeroDerivative};

/// Uniform sample in `[0, 1)` with 53 bits of precision.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// A `width x height` grid with reproducible pseudo-random active cells.
///
/// Ranges: potential, vx and vy in `[-1, 1)`; mass in `[0.5, 1.5)`;
/// friction in `[0, 0.2)`; pressure in `[0, 1)`. Padding keeps the
/// construction defaults. Equal seeds give equal grids.
pub fn seeded_grid(width: usize, height: usize, seed: u64) -> FieldGrid<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = FieldGrid::new(width, height);
    let n = grid.active_size();
    for kind in FieldKind::ALL {
        let (lo, span) = match kind {
            FieldKind::Potential | FieldKind::Vx | FieldKind::Vy => (-1.0, 2.0),
            FieldKind::Mass => (0.5, 1.0),
            FieldKind::Friction => (0.0, 0.2),
            FieldKind::Pressure => (0.0, 1.0),
        };
        for v in &mut grid.field_mut(kind)[..n] {
            *v = lo + span * unit(&mut rng);
        }
    }
    grid
}

/// [`seeded_grid`] narrowed to `f32`.
pub fn seeded_grid_f32(width: usize, height: usize, seed: u64) -> FieldGrid<f32> {
    let wide = seeded_grid(width, height, seed);
    let mut grid = FieldGrid::new(width, height);
    let n = grid.active_size();
    for kind in FieldKind::ALL {
        for (d, &s) in grid.field_mut(kind)[..n].iter_mut().zip(wide.active(kind)) {
            *d = s as f32;
        }
    }
    grid
}

/// Set a random subset of status bits, each with probability `density`.
pub fn scatter_status<R: rkfield_core::Real>(grid: &mut FieldGrid<R>, density: f64, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in 0..grid.active_size() {
        grid.set_state(i, unit(&mut rng) < density);
    }
}
