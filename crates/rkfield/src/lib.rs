//! rkfield: aligned structure-of-arrays field grids with an RK4 integrator.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the rkfield sub-crates. For most users, adding `rkfield` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rkfield::prelude::*;
//!
//! let mut grid = FieldGrid::<f64>::new(4, 4);
//! grid.set(FieldKind::Potential, 0, 0, 10.0).unwrap();
//!
//! let mut solver = Rk4Solver::new();
//! let stats = solver.step(&mut grid, 0.01).unwrap();
//! assert!(stats.reallocated);
//! assert_eq!(stats.cells, 16);
//!
//! // The first stage sees zero velocity, so it leaves the potential alone.
//! assert_eq!(solver.stages()[0].potential()[0], 0.0);
//! assert!((grid.potential()[0] - 10.0).abs() < 1e-2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rkfield-core` | `Real`, `FieldKind`, `StatusBits` |
//! | [`arena`] | `rkfield-arena` | `FieldGrid`, layout arithmetic, field views |
//! | [`solver`] | `rkfield-solver` | `Rk4Solver`, the `Derivative` trait, stage kernels |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Precision, field identifiers and status bits (`rkfield-core`).
pub use rkfield_core as types;

/// Aligned field storage (`rkfield-arena`).
///
/// [`arena::FieldGrid`] is also available in the [`prelude`].
pub use rkfield_arena as arena;

/// Time integration (`rkfield-solver`).
///
/// Implement [`solver::Derivative`] to plug a physics model into
/// [`solver::Rk4Solver`].
pub use rkfield_solver as solver;

/// Common imports for typical rkfield usage.
///
/// ```rust
/// use rkfield::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rkfield_core::{FieldKind, Real, StatusBits, FIELD_COUNT};

    // Storage
    pub use rkfield_arena::{FieldGrid, FieldStats, FieldsMut, FieldsRef, GridLayout};

    // Errors
    pub use rkfield_arena::GridError;
    pub use rkfield_core::StatusError;
    pub use rkfield_solver::SolverError;

    // Solver
    pub use rkfield_solver::{Derivative, LocalWaveKernel, Rk4Solver, SolverConfig, StepStats};
}
