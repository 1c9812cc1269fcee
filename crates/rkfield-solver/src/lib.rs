//! Explicit Runge-Kutta time integration over rkfield grids.
//!
//! [`Rk4Solver`] advances a [`FieldGrid`](rkfield_arena::FieldGrid) by one
//! classical fourth-order Runge-Kutta step per call. The right-hand side
//! is supplied by a [`Derivative`] kernel; [`LocalWaveKernel`] is the
//! default.
//!
//! # Step structure
//!
//! ```text
//! k1 = f(y)
//! k2 = f(y + dt/2 * k1)        accumulate_step -> temp_state
//! k3 = f(y + dt/2 * k2)        accumulate_step -> temp_state
//! k4 = f(y + dt   * k3)        accumulate_step -> temp_state
//! y += dt/6 * (k1 + 2 k2 + 2 k3 + k4)
//! ```
//!
//! The four stage grids and the intermediate state are owned by the
//! solver and rebuilt only when the target grid changes shape, so a
//! steady-state step performs no allocation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accumulate;
pub mod config;
pub mod derivative;
pub mod error;
pub mod rk4;
pub mod sentinel;
pub mod wave;

pub use accumulate::{accumulate_step, blend_rk4};
pub use config::SolverConfig;
pub use derivative::Derivative;
pub use error::SolverError;
pub use rk4::{Rk4Solver, StepStats};
pub use sentinel::check_finite;
pub use wave::LocalWaveKernel;
