//! Solver error types.

use std::error::Error;
use std::fmt;

use rkfield_arena::GridError;
use rkfield_core::FieldKind;

/// Errors returned by [`Rk4Solver::step`](crate::Rk4Solver::step) and the
/// accumulation kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverError {
    /// Scratch grid construction failed.
    Grid(GridError),
    /// Grids passed to an element-wise kernel differ in shape.
    ShapeMismatch {
        /// `(width, height)` of the reference grid.
        expected: (usize, usize),
        /// `(width, height)` of the mismatched grid.
        found: (usize, usize),
    },
    /// A NaN or infinity was found after a step.
    NonFinite {
        /// The field holding the value.
        field: FieldKind,
        /// Index within the field's padded range.
        cell_index: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "shape mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::NonFinite { field, cell_index } => {
                write!(f, "non-finite value in field {field} at cell {cell_index}")
            }
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolverError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
