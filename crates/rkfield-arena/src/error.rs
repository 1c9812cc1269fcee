//! Grid construction and access errors.

use std::error::Error;
use std::fmt;

/// Errors that can occur while building or addressing a [`FieldGrid`](crate::FieldGrid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// `width * height`, or the total element count, does not fit in `usize`.
    DimensionOverflow {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// No 64-byte boundary was found inside the alignment reserve.
    ///
    /// Indicates a defect in the reserve sizing; never expected at runtime.
    Misaligned {
        /// Element offset of the first aligned position, if one exists.
        offset: usize,
        /// Reserve available, in elements.
        reserve: usize,
    },
    /// A 2-D coordinate lies outside the grid.
    CellOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionOverflow { width, height } => {
                write!(f, "grid dimensions {width}x{height} overflow usize")
            }
            Self::Misaligned { offset, reserve } => {
                write!(
                    f,
                    "unable to align grid storage to 64 bytes: offset {offset} exceeds reserve {reserve}"
                )
            }
            Self::CellOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "cell ({x}, {y}) outside [0, {width}) x [0, {height})")
            }
        }
    }
}

impl Error for GridError {}
