//! Error types for status-bit access.

use std::error::Error;
use std::fmt;

/// Errors from the checked status-bit accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusError {
    /// The cell index is not below the number of active cells.
    OutOfRange {
        /// The offending cell index.
        index: usize,
        /// Number of addressable cells.
        len: usize,
    },
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "status index {index} out of range for {len} cells")
            }
        }
    }
}

impl Error for StatusError {}
