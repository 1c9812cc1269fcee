//! Core types and traits for the rkfield simulation kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the storage and solver crates: the
//! [`Real`] precision trait, the [`FieldKind`] enumeration of the six
//! simulated fields, the [`StatusBits`] per-cell flag vector, and the
//! status accessor error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod real;
pub mod status;

pub use error::StatusError;
pub use field::{FieldKind, DEFAULT_FRICTION, DEFAULT_MASS, FIELD_COUNT};
pub use real::{Real, ALIGN_BYTES};
pub use status::StatusBits;
