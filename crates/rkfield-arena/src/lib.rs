//! Aligned structure-of-arrays field storage for rkfield simulations.
//!
//! A [`FieldGrid`] owns one contiguous buffer holding all six fields of
//! a 2-D grid plus a bit-per-cell status vector. Fields are never stored
//! as raw pointers: each access derives its slice from the buffer's
//! current aligned base, and every operation that can relocate the
//! buffer recomputes that base before returning.
//!
//! # Layout
//!
//! ```text
//! raw: Vec<R>
//! ├── slack (0..LANES-1 elements, up to the first 64-byte boundary)
//! ├── potential [padded_size]   <- base, 64-byte aligned
//! ├── mass      [padded_size]
//! ├── vx        [padded_size]
//! ├── vy        [padded_size]
//! ├── friction  [padded_size]
//! ├── pressure  [padded_size]
//! └── unused tail of the slack
//! ```
//!
//! `padded_size` is a multiple of the lane count, so every segment
//! begins on a 64-byte boundary and vectorized loops over
//! [`FieldGrid::compute_size`] elements never need a scalar remainder.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod layout;
pub mod stats;
pub mod view;

pub use error::GridError;
pub use grid::FieldGrid;
pub use layout::GridLayout;
pub use stats::FieldStats;
pub use view::{FieldsMut, FieldsRef};
