//! Size arithmetic for padded, lane-aligned field segments.

use rkfield_core::{Real, FIELD_COUNT};

use crate::error::GridError;

/// Dimensions and derived sizes of a grid.
///
/// Pure arithmetic: a layout owns no memory. It is computed once per
/// construction and copied into every grid built from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridLayout {
    width: usize,
    height: usize,
    active_size: usize,
    padded_size: usize,
    lanes: usize,
}

impl GridLayout {
    /// Compute the layout of a `width x height` grid of `R` elements.
    ///
    /// Returns [`GridError::DimensionOverflow`] if the cell count or the
    /// total allocation length does not fit in `usize`.
    pub fn new<R: Real>(width: usize, height: usize) -> Result<Self, GridError> {
        let overflow = GridError::DimensionOverflow { width, height };
        let lanes = R::LANES;
        let active_size = width.checked_mul(height).ok_or(overflow.clone())?;
        let padded_size = pad_to_lanes(active_size, lanes).ok_or(overflow.clone())?;
        let layout = Self {
            width,
            height,
            active_size,
            padded_size,
            lanes,
        };
        // The whole allocation must be addressable too.
        layout
            .padded_size
            .checked_mul(FIELD_COUNT)
            .and_then(|n| n.checked_add(lanes))
            .ok_or(overflow)?;
        Ok(layout)
    }

    /// The `0 x 0` layout for `R`.
    pub fn empty<R: Real>() -> Self {
        Self {
            width: 0,
            height: 0,
            active_size: 0,
            padded_size: 0,
            lanes: R::LANES,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Logical cell count, `width * height`.
    pub fn active_size(&self) -> usize {
        self.active_size
    }

    /// Per-field segment length: `active_size` rounded up to a lane multiple.
    pub fn padded_size(&self) -> usize {
        self.padded_size
    }

    /// Elements per 64-byte register for this layout's precision.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.active_size == 0
    }

    /// Elements occupied by the six field segments.
    pub fn field_elements(&self) -> usize {
        self.padded_size * FIELD_COUNT
    }

    /// Slack reserved for moving the first segment onto a 64-byte boundary.
    ///
    /// A `Vec<R>` is at least `size_of::<R>()` aligned, so the boundary is
    /// at most `lanes - 1` elements away.
    pub fn reserve(&self) -> usize {
        self.lanes
    }

    /// Length of the backing buffer. Zero for an empty grid.
    pub fn allocation_len(&self) -> usize {
        if self.padded_size == 0 {
            0
        } else {
            self.field_elements() + self.reserve()
        }
    }

    /// Number of padding elements at the end of each segment.
    pub fn padding(&self) -> usize {
        self.padded_size - self.active_size
    }

    /// Row-major index of `(x, y)`, or `None` if outside the grid.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns `true` if both layouts have the same dimensions.
    pub fn same_dims(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Round `n` up to the next multiple of `lanes` (a power of two).
fn pad_to_lanes(n: usize, lanes: usize) -> Option<usize> {
    debug_assert!(lanes.is_power_of_two());
    Some(n.checked_add(lanes - 1)? & !(lanes - 1))
}
