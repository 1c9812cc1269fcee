//! The [`FieldGrid`] container.

use std::fmt;
use std::ops::Range;

use rkfield_core::{FieldKind, Real, StatusBits, StatusError, ALIGN_BYTES};

use crate::error::GridError;
use crate::layout::GridLayout;
use crate::stats::FieldStats;
use crate::view::{FieldsMut, FieldsRef};

/// One time-snapshot of a 2-D domain: six equal-length fields in a
/// single aligned allocation, plus one status bit per cell.
///
/// # Storage invariant
///
/// `base` is the element offset of the first 64-byte boundary inside
/// `raw`, and field `k` occupies `raw[base + k * padded_size..][..padded_size]`.
/// `base` describes one particular allocation, so every operation that
/// produces a new allocation (construction, [`Clone`], [`Clone::clone_from`])
/// recomputes it for that allocation. A Rust move carries `raw` and `base`
/// together without touching the heap, so the pair stays consistent.
///
/// Padding elements (`active_size..padded_size` in every field) are
/// initialised with the field's default and are processed by every
/// kernel, so they always hold finite values.
pub struct FieldGrid<R: Real = f64> {
    layout: GridLayout,
    /// Field segments plus `layout.reserve()` elements of alignment slack.
    raw: Vec<R>,
    /// Element offset of the aligned region within `raw`.
    base: usize,
    status: StatusBits,
}

impl<R: Real> FieldGrid<R> {
    /// Build a `width x height` grid with default field values.
    ///
    /// `mass` starts at 1 and `friction` at 0.1 over the whole padded
    /// range; every other field and every status bit starts cleared.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions overflow `usize`, or if the storage cannot
    /// be aligned (a reserve-sizing defect). Use [`try_new`](Self::try_new)
    /// to handle the overflow case.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("field grid construction failed: {e}"),
        }
    }

    /// Fallible form of [`new`](Self::new).
    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        let layout = GridLayout::new::<R>(width, height)?;
        let mut grid = Self {
            raw: vec![R::zero(); layout.allocation_len()],
            base: 0,
            status: StatusBits::new(layout.active_size()),
            layout,
        };
        grid.rebind()?;
        grid.fill_defaults();
        tracing::trace!(
            width,
            height,
            active_size = layout.active_size(),
            padded_size = layout.padded_size(),
            base = grid.base,
            "field grid allocated"
        );
        Ok(grid)
    }

    /// A `0 x 0` grid holding no allocation.
    pub fn empty() -> Self {
        Self {
            layout: GridLayout::empty::<R>(),
            raw: Vec::new(),
            base: 0,
            status: StatusBits::new(0),
        }
    }

    /// Recompute `base` for the current allocation.
    fn rebind(&mut self) -> Result<(), GridError> {
        if self.raw.is_empty() {
            self.base = 0;
            return Ok(());
        }
        let reserve = self.layout.reserve();
        let offset = self.raw.as_ptr().align_offset(ALIGN_BYTES);
        if offset >= reserve || offset + self.layout.field_elements() > self.raw.len() {
            return Err(GridError::Misaligned { offset, reserve });
        }
        self.base = offset;
        Ok(())
    }

    fn fill_defaults(&mut self) {
        for kind in FieldKind::ALL {
            self.fill(kind, kind.default_value());
        }
    }

    /// The aligned region covering all six segments.
    #[inline]
    fn region(&self) -> &[R] {
        &self.raw[self.base..self.base + self.layout.field_elements()]
    }

    #[inline]
    fn region_mut(&mut self) -> &mut [R] {
        let end = self.base + self.layout.field_elements();
        &mut self.raw[self.base..end]
    }

    #[inline]
    fn segment(&self, kind: FieldKind) -> Range<usize> {
        let padded = self.layout.padded_size();
        let start = self.base + kind.index() * padded;
        start..start + padded
    }

    // ── Dimensions ─────────────────────────────────────────────────

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// Logical cell count, `width * height`.
    pub fn active_size(&self) -> usize {
        self.layout.active_size()
    }

    /// Per-field segment length, a multiple of [`Real::LANES`].
    pub fn padded_size(&self) -> usize {
        self.layout.padded_size()
    }

    /// Number of elements vectorized kernels iterate over.
    ///
    /// Always the padded size: padding is processed along with the
    /// active cells so it stays well-defined.
    #[inline]
    pub fn compute_size(&self) -> usize {
        self.layout.padded_size()
    }

    /// The grid's layout.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Returns `true` if both grids have the same width and height.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.layout.same_dims(&other.layout)
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Bytes held by the field buffer and the status words.
    pub fn memory_bytes(&self) -> usize {
        self.raw.len() * std::mem::size_of::<R>()
            + std::mem::size_of_val(self.status.words())
    }

    // ── Field access ───────────────────────────────────────────────

    /// One field over the full padded range.
    #[inline]
    pub fn field(&self, kind: FieldKind) -> &[R] {
        &self.raw[self.segment(kind)]
    }

    /// One field over the full padded range, mutably.
    #[inline]
    pub fn field_mut(&mut self, kind: FieldKind) -> &mut [R] {
        let range = self.segment(kind);
        &mut self.raw[range]
    }

    /// One field over the active cells only.
    pub fn active(&self, kind: FieldKind) -> &[R] {
        &self.field(kind)[..self.layout.active_size()]
    }

    /// All six fields at once.
    pub fn fields(&self) -> FieldsRef<'_, R> {
        FieldsRef::split(self.region(), self.layout.padded_size())
    }

    /// All six fields at once, as disjoint mutable slices.
    pub fn fields_mut(&mut self) -> FieldsMut<'_, R> {
        let padded = self.layout.padded_size();
        FieldsMut::split(self.region_mut(), padded)
    }

    /// Address of a field's first element, or null for an empty grid.
    ///
    /// For inspection (alignment and aliasing checks); read and write
    /// through [`field`](Self::field) and [`field_mut`](Self::field_mut).
    pub fn field_ptr(&self, kind: FieldKind) -> *const R {
        if self.layout.padded_size() == 0 {
            std::ptr::null()
        } else {
            self.field(kind).as_ptr()
        }
    }

    /// Scalar potential.
    pub fn potential(&self) -> &[R] {
        self.field(FieldKind::Potential)
    }

    /// Scalar potential, mutably.
    pub fn potential_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Potential)
    }

    /// Per-cell mass.
    pub fn mass(&self) -> &[R] {
        self.field(FieldKind::Mass)
    }

    /// Per-cell mass, mutably.
    pub fn mass_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Mass)
    }

    /// Velocity x component.
    pub fn vx(&self) -> &[R] {
        self.field(FieldKind::Vx)
    }

    /// Velocity x component, mutably.
    pub fn vx_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Vx)
    }

    /// Velocity y component.
    pub fn vy(&self) -> &[R] {
        self.field(FieldKind::Vy)
    }

    /// Velocity y component, mutably.
    pub fn vy_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Vy)
    }

    /// Damping coefficient.
    pub fn friction(&self) -> &[R] {
        self.field(FieldKind::Friction)
    }

    /// Damping coefficient, mutably.
    pub fn friction_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Friction)
    }

    /// Scalar pressure.
    pub fn pressure(&self) -> &[R] {
        self.field(FieldKind::Pressure)
    }

    /// Scalar pressure, mutably.
    pub fn pressure_mut(&mut self) -> &mut [R] {
        self.field_mut(FieldKind::Pressure)
    }

    // ── Cells ──────────────────────────────────────────────────────

    /// Row-major index of `(x, y)`, or `None` if outside the grid.
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.layout.index(x, y)
    }

    /// Value of `kind` at `(x, y)`, or `None` if outside the grid.
    pub fn get(&self, kind: FieldKind, x: usize, y: usize) -> Option<R> {
        self.index(x, y).map(|i| self.field(kind)[i])
    }

    /// Write `value` into `kind` at `(x, y)`.
    pub fn set(&mut self, kind: FieldKind, x: usize, y: usize, value: R) -> Result<(), GridError> {
        let i = self.index(x, y).ok_or(GridError::CellOutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })?;
        self.field_mut(kind)[i] = value;
        Ok(())
    }

    /// Fill a field, padding included.
    pub fn fill(&mut self, kind: FieldKind, value: R) {
        self.field_mut(kind).fill(value);
    }

    /// Restore construction defaults in every field and clear all status bits.
    pub fn reset_defaults(&mut self) {
        self.fill_defaults();
        self.status.clear();
    }

    /// Min/max/sum/mean of a field over its active cells.
    pub fn field_stats(&self, kind: FieldKind) -> Option<FieldStats> {
        FieldStats::from_slice(self.active(kind))
    }

    /// First non-finite element in storage order, scanning the padded range.
    pub fn first_non_finite(&self) -> Option<(FieldKind, usize)> {
        FieldKind::ALL.into_iter().find_map(|kind| {
            self.field(kind)
                .iter()
                .position(|v| !v.is_finite())
                .map(|i| (kind, i))
        })
    }

    // ── Status bits ────────────────────────────────────────────────

    /// Status flag of cell `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= active_size()`.
    #[inline]
    pub fn get_state(&self, idx: usize) -> bool {
        self.status.get(idx)
    }

    /// Set the status flag of cell `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= active_size()`.
    #[inline]
    pub fn set_state(&mut self, idx: usize, value: bool) {
        self.status.set(idx, value);
    }

    /// Status flag of cell `idx`, rejecting out-of-range indices.
    pub fn try_get_state(&self, idx: usize) -> Result<bool, StatusError> {
        self.status.try_get(idx)
    }

    /// Set the status flag of cell `idx`, rejecting out-of-range indices.
    pub fn try_set_state(&mut self, idx: usize, value: bool) -> Result<(), StatusError> {
        self.status.try_set(idx, value)
    }

    /// The status bit vector.
    pub fn status(&self) -> &StatusBits {
        &self.status
    }

    /// Overwrite this grid's status bits with `source`'s, reusing the
    /// existing words.
    ///
    /// # Panics
    ///
    /// Panics if the two grids differ in shape.
    pub fn copy_status_from(&mut self, source: &Self) {
        assert!(
            self.same_shape(source),
            "status copy between {}x{} and {}x{} grids",
            source.width(),
            source.height(),
            self.width(),
            self.height()
        );
        self.status.clone_from(&source.status);
    }

    // ── Ownership ──────────────────────────────────────────────────

    /// Move the contents out, leaving `self` as the empty `0 x 0` grid.
    ///
    /// The returned grid owns the original allocation (no element is
    /// copied); `self` afterwards has null field pointers and zero sizes
    /// and may be dropped or reassigned.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Copy every field segment (padding included) from `source`.
    ///
    /// Both grids must share a layout. Segments are copied relative to
    /// each grid's own base, never as raw buffers, because the two
    /// allocations generally sit at different alignment offsets.
    fn copy_fields_from(&mut self, source: &Self) {
        debug_assert_eq!(self.layout, source.layout);
        self.region_mut().copy_from_slice(source.region());
    }
}

impl<R: Real> Clone for FieldGrid<R> {
    fn clone(&self) -> Self {
        let mut grid = Self {
            layout: self.layout,
            raw: vec![R::zero(); self.raw.len()],
            base: 0,
            status: self.status.clone(),
        };
        // Same reserve and same element type: a layout that aligned once
        // aligns again, so failure here is the same sizing defect `new`
        // reports.
        if let Err(e) = grid.rebind() {
            panic!("field grid clone failed: {e}");
        }
        grid.copy_fields_from(self);
        grid
    }

    fn clone_from(&mut self, source: &Self) {
        if self.raw.len() != source.raw.len() {
            *self = source.clone();
            return;
        }
        // Reusing our own allocation keeps our own base valid; only the
        // dimensions may differ when the totals happen to match.
        self.layout = source.layout;
        if let Err(e) = self.rebind() {
            panic!("field grid clone failed: {e}");
        }
        self.copy_fields_from(source);
        self.status.clone_from(&source.status);
    }
}

impl<R: Real> Default for FieldGrid<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Real> PartialEq for FieldGrid<R> {
    /// Content equality: dimensions, every field over the padded range,
    /// and status bits. Allocation addresses are irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout
            && self.region() == other.region()
            && self.status == other.status
    }
}

impl<R: Real> fmt::Debug for FieldGrid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldGrid")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("active_size", &self.active_size())
            .field("padded_size", &self.padded_size())
            .field("base", &self.base)
            .field("status_set", &self.status.count_ones())
            .finish()
    }
}
