//! Simultaneous borrows of all six fields.
//!
//! Kernels read several input fields and write several output fields in
//! the same loop. [`FieldsRef`] and [`FieldsMut`] split the grid's
//! aligned region into six disjoint slices so the borrow checker, not a
//! caller contract, guarantees that no two of them overlap.

use rkfield_core::{FieldKind, FIELD_COUNT};

/// Shared views of all six fields, each `padded_size` long.
#[derive(Clone, Copy, Debug)]
pub struct FieldsRef<'a, R> {
    /// Scalar potential.
    pub potential: &'a [R],
    /// Per-cell mass.
    pub mass: &'a [R],
    /// Velocity, x component.
    pub vx: &'a [R],
    /// Velocity, y component.
    pub vy: &'a [R],
    /// Damping coefficient.
    pub friction: &'a [R],
    /// Scalar pressure.
    pub pressure: &'a [R],
}

impl<'a, R> FieldsRef<'a, R> {
    pub(crate) fn split(region: &'a [R], padded_size: usize) -> Self {
        let (potential, rest) = region.split_at(padded_size);
        let (mass, rest) = rest.split_at(padded_size);
        let (vx, rest) = rest.split_at(padded_size);
        let (vy, rest) = rest.split_at(padded_size);
        let (friction, rest) = rest.split_at(padded_size);
        let (pressure, _) = rest.split_at(padded_size);
        Self {
            potential,
            mass,
            vx,
            vy,
            friction,
            pressure,
        }
    }

    /// The view of one field.
    pub fn get(&self, kind: FieldKind) -> &'a [R] {
        match kind {
            FieldKind::Potential => self.potential,
            FieldKind::Mass => self.mass,
            FieldKind::Vx => self.vx,
            FieldKind::Vy => self.vy,
            FieldKind::Friction => self.friction,
            FieldKind::Pressure => self.pressure,
        }
    }

    /// All six views in storage order.
    pub fn into_array(self) -> [&'a [R]; FIELD_COUNT] {
        [
            self.potential,
            self.mass,
            self.vx,
            self.vy,
            self.friction,
            self.pressure,
        ]
    }
}

/// Mutable, pairwise-disjoint views of all six fields.
#[derive(Debug)]
pub struct FieldsMut<'a, R> {
    /// Scalar potential.
    pub potential: &'a mut [R],
    /// Per-cell mass.
    pub mass: &'a mut [R],
    /// Velocity, x component.
    pub vx: &'a mut [R],
    /// Velocity, y component.
    pub vy: &'a mut [R],
    /// Damping coefficient.
    pub friction: &'a mut [R],
    /// Scalar pressure.
    pub pressure: &'a mut [R],
}

impl<'a, R> FieldsMut<'a, R> {
    pub(crate) fn split(region: &'a mut [R], padded_size: usize) -> Self {
        let (potential, rest) = region.split_at_mut(padded_size);
        let (mass, rest) = rest.split_at_mut(padded_size);
        let (vx, rest) = rest.split_at_mut(padded_size);
        let (vy, rest) = rest.split_at_mut(padded_size);
        let (friction, rest) = rest.split_at_mut(padded_size);
        let (pressure, _) = rest.split_at_mut(padded_size);
        Self {
            potential,
            mass,
            vx,
            vy,
            friction,
            pressure,
        }
    }

    /// The mutable view of one field.
    pub fn get_mut(&mut self, kind: FieldKind) -> &mut [R] {
        match kind {
            FieldKind::Potential => &mut *self.potential,
            FieldKind::Mass => &mut *self.mass,
            FieldKind::Vx => &mut *self.vx,
            FieldKind::Vy => &mut *self.vy,
            FieldKind::Friction => &mut *self.friction,
            FieldKind::Pressure => &mut *self.pressure,
        }
    }

    /// All six views in storage order.
    pub fn into_array(self) -> [&'a mut [R]; FIELD_COUNT] {
        [
            self.potential,
            self.mass,
            self.vx,
            self.vy,
            self.friction,
            self.pressure,
        ]
    }
}
