//! The six simulated fields and their construction defaults.

use std::fmt;

use crate::real::Real;

/// Number of fields stored per grid.
pub const FIELD_COUNT: usize = 6;

/// Initial per-cell mass. Non-zero so `force / mass` stays finite.
pub const DEFAULT_MASS: f64 = 1.0;

/// Initial per-cell damping coefficient.
pub const DEFAULT_FRICTION: f64 = 0.1;

/// Identifies one of the six fields of a grid.
///
/// The discriminant is the field's segment index inside the grid's
/// backing store, so the declaration order is the storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    /// Scalar potential.
    Potential = 0,
    /// Per-cell mass.
    Mass = 1,
    /// Velocity, x component.
    Vx = 2,
    /// Velocity, y component.
    Vy = 3,
    /// Damping coefficient.
    Friction = 4,
    /// Scalar pressure.
    Pressure = 5,
}

impl FieldKind {
    /// All fields in storage order.
    pub const ALL: [FieldKind; FIELD_COUNT] = [
        Self::Potential,
        Self::Mass,
        Self::Vx,
        Self::Vy,
        Self::Friction,
        Self::Pressure,
    ];

    /// Segment index within the backing store.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a field by segment index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lower-case name for logging and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Mass => "mass",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Friction => "friction",
            Self::Pressure => "pressure",
        }
    }

    /// Value a freshly constructed grid holds in every slot of this field,
    /// padding included.
    pub fn default_value<R: Real>(self) -> R {
        match self {
            Self::Mass => R::from_f64_lossy(DEFAULT_MASS),
            Self::Friction => R::from_f64_lossy(DEFAULT_FRICTION),
            Self::Potential | Self::Vx | Self::Vy | Self::Pressure => R::zero(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
