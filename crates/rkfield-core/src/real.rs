//! Floating-point precision abstraction.
//!
//! Grids and solvers are generic over [`Real`], implemented for `f32`
//! and `f64`. Arithmetic, constants and classification come from
//! [`num_traits::Float`]; this trait adds the SIMD lane count used for
//! padding and infallible conversions to and from `f64`.

use std::fmt;
use std::ops::{AddAssign, MulAssign};

use num_traits::{Float, FromPrimitive};

/// Byte width of the widest SIMD register the layout targets (AVX-512).
///
/// Every field segment starts on a boundary of this many bytes.
pub const ALIGN_BYTES: usize = 64;

/// A floating-point element type usable as field storage.
pub trait Real:
    Float
    + FromPrimitive
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + AddAssign
    + MulAssign
{
    /// Number of elements in one [`ALIGN_BYTES`]-wide register.
    const LANES: usize;

    /// Convert from `f64`, rounding to nearest if the target is narrower.
    ///
    /// Unlike [`FromPrimitive::from_f64`] this never fails.
    fn from_f64_lossy(value: f64) -> Self;

    /// Widen to `f64` without loss.
    fn widen(self) -> f64;
}

macro_rules! impl_real {
    ($t:ty) => {
        impl Real for $t {
            const LANES: usize = ALIGN_BYTES / std::mem::size_of::<$t>();

            #[inline(always)]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn widen(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
