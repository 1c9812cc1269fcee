//! Reusable derivative kernels.
//!
//! - [`ZeroDerivative`] writes zero everywhere; a step must leave the
//!   grid unchanged.
//! - [`LinearDecay`] is `dy/dt = -rate * y` on every field, with the
//!   exact solution `y0 * exp(-rate * t)`.
//! - [`ConstantRate`] is `dy/dt = c` per field; RK4 integrates it exactly.
//! - [`PoisonKernel`] plants one NaN for sentinel tests.

use rkfield_arena::FieldGrid;
use rkfield_core::{FieldKind, Real, FIELD_COUNT};
use rkfield_solver::Derivative;

/// Zero time derivative for every field.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroDerivative;

impl<R: Real> Derivative<R> for ZeroDerivative {
    fn name(&self) -> &str {
        "zero"
    }

    fn evaluate(&self, _state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        for kind in FieldKind::ALL {
            out.fill(kind, R::zero());
        }
    }
}

/// `dy/dt = -rate * y`, applied independently to every element.
#[derive(Clone, Copy, Debug)]
pub struct LinearDecay {
    pub rate: f64,
}

impl LinearDecay {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Exact value at time `t` starting from `y0`.
    pub fn exact(&self, y0: f64, t: f64) -> f64 {
        y0 * (-self.rate * t).exp()
    }
}

impl Default for LinearDecay {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<R: Real> Derivative<R> for LinearDecay {
    fn name(&self) -> &str {
        "linear_decay"
    }

    fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        let k = R::from_f64_lossy(-self.rate);
        for (o, s) in out
            .fields_mut()
            .into_array()
            .into_iter()
            .zip(state.fields().into_array())
        {
            for (d, &v) in o.iter_mut().zip(s) {
                *d = k * v;
            }
        }
    }
}

/// `dy/dt = rates[field]`, independent of the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantRate {
    pub rates: [f64; FIELD_COUNT],
}

impl ConstantRate {
    /// The same rate on every field.
    pub fn uniform(rate: f64) -> Self {
        Self {
            rates: [rate; FIELD_COUNT],
        }
    }

    /// `rate` on `field`, zero elsewhere.
    pub fn single(field: FieldKind, rate: f64) -> Self {
        let mut rates = [0.0; FIELD_COUNT];
        rates[field.index()] = rate;
        Self { rates }
    }
}

impl<R: Real> Derivative<R> for ConstantRate {
    fn name(&self) -> &str {
        "constant_rate"
    }

    fn evaluate(&self, _state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        for kind in FieldKind::ALL {
            out.fill(kind, R::from_f64_lossy(self.rates[kind.index()]));
        }
    }
}

/// Zero derivative except for a NaN at one element of one field.
#[derive(Clone, Copy, Debug)]
pub struct PoisonKernel {
    pub field: FieldKind,
    pub cell_index: usize,
}

impl PoisonKernel {
    pub fn new(field: FieldKind, cell_index: usize) -> Self {
        Self { field, cell_index }
    }
}

impl<R: Real> Derivative<R> for PoisonKernel {
    fn name(&self) -> &str {
        "poison"
    }

    fn evaluate(&self, _state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        for kind in FieldKind::ALL {
            out.fill(kind, R::zero());
        }
        if let Some(v) = out.field_mut(self.field).get_mut(self.cell_index) {
            *v = R::from_f64_lossy(f64::NAN);
        }
    }
}
