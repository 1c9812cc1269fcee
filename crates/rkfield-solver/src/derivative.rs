//! The right-hand-side seam of the integrator.

use rkfield_arena::FieldGrid;
use rkfield_core::Real;

/// Time derivative of a field grid.
///
/// The solver calls [`evaluate`](Self::evaluate) four times per step,
/// once per Runge-Kutta stage. `state` is either the grid being advanced
/// or the solver's intermediate state; `out` is a stage grid of the same
/// shape.
///
/// # Contract
///
/// - Write every element of every field of `out` over
///   `0..out.compute_size()`. Stage grids are reused across steps, so an
///   element left untouched carries a stale value into the blend.
/// - Pure in `state`: no hidden per-call state that would make the four
///   stages disagree about the same input.
/// - Padding elements must stay finite when the padding of `state` is
///   finite.
pub trait Derivative<R: Real = f64> {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Compute `d(state)/dt` into `out`.
    fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>);
}

impl<R: Real, D: Derivative<R> + ?Sized> Derivative<R> for &D {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        (**self).evaluate(state, out)
    }
}

impl<R: Real, D: Derivative<R> + ?Sized> Derivative<R> for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        (**self).evaluate(state, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubling;

    impl Derivative<f64> for Doubling {
        fn name(&self) -> &str {
            "doubling"
        }

        fn evaluate(&self, state: &FieldGrid<f64>, out: &mut FieldGrid<f64>) {
            for (o, s) in out.fields_mut().into_array().into_iter().zip(state.fields().into_array()) {
                for (d, &v) in o.iter_mut().zip(s) {
                    *d = 2.0 * v;
                }
            }
        }
    }

    #[test]
    fn boxed_and_borrowed_forward() {
        let state = FieldGrid::<f64>::new(2, 2);
        let mut out = FieldGrid::<f64>::new(2, 2);

        let boxed: Box<dyn Derivative<f64>> = Box::new(Doubling);
        assert_eq!(boxed.name(), "doubling");
        boxed.evaluate(&state, &mut out);
        assert_eq!(out.mass()[0], 2.0);

        let by_ref = &Doubling;
        out.fill(rkfield_core::FieldKind::Mass, 0.0);
        by_ref.evaluate(&state, &mut out);
        assert_eq!(out.mass()[3], 2.0);
    }
}
