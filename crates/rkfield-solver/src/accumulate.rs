//! Element-wise stage kernels.
//!
//! Both kernels walk every field over the padded range in
//! [`Real::LANES`]-wide chunks. Segments are lane multiples, so the
//! chunks cover them exactly and the inner loop has a fixed trip count
//! the compiler can vectorize.

use rkfield_arena::FieldGrid;
use rkfield_core::Real;

use crate::error::SolverError;

/// `result = state + scale * k`, over all six fields and the padding.
///
/// `result`'s status bits are overwritten with a copy of `state`'s so a
/// kernel evaluating the intermediate state sees the same flags.
///
/// Returns [`SolverError::ShapeMismatch`] unless all three grids share
/// one shape.
pub fn accumulate_step<R: Real>(
    state: &FieldGrid<R>,
    k: &FieldGrid<R>,
    scale: R,
    result: &mut FieldGrid<R>,
) -> Result<(), SolverError> {
    check_shape(state, k)?;
    check_shape(state, result)?;

    let inputs = state.fields().into_array();
    let slopes = k.fields().into_array();
    for ((out, ys), dys) in result.fields_mut().into_array().into_iter().zip(inputs).zip(slopes) {
        for ((out, ys), dys) in out
            .chunks_exact_mut(R::LANES)
            .zip(ys.chunks_exact(R::LANES))
            .zip(dys.chunks_exact(R::LANES))
        {
            for ((o, &y), &dy) in out.iter_mut().zip(ys).zip(dys) {
                *o = y + scale * dy;
            }
        }
    }

    result.copy_status_from(state);
    Ok(())
}

/// `grid += dt/6 * (k1 + 2 k2 + 2 k3 + k4)`, the final RK4 update.
///
/// Returns [`SolverError::ShapeMismatch`] unless every stage matches
/// `grid`.
pub fn blend_rk4<R: Real>(
    grid: &mut FieldGrid<R>,
    stages: [&FieldGrid<R>; 4],
    dt: R,
) -> Result<(), SolverError> {
    for k in stages {
        check_shape(grid, k)?;
    }

    let sixth = dt / R::from_f64_lossy(6.0);
    let two = R::from_f64_lossy(2.0);
    let [k1, k2, k3, k4] = stages.map(|k| k.fields().into_array());

    for (f, ys) in grid.fields_mut().into_array().into_iter().enumerate() {
        let lanes = R::LANES;
        for ((((ys, a), b), c), d) in ys
            .chunks_exact_mut(lanes)
            .zip(k1[f].chunks_exact(lanes))
            .zip(k2[f].chunks_exact(lanes))
            .zip(k3[f].chunks_exact(lanes))
            .zip(k4[f].chunks_exact(lanes))
        {
            for ((((y, &a), &b), &c), &d) in ys.iter_mut().zip(a).zip(b).zip(c).zip(d) {
                *y += sixth * (a + two * b + two * c + d);
            }
        }
    }
    Ok(())
}

pub(crate) fn check_shape<R: Real>(
    expected: &FieldGrid<R>,
    found: &FieldGrid<R>,
) -> Result<(), SolverError> {
    if expected.same_shape(found) {
        Ok(())
    } else {
        Err(SolverError::ShapeMismatch {
            expected: (expected.width(), expected.height()),
            found: (found.width(), found.height()),
        })
    }
}
