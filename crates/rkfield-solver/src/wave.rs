//! A placeholder local wave kernel.
//!
//! Each cell evolves independently of its neighbours:
//!
//! ```text
//! d(potential)/dt = -(vx + vy)
//! d(vx)/dt        = -potential / mass - friction * vx
//! d(vy)/dt        = -potential / mass - friction * vy
//! d(mass)/dt = d(friction)/dt = d(pressure)/dt = 0
//! ```
//!
//! There is no spatial coupling, so the kernel is a benchmark and smoke
//! test for the integrator rather than a physical model. Swap in a real
//! stencil by implementing [`Derivative`].

use rkfield_arena::{FieldGrid, FieldsMut};
use rkfield_core::Real;

use crate::derivative::Derivative;

/// Per-cell damped oscillator coupling potential and velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalWaveKernel;

impl<R: Real> Derivative<R> for LocalWaveKernel {
    fn name(&self) -> &str {
        "local_wave"
    }

    fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
        let n = state.compute_size();
        debug_assert_eq!(n, out.compute_size());

        let s = state.fields();
        let (pot, mass, vx, vy, fric) = (
            &s.potential[..n],
            &s.mass[..n],
            &s.vx[..n],
            &s.vy[..n],
            &s.friction[..n],
        );

        let FieldsMut {
            potential: d_pot,
            mass: d_mass,
            vx: d_vx,
            vy: d_vy,
            friction: d_fric,
            pressure: d_pres,
        } = out.fields_mut();
        let (d_pot, d_vx, d_vy) = (&mut d_pot[..n], &mut d_vx[..n], &mut d_vy[..n]);

        for i in 0..n {
            let force = -pot[i];
            let inv_mass = R::one() / mass[i];
            d_pot[i] = -(vx[i] + vy[i]);
            d_vx[i] = force * inv_mass - fric[i] * vx[i];
            d_vy[i] = force * inv_mass - fric[i] * vy[i];
        }

        d_mass[..n].fill(R::zero());
        d_fric[..n].fill(R::zero());
        d_pres[..n].fill(R::zero());
    }
}
