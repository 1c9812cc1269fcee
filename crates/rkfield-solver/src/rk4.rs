//! The classical fourth-order Runge-Kutta integrator.

use rkfield_arena::FieldGrid;
use rkfield_core::Real;

use crate::accumulate::{accumulate_step, blend_rk4, check_shape};
use crate::config::SolverConfig;
use crate::derivative::Derivative;
use crate::error::SolverError;
use crate::sentinel::check_finite;
use crate::wave::LocalWaveKernel;

/// Outcome of one [`Rk4Solver::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepStats {
    /// Whether the scratch grids were rebuilt for this step.
    pub reallocated: bool,
    /// Active cells advanced.
    pub cells: usize,
}

/// RK4 integrator with persistent scratch storage.
///
/// Holds the four stage derivatives `k1..k4` and the intermediate state
/// as full [`FieldGrid`]s. They are sized lazily on the first step and
/// rebuilt whenever the target grid's width or height changes; steps on
/// an unchanged shape reuse them without allocating.
///
/// The solver is not shareable between threads during a step (it needs
/// `&mut self`), but it is `Send` whenever its kernel is, so one solver
/// per worker is the intended pattern.
pub struct Rk4Solver<R: Real = f64, K = LocalWaveKernel> {
    kernel: K,
    config: SolverConfig,
    k1: FieldGrid<R>,
    k2: FieldGrid<R>,
    k3: FieldGrid<R>,
    k4: FieldGrid<R>,
    temp_state: FieldGrid<R>,
}

impl<R: Real> Rk4Solver<R, LocalWaveKernel> {
    /// A solver driven by [`LocalWaveKernel`] with default configuration.
    ///
    /// Scratch storage is empty until the first step.
    pub fn new() -> Self {
        Self::with_kernel(LocalWaveKernel)
    }
}

impl<R: Real, K: Derivative<R>> Rk4Solver<R, K> {
    /// A solver driven by `kernel` with default configuration.
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: SolverConfig::default(),
            k1: FieldGrid::empty(),
            k2: FieldGrid::empty(),
            k3: FieldGrid::empty(),
            k4: FieldGrid::empty(),
            temp_state: FieldGrid::empty(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The derivative kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Make the scratch grids match `grid`'s shape.
    ///
    /// Returns `Ok(true)` if they were rebuilt. Rebuilt grids hold the
    /// construction defaults; every element is overwritten before it is
    /// read during a step.
    pub fn ensure_buffers(&mut self, grid: &FieldGrid<R>) -> Result<bool, SolverError> {
        if self.temp_state.same_shape(grid) {
            return Ok(false);
        }
        let (width, height) = (grid.width(), grid.height());
        let previous = (self.temp_state.width(), self.temp_state.height());
        for scratch in [
            &mut self.k1,
            &mut self.k2,
            &mut self.k3,
            &mut self.k4,
            &mut self.temp_state,
        ] {
            *scratch = FieldGrid::try_new(width, height)?;
        }
        tracing::debug!(
            width,
            height,
            previous_width = previous.0,
            previous_height = previous.1,
            padded_size = grid.padded_size(),
            "rk4 scratch reallocated"
        );
        Ok(true)
    }

    /// Evaluate the kernel on `state` into `out`.
    ///
    /// Returns [`SolverError::ShapeMismatch`] without touching `out`
    /// unless both grids share one shape.
    pub fn compute_physics_derivatives(
        &self,
        state: &FieldGrid<R>,
        out: &mut FieldGrid<R>,
    ) -> Result<(), SolverError> {
        check_shape(state, out)?;
        self.kernel.evaluate(state, out);
        Ok(())
    }

    /// Advance `grid` by one RK4 step of size `dt`, in place.
    ///
    /// All six fields are integrated over the full padded range. With
    /// [`SolverConfig::check_finite`] set, the grid is scanned afterwards
    /// and the first NaN or infinity is reported as
    /// [`SolverError::NonFinite`]; the grid keeps the offending values.
    pub fn step(&mut self, grid: &mut FieldGrid<R>, dt: R) -> Result<StepStats, SolverError> {
        let reallocated = self.ensure_buffers(grid)?;
        let half = dt * R::from_f64_lossy(0.5);

        self.kernel.evaluate(grid, &mut self.k1);
        accumulate_step(grid, &self.k1, half, &mut self.temp_state)?;

        self.kernel.evaluate(&self.temp_state, &mut self.k2);
        accumulate_step(grid, &self.k2, half, &mut self.temp_state)?;

        self.kernel.evaluate(&self.temp_state, &mut self.k3);
        accumulate_step(grid, &self.k3, dt, &mut self.temp_state)?;

        self.kernel.evaluate(&self.temp_state, &mut self.k4);
        blend_rk4(grid, [&self.k1, &self.k2, &self.k3, &self.k4], dt)?;

        if self.config.check_finite {
            check_finite(grid)?;
        }

        tracing::trace!(
            kernel = self.kernel.name(),
            dt = dt.widen(),
            cells = grid.active_size(),
            reallocated,
            "rk4 step"
        );
        Ok(StepStats {
            reallocated,
            cells: grid.active_size(),
        })
    }

    /// Run `steps` consecutive steps of size `dt`, stopping at the first
    /// error. Returns the number of steps that reallocated scratch.
    pub fn advance(
        &mut self,
        grid: &mut FieldGrid<R>,
        dt: R,
        steps: usize,
    ) -> Result<usize, SolverError> {
        let mut reallocations = 0;
        for _ in 0..steps {
            if self.step(grid, dt)?.reallocated {
                reallocations += 1;
            }
        }
        Ok(reallocations)
    }

    /// Padded size of the scratch grids; zero before the first step.
    pub fn scratch_compute_size(&self) -> usize {
        self.temp_state.compute_size()
    }

    /// `(width, height)` the scratch grids are sized for.
    pub fn scratch_shape(&self) -> (usize, usize) {
        (self.temp_state.width(), self.temp_state.height())
    }

    /// Stage derivatives `[k1, k2, k3, k4]` left by the most recent step.
    pub fn stages(&self) -> [&FieldGrid<R>; 4] {
        [&self.k1, &self.k2, &self.k3, &self.k4]
    }

    /// Bytes held by the five scratch grids.
    pub fn scratch_bytes(&self) -> usize {
        [&self.k1, &self.k2, &self.k3, &self.k4, &self.temp_state]
            .iter()
            .map(|g| g.memory_bytes())
            .sum()
    }
}

impl<R: Real, K: Derivative<R> + Default> Default for Rk4Solver<R, K> {
    fn default() -> Self {
        Self::with_kernel(K::default())
    }
}

impl<R: Real, K: Derivative<R>> std::fmt::Debug for Rk4Solver<R, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rk4Solver")
            .field("kernel", &self.kernel.name())
            .field("config", &self.config)
            .field("scratch_shape", &self.scratch_shape())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rkfield_core::FieldKind;

    /// `dy/dt = -y` on every field.
    struct Decay;

    impl<R: Real> Derivative<R> for Decay {
        fn name(&self) -> &str {
            "decay"
        }

        fn evaluate(&self, state: &FieldGrid<R>, out: &mut FieldGrid<R>) {
            for (o, s) in out
                .fields_mut()
                .into_array()
                .into_iter()
                .zip(state.fields().into_array())
            {
                for (d, &v) in o.iter_mut().zip(s) {
                    *d = -v;
                }
            }
        }
    }

    /// Writes NaN into the potential derivative of cell 0.
    struct Poison;

    impl Derivative<f64> for Poison {
        fn name(&self) -> &str {
            "poison"
        }

        fn evaluate(&self, _state: &FieldGrid<f64>, out: &mut FieldGrid<f64>) {
            for kind in FieldKind::ALL {
                out.fill(kind, 0.0);
            }
            out.potential_mut()[0] = f64::NAN;
        }
    }

    #[test]
    fn fresh_solver_has_no_scratch() {
        let solver = Rk4Solver::<f64>::new();
        assert_eq!(solver.scratch_compute_size(), 0);
        assert_eq!(solver.scratch_shape(), (0, 0));
        assert_eq!(solver.scratch_bytes(), 0);
    }

    #[test]
    fn first_step_allocates_then_reuses() {
        let mut solver = Rk4Solver::new();
        let mut grid = FieldGrid::<f64>::new(10, 10);

        let first = solver.step(&mut grid, 0.01).unwrap();
        assert!(first.reallocated);
        assert_eq!(first.cells, 100);
        assert_eq!(solver.scratch_compute_size(), 104);

        let ptr = solver.stages()[0].field_ptr(FieldKind::Potential);
        let second = solver.step(&mut grid, 0.01).unwrap();
        assert!(!second.reallocated);
        assert_eq!(solver.stages()[0].field_ptr(FieldKind::Potential), ptr);
    }

    #[test]
    fn shape_change_reallocates() {
        let mut solver = Rk4Solver::new();
        let mut a = FieldGrid::<f64>::new(4, 4);
        let mut b = FieldGrid::<f64>::new(2, 8);
        assert!(solver.step(&mut a, 0.1).unwrap().reallocated);
        // Same cell count, different shape.
        assert!(solver.step(&mut b, 0.1).unwrap().reallocated);
        assert_eq!(solver.scratch_shape(), (2, 8));
        assert!(!solver.step(&mut b, 0.1).unwrap().reallocated);
    }

    #[test]
    fn decay_matches_exponential() {
        let mut solver = Rk4Solver::with_kernel(Decay);
        let mut grid = FieldGrid::<f64>::new(3, 2);
        grid.fill(FieldKind::Pressure, 1.0);
        solver.advance(&mut grid, 0.1, 10).unwrap();
        let exact = (-1.0f64).exp();
        for &p in grid.active(FieldKind::Pressure) {
            assert_abs_diff_eq!(p, exact, epsilon = 1e-6);
        }
    }

    #[test]
    fn single_step_matches_taylor_polynomial() {
        let mut solver = Rk4Solver::with_kernel(Decay);
        let mut grid = FieldGrid::<f64>::new(1, 1);
        grid.fill(FieldKind::Vx, 1.0);
        let h = 0.2;
        solver.step(&mut grid, h).unwrap();
        let expected = 1.0 - h + h * h / 2.0 - h * h * h / 6.0 + h * h * h * h / 24.0;
        assert_relative_eq!(grid.vx()[0], expected, epsilon = 1e-14);
    }

    #[test]
    fn zero_dt_is_identity() {
        let mut solver = Rk4Solver::new();
        let mut grid = FieldGrid::<f64>::new(5, 5);
        grid.fill(FieldKind::Potential, 2.5);
        grid.set(FieldKind::Vy, 1, 1, -3.0).unwrap();
        let before = grid.clone();
        solver.step(&mut grid, 0.0).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn empty_grid_steps() {
        let mut solver = Rk4Solver::<f32>::new();
        let mut grid = FieldGrid::<f32>::empty();
        let stats = solver.step(&mut grid, 0.1).unwrap();
        assert!(!stats.reallocated);
        assert_eq!(stats.cells, 0);
    }

    #[test]
    fn sentinel_reports_nan() {
        let mut solver = Rk4Solver::with_kernel(Poison).with_config(SolverConfig::checked());
        let mut grid = FieldGrid::<f64>::new(4, 4);
        let err = solver.step(&mut grid, 0.1).unwrap_err();
        assert_eq!(
            err,
            SolverError::NonFinite {
                field: FieldKind::Potential,
                cell_index: 0
            }
        );
    }

    #[test]
    fn unchecked_solver_ignores_nan() {
        let mut solver = Rk4Solver::with_kernel(Poison);
        let mut grid = FieldGrid::<f64>::new(4, 4);
        solver.step(&mut grid, 0.1).unwrap();
        assert!(grid.potential()[0].is_nan());
    }

    #[test]
    fn advance_counts_reallocations() {
        let mut solver = Rk4Solver::new();
        let mut grid = FieldGrid::<f64>::new(6, 6);
        assert_eq!(solver.advance(&mut grid, 0.01, 5).unwrap(), 1);
        assert_eq!(solver.advance(&mut grid, 0.01, 5).unwrap(), 0);
        assert_eq!(solver.advance(&mut grid, 0.01, 0).unwrap(), 0);
    }

    #[test]
    fn derivatives_into_matching_grid() {
        let solver = Rk4Solver::new();
        let mut state = FieldGrid::<f64>::new(3, 3);
        state.fill(FieldKind::Potential, 2.0);
        let mut out = FieldGrid::<f64>::new(3, 3);
        out.fill(FieldKind::Mass, 42.0);
        solver.compute_physics_derivatives(&state, &mut out).unwrap();
        assert!(out.vx().iter().all(|&v| v == -2.0));
        assert!(out.mass().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn derivatives_reject_larger_output() {
        let solver = Rk4Solver::new();
        let state = FieldGrid::<f64>::new(2, 2);
        let mut out = FieldGrid::<f64>::new(4, 4);
        out.fill(FieldKind::Mass, 42.0);
        let err = solver.compute_physics_derivatives(&state, &mut out).unwrap_err();
        assert_eq!(
            err,
            SolverError::ShapeMismatch {
                expected: (2, 2),
                found: (4, 4)
            }
        );
        // Nothing written, so no partially stale output.
        assert!(out.mass().iter().all(|&m| m == 42.0));
    }

    #[test]
    fn derivatives_reject_smaller_output() {
        let solver = Rk4Solver::new();
        let state = FieldGrid::<f64>::new(4, 4);
        let mut out = FieldGrid::<f64>::new(2, 2);
        let before = out.clone();
        let err = solver.compute_physics_derivatives(&state, &mut out).unwrap_err();
        assert_eq!(
            err,
            SolverError::ShapeMismatch {
                expected: (4, 4),
                found: (2, 2)
            }
        );
        assert_eq!(out, before);
    }

    #[test]
    fn debug_names_kernel() {
        let solver = Rk4Solver::<f64>::new();
        let text = format!("{solver:?}");
        assert!(text.contains("local_wave"));
    }
}
