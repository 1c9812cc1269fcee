//! Solver configuration.

/// Configuration for [`Rk4Solver`](crate::Rk4Solver).
///
/// The defaults leave the step loop untouched; every option here adds
/// work on top of the four stage evaluations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Scan every field after each step and fail with
    /// [`SolverError::NonFinite`](crate::SolverError::NonFinite) on the
    /// first NaN or infinity. Default: `false`.
    pub check_finite: bool,
}

impl SolverConfig {
    /// Configuration with the finiteness check enabled.
    pub fn checked() -> Self {
        Self { check_finite: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unchecked() {
        assert!(!SolverConfig::default().check_finite);
        assert!(SolverConfig::checked().check_finite);
    }
}
