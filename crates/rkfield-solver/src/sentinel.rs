//! Post-step finiteness check.

use rkfield_arena::FieldGrid;
use rkfield_core::Real;

use crate::error::SolverError;

/// Fail on the first NaN or infinity in `grid`, padding included.
///
/// Fields are scanned in storage order, so the reported location is the
/// lowest-indexed offender of the first affected field.
pub fn check_finite<R: Real>(grid: &FieldGrid<R>) -> Result<(), SolverError> {
    match grid.first_non_finite() {
        None => Ok(()),
        Some((field, cell_index)) => {
            tracing::warn!(
                %field,
                cell_index,
                active_size = grid.active_size(),
                "non-finite value in grid"
            );
            Err(SolverError::NonFinite { field, cell_index })
        }
    }
}
