//! Summary statistics over a field's active cells.

use rkfield_core::Real;

/// Min, max, sum and mean of one field over its active cells.
///
/// Accumulated in `f64` regardless of storage precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStats {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Sum of all values.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Number of cells summarised.
    pub count: usize,
}

impl FieldStats {
    /// Summarise `values`. Returns `None` for an empty slice.
    pub fn from_slice<R: Real>(values: &[R]) -> Option<Self> {
        let first = values.first()?.widen();
        let mut min = first;
        let mut max = first;
        let mut sum = 0.0;
        for v in values.iter().map(|v| v.widen()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(Self {
            min,
            max,
            sum,
            mean: sum / values.len() as f64,
            count: values.len(),
        })
    }
}
