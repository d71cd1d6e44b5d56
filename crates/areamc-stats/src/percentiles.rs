/// Percentile points reported for batch summaries.
pub const SUMMARY_POINTS: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Precomputed percentile values for a set of estimates.
///
/// Stores `(percentile, value)` pairs so a batch summary can report the
/// spread of its final estimates at a handful of fixed points.
///
/// # Examples
///
/// ```
/// use areamc_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::new(values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(6.0));
/// assert_eq!(percentiles.get(25.0), Some(3.0));
/// assert_eq!(percentiles.get(90.0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    points: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from unsorted values.
    #[must_use]
    pub fn new<I>(values: I, percentile_points: &[f64]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Computes percentiles from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order by
    /// [`f64::total_cmp`].
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let points = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { points }
    }

    /// Returns the value at a precomputed percentile, or `None` if it was not requested.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|(p, _)| (*p - percentile).abs() < f64::EPSILON)
            .map(|(_, value)| *value)
    }

    /// Returns an iterator over all `(percentile, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied()
    }
}

/// Nearest-rank percentile of sorted data.
///
/// The k-th percentile of n values is the value at index `floor(n * k / 100)`,
/// clamped to the last element. Returns `NaN` for empty input.
///
/// ```
/// use areamc_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let idx = (sorted_values.len() as f64 * percentile / 100.0) as usize;
    sorted_values[idx.min(last)]
}
