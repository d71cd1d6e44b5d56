/// Running Monte Carlo area estimate with Welford mean/variance tracking.
///
/// Each recorded sample is a single hit/miss trial. After every trial the
/// current scaled estimate `hits / count * region_area` is fed into a
/// one-pass Welford accumulator, so [`mean`](Self::mean) is the running
/// average of the cumulative estimates and [`std_dev`](Self::std_dev) is their
/// spread.
///
/// The estimator has two states: accumulating and converged. It never
/// transitions back once converged for a given tolerance; callers simply
/// stop recording samples.
///
/// # Examples
///
/// ```
/// use areamc_stats::incremental::IncrementalEstimator;
///
/// let mut estimator = IncrementalEstimator::new(2.0);
/// estimator.record_sample(true);
/// estimator.record_sample(false);
///
/// assert_eq!(estimator.count(), 2);
/// assert_eq!(estimator.hit_count(), 1);
/// assert_eq!(estimator.current_value(), 1.0);
/// assert_eq!(estimator.mean(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalEstimator {
    region_area: f64,
    count: u64,
    hit_count: u64,
    mean: f64,
    m2: f64,
}

/// Point-in-time view of an [`IncrementalEstimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSnapshot {
    /// Total number of recorded samples.
    pub samples: u64,
    /// Number of samples that were hits.
    pub hits: u64,
    /// Running mean of the scaled estimates.
    pub estimate: f64,
    /// Standard deviation of the scaled estimates.
    pub std_dev: f64,
}

impl IncrementalEstimator {
    /// Creates an empty estimator for a sampling region of the given area.
    #[must_use]
    pub fn new(region_area: f64) -> Self {
        Self {
            region_area,
            count: 0,
            hit_count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Records the outcome of one independent trial.
    ///
    /// # Examples
    ///
    /// ```
    /// # use areamc_stats::incremental::IncrementalEstimator;
    /// let mut estimator = IncrementalEstimator::new(1.0);
    /// for hit in [true, true, false] {
    ///     estimator.record_sample(hit);
    /// }
    /// assert_eq!(estimator.count(), 3);
    /// assert_eq!(estimator.hit_count(), 2);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn record_sample(&mut self, is_hit: bool) {
        self.count += 1;
        if is_hit {
            self.hit_count += 1;
        }

        let value = self.current_value();
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Returns the area of the sampling region.
    #[must_use]
    pub fn region_area(&self) -> f64 {
        self.region_area
    }

    /// Returns the number of recorded samples.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the number of recorded hits.
    #[must_use]
    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    /// Returns the running mean of the scaled estimates.
    ///
    /// Zero before the first sample.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the scaled estimate from the latest sample, `hits / count * area`.
    ///
    /// Zero before the first sample.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn current_value(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.hit_count as f64 / self.count as f64 * self.region_area
    }

    /// Returns the population variance of the scaled estimates.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.m2 / self.count as f64
    }

    /// Returns the standard deviation of the scaled estimates.
    ///
    /// Zero before the first sample.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Returns `true` when at least one sample exists and the standard
    /// deviation is at or below `tolerance`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use areamc_stats::incremental::IncrementalEstimator;
    /// let mut estimator = IncrementalEstimator::new(1.0);
    /// assert!(!estimator.has_converged(f64::INFINITY));
    ///
    /// estimator.record_sample(false);
    /// assert!(estimator.has_converged(f64::INFINITY));
    /// ```
    #[must_use]
    pub fn has_converged(&self, tolerance: f64) -> bool {
        self.count > 0 && self.std_dev() <= tolerance
    }

    /// Captures the current sample count, hit count, estimate and standard deviation.
    #[must_use]
    pub fn snapshot(&self) -> EstimatorSnapshot {
        EstimatorSnapshot {
            samples: self.count,
            hits: self.hit_count,
            estimate: self.mean,
            std_dev: self.std_dev(),
        }
    }
}
