use std::{iter::FusedIterator, ops::ControlFlow};

use areamc_stats::incremental::{EstimatorSnapshot, IncrementalEstimator};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, EstimationConfig, HitTest, PointSampler, SampleRegion, Seed};

/// Where an [`Estimation`] currently stands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::IsVariant,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EstimationStatus {
    /// Still sampling: nothing drawn yet, or the spread is above tolerance.
    #[display("running")]
    Running,
    /// Standard deviation at or below tolerance at the last chunk boundary.
    #[display("converged")]
    Converged,
    /// Sample cap reached before convergence.
    #[display("sample-limit-reached")]
    SampleLimitReached,
}

/// Why a run handed back its result.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::IsVariant,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    #[display("converged")]
    Converged,
    #[display("sample-limit-reached")]
    SampleLimitReached,
    /// The caller stopped consuming snapshots before the run finished.
    #[display("interrupted")]
    Interrupted,
}

/// Final result of [`Estimation::run`] or [`Estimation::run_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub snapshot: EstimatorSnapshot,
    pub stop_reason: StopReason,
    pub seed: Seed,
}

/// A Monte Carlo area estimation, consumed lazily one chunk at a time.
///
/// Every call to [`Iterator::next`] draws up to `chunk_size` points, records
/// each hit or miss in an [`IncrementalEstimator`] and yields the resulting
/// snapshot. Convergence is checked only at chunk boundaries. The sequence
/// ends after the first converged snapshot, or after the snapshot that hits
/// `max_samples`; the last chunk is truncated so the cap is never exceeded.
///
/// Callers may stop iterating at any point (time budget, UI) and resume
/// later; no samples are lost between calls.
///
/// # Example
///
/// ```
/// use areamc_engine::{Band, Estimation, EstimationConfig, SampleRegion, Seed};
///
/// // Quarter disk inside the unit square: area pi/4
/// let region = SampleRegion::from_bounds((0.0, 1.0), (0.0, 1.0)).unwrap();
/// let curves = Band::new(|_: f64| 0.0, |x: f64| (1.0 - x * x).sqrt());
/// let config = EstimationConfig::new(0.01);
///
/// let outcome = Estimation::with_seed(region, curves, config, Seed::from_bytes([3; 16]))
///     .unwrap()
///     .run();
///
/// assert!(outcome.stop_reason.is_converged());
/// assert!(outcome.snapshot.std_dev <= 0.01);
/// assert!((outcome.snapshot.estimate - std::f64::consts::FRAC_PI_4).abs() < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct Estimation<H> {
    hit_test: H,
    sampler: PointSampler,
    estimator: IncrementalEstimator,
    config: EstimationConfig,
    status: EstimationStatus,
}

impl<H> Estimation<H>
where
    H: HitTest,
{
    /// Creates an estimation sampling from an OS-seeded generator.
    pub fn new(
        region: SampleRegion,
        hit_test: H,
        config: EstimationConfig,
    ) -> Result<Self, ConfigError> {
        Self::from_sampler(PointSampler::new(region), hit_test, config)
    }

    /// Like [`Self::new`], but reproducible from `seed`.
    pub fn with_seed(
        region: SampleRegion,
        hit_test: H,
        config: EstimationConfig,
        seed: Seed,
    ) -> Result<Self, ConfigError> {
        Self::from_sampler(PointSampler::with_seed(region, seed), hit_test, config)
    }

    pub fn from_sampler(
        sampler: PointSampler,
        hit_test: H,
        config: EstimationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let estimator = IncrementalEstimator::new(sampler.region().area());
        Ok(Self {
            hit_test,
            sampler,
            estimator,
            config,
            status: EstimationStatus::Running,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    #[must_use]
    pub fn estimator(&self) -> &IncrementalEstimator {
        &self.estimator
    }

    #[must_use]
    pub fn status(&self) -> EstimationStatus {
        self.status
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.sampler.seed()
    }

    /// Raises the sample cap by `additional` samples.
    ///
    /// A run that stopped at the cap becomes [`EstimationStatus::Running`]
    /// again and continues from its current state.
    pub fn extend_sample_limit(&mut self, additional: u64) {
        self.config.max_samples = self.config.max_samples.saturating_add(additional);
        if self.status.is_sample_limit_reached() && self.estimator.count() < self.config.max_samples
        {
            self.status = EstimationStatus::Running;
        }
    }

    /// Drains the sequence and returns the final result.
    #[must_use]
    pub fn run(self) -> Outcome {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Drains the sequence, handing every snapshot to `observe`.
    ///
    /// Returning [`ControlFlow::Break`] stops the run early; the outcome is
    /// then [`StopReason::Interrupted`] unless that snapshot already ended
    /// the run.
    #[must_use]
    pub fn run_with<F>(mut self, mut observe: F) -> Outcome
    where
        F: FnMut(&EstimatorSnapshot) -> ControlFlow<()>,
    {
        while let Some(snapshot) = self.next() {
            if observe(&snapshot).is_break() {
                break;
            }
        }
        self.outcome()
    }

    /// Current result, with the stop reason derived from the status.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let stop_reason = match self.status {
            EstimationStatus::Running => StopReason::Interrupted,
            EstimationStatus::Converged => StopReason::Converged,
            EstimationStatus::SampleLimitReached => StopReason::SampleLimitReached,
        };
        Outcome {
            snapshot: self.estimator.snapshot(),
            stop_reason,
            seed: self.seed(),
        }
    }

    fn update_status(&mut self) {
        self.status = if self.estimator.has_converged(self.config.tolerance) {
            EstimationStatus::Converged
        } else if self.estimator.count() >= self.config.max_samples {
            EstimationStatus::SampleLimitReached
        } else {
            EstimationStatus::Running
        };
    }
}

impl<H> Iterator for Estimation<H>
where
    H: HitTest,
{
    type Item = EstimatorSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.status.is_running() {
            return None;
        }

        let remaining = self.config.max_samples - self.estimator.count();
        for _ in 0..self.config.chunk_size.min(remaining) {
            let (x, y) = self.sampler.sample();
            self.estimator.record_sample(self.hit_test.is_hit(x, y));
        }
        self.update_status();
        Some(self.estimator.snapshot())
    }
}

impl<H> FusedIterator for Estimation<H> where H: HitTest {}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::Band;

    fn seed(n: u8) -> Seed {
        Seed::from_bytes([n; 16])
    }

    fn unit_square() -> SampleRegion {
        SampleRegion::from_bounds((0.0, 1.0), (0.0, 1.0)).unwrap()
    }

    #[test]
    fn test_power_sine_scenario_converges() {
        let region = SampleRegion::from_bounds((2.0, PI), (0.0, 7.0)).unwrap();
        let curves = Band::new(|x: f64| 4.0 * x.sin(), |x: f64| x.powf(x) * x.sin());
        let config = EstimationConfig::new(0.005).with_max_samples(50_000_000);

        let outcome = Estimation::with_seed(region, curves, config, seed(1))
            .unwrap()
            .run();

        assert!(outcome.stop_reason.is_converged());
        assert!(outcome.snapshot.std_dev <= 0.005);
        assert_eq!(outcome.snapshot.samples % 10_000, 0);
        // Midpoint-rule integral of the band: 3.23955...
        assert!((outcome.snapshot.estimate - 3.2396).abs() < 0.05);
    }

    #[test]
    fn test_everything_hits_converges_at_first_chunk() {
        let region = SampleRegion::from_bounds((2.0, PI), (0.0, 7.0)).unwrap();
        let curves = Band::new(|_: f64| f64::NEG_INFINITY, |_: f64| f64::INFINITY);
        let mut estimation =
            Estimation::with_seed(region, curves, EstimationConfig::default(), seed(2)).unwrap();

        let first = estimation.next().unwrap();
        assert_eq!(first.samples, 10_000);
        assert_eq!(first.hits, 10_000);
        assert_eq!(first.estimate, region.area());
        assert_eq!(first.std_dev, 0.0);
        assert!(estimation.status().is_converged());
        assert_eq!(estimation.next(), None);
    }

    #[test]
    fn test_fixed_proportion_runs_land_near_truth() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 0.25);
        let config = EstimationConfig::new(0.01);
        for n in 0..10 {
            let outcome = Estimation::with_seed(unit_square(), curves, config, seed(n))
                .unwrap()
                .run();
            assert!(outcome.stop_reason.is_converged());
            assert!(outcome.snapshot.std_dev <= 0.01);
            assert!(
                (outcome.snapshot.estimate - 0.25).abs() < 0.03,
                "seed {n}: {}",
                outcome.snapshot.estimate
            );
        }
    }

    #[test]
    fn test_std_dev_shrinks_as_samples_grow() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 0.5);
        let config = EstimationConfig::new(1e-9)
            .with_chunk_size(1_000)
            .with_max_samples(200_000);
        let snapshots = Estimation::with_seed(unit_square(), curves, config, seed(9))
            .unwrap()
            .collect::<Vec<_>>();

        assert_eq!(snapshots.len(), 200);
        let early = snapshots[9].std_dev;
        let late = snapshots.last().unwrap().std_dev;
        assert!(late < early, "early {early}, late {late}");
    }

    #[test]
    fn test_sample_limit_is_exact() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 0.5);
        let config = EstimationConfig::new(1e-12)
            .with_chunk_size(300)
            .with_max_samples(1_000);
        let mut estimation = Estimation::with_seed(unit_square(), curves, config, seed(4)).unwrap();

        let samples = estimation.by_ref().map(|s| s.samples).collect::<Vec<_>>();
        assert_eq!(samples, vec![300, 600, 900, 1_000]);
        assert!(estimation.status().is_sample_limit_reached());
        assert_eq!(estimation.next(), None);
        assert_eq!(
            estimation.outcome().stop_reason,
            StopReason::SampleLimitReached
        );
    }

    #[test]
    fn test_extend_sample_limit_resumes() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 0.5);
        let config = EstimationConfig::new(1e-12)
            .with_chunk_size(500)
            .with_max_samples(1_000);
        let mut estimation = Estimation::with_seed(unit_square(), curves, config, seed(5)).unwrap();
        assert_eq!(estimation.by_ref().count(), 2);

        estimation.extend_sample_limit(500);
        assert!(estimation.status().is_running());
        let snapshot = estimation.next().unwrap();
        assert_eq!(snapshot.samples, 1_500);
        assert!(estimation.status().is_sample_limit_reached());
    }

    #[test]
    fn test_interrupted_run() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 0.5);
        let config = EstimationConfig::new(1e-12).with_chunk_size(100);
        let mut seen = 0;
        let outcome = Estimation::with_seed(unit_square(), curves, config, seed(6))
            .unwrap()
            .run_with(|_| {
                seen += 1;
                if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
        assert_eq!(outcome.stop_reason, StopReason::Interrupted);
        assert_eq!(outcome.snapshot.samples, 300);
        assert_eq!(outcome.seed, seed(6));
    }

    #[test]
    fn test_same_seed_same_result() {
        let curves = Band::new(|_: f64| 0.0, |x: f64| x * x);
        let config = EstimationConfig::new(0.01);
        let a = Estimation::with_seed(unit_square(), curves, config, seed(7))
            .unwrap()
            .run();
        let b = Estimation::with_seed(unit_square(), curves, config, seed(7))
            .unwrap()
            .run();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let curves = Band::new(|_: f64| 0.0, |_: f64| 1.0);
        let result = Estimation::new(unit_square(), curves, EstimationConfig::new(-0.1));
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveTolerance { .. })
        ));
    }

    #[test]
    fn test_zero_area_region_converges() {
        let region = SampleRegion::from_bounds((1.0, 1.0), (0.0, 1.0)).unwrap();
        let curves = Band::new(|_: f64| 0.0, |_: f64| 1.0);
        let outcome = Estimation::with_seed(region, curves, EstimationConfig::default(), seed(8))
            .unwrap()
            .run();
        assert!(outcome.stop_reason.is_converged());
        assert_eq!(outcome.snapshot.estimate, 0.0);
    }
}
