use areamc_engine::{EstimationConfig, Outcome, SampleRegion, Seed, StopReason};
use areamc_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::curves::CurvePreset;

/// Result of a single estimation run, as written by `--output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub curves: CurvePreset,
    pub region: SampleRegion,
    pub estimation: EstimationConfig,
    pub seed: Seed,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub stop_reason: StopReason,
    pub samples: u64,
    pub hits: u64,
    pub estimate: f64,
    pub std_dev: f64,
}

impl RunReport {
    #[must_use]
    pub fn new(
        curves: CurvePreset,
        region: SampleRegion,
        estimation: EstimationConfig,
        started_at: DateTime<Utc>,
        elapsed_secs: f64,
        outcome: &Outcome,
    ) -> Self {
        Self {
            curves,
            region,
            estimation,
            seed: outcome.seed,
            started_at,
            elapsed_secs,
            stop_reason: outcome.stop_reason,
            samples: outcome.snapshot.samples,
            hits: outcome.snapshot.hits,
            estimate: outcome.snapshot.estimate,
            std_dev: outcome.snapshot.std_dev,
        }
    }

    /// One-line summary, `N=<samples>: area = <estimate> +/- <std dev>`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "N={}: area = {:.3} +/- {:.3}",
            self.samples, self.estimate, self.std_dev
        )
    }
}

/// Spread of the final estimates across a batch of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub converged: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// `(percentile, estimate)` pairs.
    pub percentiles: Vec<(f64, f64)>,
}

impl BatchSummary {
    /// Returns `None` for an empty batch.
    #[must_use]
    pub fn from_reports(reports: &[RunReport], percentile_points: &[f64]) -> Option<Self> {
        let estimates = reports.iter().map(|r| r.estimate).collect::<Vec<_>>();
        let stats = DescriptiveStats::new(estimates.iter().copied())?;
        let percentiles = Percentiles::new(estimates, percentile_points);
        let converged = reports
            .iter()
            .filter(|r| r.stop_reason.is_converged())
            .count();
        Some(Self {
            runs: stats.count,
            converged,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
            percentiles: percentiles.iter().collect(),
        })
    }
}

/// Output of the `batch` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub master_seed: Seed,
    pub summary: BatchSummary,
    pub runs: Vec<RunReport>,
}

#[cfg(test)]
mod tests {
    use areamc_engine::{Estimation, EstimationConfig};
    use areamc_stats::percentiles::SUMMARY_POINTS;

    use super::*;

    fn report(seed: u8, estimate: f64, stop_reason: StopReason) -> RunReport {
        RunReport {
            curves: CurvePreset::QuarterCircle,
            region: CurvePreset::QuarterCircle.default_region().unwrap(),
            estimation: EstimationConfig::default(),
            seed: Seed::from_bytes([seed; 16]),
            started_at: DateTime::<Utc>::UNIX_EPOCH,
            elapsed_secs: 0.5,
            stop_reason,
            samples: 10_000,
            hits: 7_850,
            estimate,
            std_dev: 0.004,
        }
    }

    #[test]
    fn test_summary_line_format() {
        let mut report = report(1, 3.239_705, StopReason::Converged);
        report.samples = 3_980_000;
        report.std_dev = 0.004_997;
        assert_eq!(report.summary_line(), "N=3980000: area = 3.240 +/- 0.005");
    }

    #[test]
    fn test_report_from_outcome() {
        let preset = CurvePreset::Full;
        let region = preset.default_region().unwrap();
        let config = EstimationConfig::default();
        let seed = Seed::from_bytes([1; 16]);
        let outcome = Estimation::with_seed(region, preset.band(), config, seed)
            .unwrap()
            .run();
        let started_at = DateTime::<Utc>::UNIX_EPOCH;
        let report = RunReport::new(preset, region, config, started_at, 0.0, &outcome);
        assert_eq!(report.stop_reason, StopReason::Converged);
        assert_eq!(report.samples, 10_000);
        assert_eq!(report.hits, 10_000);
        assert_eq!(report.estimate, 1.0);
        assert_eq!(report.summary_line(), "N=10000: area = 1.000 +/- 0.000");
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = report(4, 0.786, StopReason::SampleLimitReached);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""stop_reason":"sample-limit-reached""#));
        assert!(json.contains(r#""curves":"quarter-circle""#));
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seed, report.seed);
        assert_eq!(parsed.region, report.region);
        assert_eq!(parsed.started_at, report.started_at);
        assert_eq!(parsed.samples, report.samples);
    }

    #[test]
    fn test_batch_summary() {
        let reports = [
            report(1, 0.78, StopReason::Converged),
            report(2, 0.79, StopReason::Converged),
            report(3, 0.80, StopReason::SampleLimitReached),
        ];
        let summary = BatchSummary::from_reports(&reports, &SUMMARY_POINTS).unwrap();
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.converged, 2);
        assert_eq!(summary.min, 0.78);
        assert_eq!(summary.max, 0.80);
        assert_eq!(summary.median, 0.79);
        assert!((summary.mean - 0.79).abs() < 1e-12);
        assert_eq!(summary.percentiles.len(), SUMMARY_POINTS.len());
    }

    #[test]
    fn test_empty_batch_has_no_summary() {
        assert!(BatchSummary::from_reports(&[], &SUMMARY_POINTS).is_none());
    }
}
