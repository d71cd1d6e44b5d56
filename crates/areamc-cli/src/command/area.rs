use std::{
    ops::ControlFlow,
    path::PathBuf,
    time::{Duration, Instant},
};

use areamc_engine::{Estimation, StopReason};
use areamc_stats::incremental::EstimatorSnapshot;
use chrono::Utc;
use rand::Rng as _;

use crate::{model::report::RunReport, util};

use super::estimation_arg::EstimationArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AreaArg {
    #[clap(flatten)]
    estimation: EstimationArg,
    /// Print the running estimate after every chunk
    #[arg(long, default_value_t = false)]
    progress: bool,
    /// Stop after this many seconds even if not converged
    #[arg(long, value_parser = parse_time_limit)]
    time_limit: Option<Duration>,
    /// Print the JSON report instead of the summary line
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Write the JSON report to a file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AreaArg) -> anyhow::Result<()> {
    let AreaArg {
        estimation,
        progress,
        time_limit,
        json,
        output,
    } = arg;
    let config = estimation.resolve()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    eprintln!(
        "Estimating {} area over x in [{}, {}], y in [{}, {}] (seed {seed})",
        config.curves,
        config.region.x().lo(),
        config.region.x().hi(),
        config.region.y().lo(),
        config.region.y().hi(),
    );

    let started_at = Utc::now();
    let watch = RunWatch::new(*time_limit, *progress);
    let estimation =
        Estimation::with_seed(config.region, config.curves.band(), config.estimation, seed)?;
    let outcome = estimation.run_with(|snapshot| watch.observe(snapshot));

    let report = RunReport::new(
        config.curves,
        config.region,
        config.estimation,
        started_at,
        watch.start.elapsed().as_secs_f64(),
        &outcome,
    );

    match report.stop_reason {
        StopReason::Converged => {}
        StopReason::SampleLimitReached => eprintln!(
            "Warning: sample limit of {} reached before the standard deviation fell to {}",
            config.estimation.max_samples, config.estimation.tolerance
        ),
        StopReason::Interrupted => eprintln!("Warning: stopped before convergence"),
    }
    if config.region == config.curves.default_region()? {
        if let Some(known) = config.curves.known_area() {
            eprintln!("  Exact area: {known:.6}");
        }
    }
    eprintln!("  Elapsed: {:.3}s", report.elapsed_secs);

    if !*json {
        println!("{}", report.summary_line());
    }
    if *json || output.is_some() {
        util::save_json(&report, output.as_deref())?;
    }
    if let Some(path) = output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Parses `--time-limit` seconds, rejecting negative, NaN and infinite values.
fn parse_time_limit(s: &str) -> Result<Duration, String> {
    let secs = s.parse::<f64>().map_err(|e| e.to_string())?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid time limit {secs}: {e}"))
}

/// Per-chunk observer: prints progress and enforces the wall-clock limit.
#[derive(Debug, Clone, Copy)]
struct RunWatch {
    start: Instant,
    time_limit: Option<Duration>,
    progress: bool,
}

impl RunWatch {
    fn new(time_limit: Option<Duration>, progress: bool) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
            progress,
        }
    }

    fn observe(&self, snapshot: &EstimatorSnapshot) -> ControlFlow<()> {
        if self.progress {
            eprintln!(
                "  N={}: {:.6} +/- {:.6}",
                snapshot.samples, snapshot.estimate, snapshot.std_dev
            );
        }
        if self
            .time_limit
            .is_some_and(|limit| self.start.elapsed() >= limit)
        {
            eprintln!("Time limit reached");
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use areamc_engine::{Band, CurveFn, EstimationConfig, Seed};
    use clap::Parser;

    use super::*;
    use crate::model::curves::CurvePreset;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        area: AreaArg,
    }

    fn power_sine_run(config: EstimationConfig) -> Estimation<Band<CurveFn, CurveFn>> {
        let preset = CurvePreset::PowerSine;
        let region = preset.default_region().unwrap();
        Estimation::with_seed(region, preset.band(), config, Seed::from_bytes([3; 16])).unwrap()
    }

    #[test]
    fn test_parse_time_limit() {
        assert_eq!(parse_time_limit("0.5"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_time_limit("0"), Ok(Duration::ZERO));
        assert!(parse_time_limit("nan").is_err());
        assert!(parse_time_limit("inf").is_err());
        assert!(parse_time_limit("-1").is_err());
        assert!(parse_time_limit("soon").is_err());
    }

    #[test]
    fn test_time_limit_flag() {
        let cli = TestCli::parse_from(["test", "--time-limit", "2.5"]);
        assert_eq!(cli.area.time_limit, Some(Duration::from_millis(2500)));
        assert!(TestCli::try_parse_from(["test", "--time-limit", "NaN"]).is_err());
        assert!(TestCli::try_parse_from(["test", "--time-limit=-3"]).is_err());
    }

    #[test]
    fn test_zero_time_limit_interrupts_after_first_chunk() {
        let config = EstimationConfig::new(1e-9).with_chunk_size(1_000);
        let watch = RunWatch::new(Some(Duration::ZERO), false);
        let outcome = power_sine_run(config).run_with(|snapshot| watch.observe(snapshot));
        assert_eq!(outcome.stop_reason, StopReason::Interrupted);
        assert_eq!(outcome.snapshot.samples, 1_000);
    }

    #[test]
    fn test_no_time_limit_runs_to_sample_limit() {
        let config = EstimationConfig::new(1e-9)
            .with_chunk_size(1_000)
            .with_max_samples(3_000);
        let watch = RunWatch::new(None, false);
        let outcome = power_sine_run(config).run_with(|snapshot| watch.observe(snapshot));
        assert_eq!(outcome.stop_reason, StopReason::SampleLimitReached);
        assert_eq!(outcome.snapshot.samples, 3_000);
    }
}
