use std::{path::PathBuf, time::Instant};

use areamc_engine::Estimation;
use areamc_stats::percentiles::SUMMARY_POINTS;
use chrono::Utc;
use rand::Rng as _;

use crate::{
    model::report::{BatchReport, BatchSummary, RunReport},
    util,
};

use super::estimation_arg::EstimationArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    #[clap(flatten)]
    estimation: EstimationArg,
    /// Number of independent runs
    #[arg(long, default_value_t = 10)]
    runs: usize,
    /// Write the JSON report to a file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let BatchArg {
        estimation,
        runs,
        output,
    } = arg;
    anyhow::ensure!(*runs > 0, "--runs must be at least 1");

    let config = estimation.resolve()?;
    let master_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!(
        "Running {runs} {} estimations (master seed {master_seed})",
        config.curves
    );

    let mut reports = Vec::with_capacity(*runs);
    for (i, seed) in master_seed.child_seeds().take(*runs).enumerate() {
        let started_at = Utc::now();
        let start = Instant::now();
        let outcome =
            Estimation::with_seed(config.region, config.curves.band(), config.estimation, seed)?
                .run();
        let report = RunReport::new(
            config.curves,
            config.region,
            config.estimation,
            started_at,
            start.elapsed().as_secs_f64(),
            &outcome,
        );
        eprintln!("  {i:3}: {} ({})", report.summary_line(), report.stop_reason);
        reports.push(report);
    }

    let summary = BatchSummary::from_reports(&reports, &SUMMARY_POINTS)
        .ok_or_else(|| anyhow::anyhow!("no runs to summarize"))?;

    println!("Runs: {} ({} converged)", summary.runs, summary.converged);
    println!("Estimate:");
    println!("  Min:    {:.6}", summary.min);
    println!("  Max:    {:.6}", summary.max);
    println!("  Mean:   {:.6}", summary.mean);
    println!("  Median: {:.6}", summary.median);
    println!("  StdDev: {:.6}", summary.std_dev);
    println!("Percentiles:");
    for (p, value) in &summary.percentiles {
        println!("  P{p:<3}   {value:.6}");
    }

    if let Some(path) = output {
        let report = BatchReport {
            master_seed,
            summary,
            runs: reports,
        };
        util::save_json(&report, Some(path.as_path()))?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}
