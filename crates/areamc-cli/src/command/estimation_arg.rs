use std::path::PathBuf;

use areamc_engine::{EstimationConfig, Interval, SampleRegion, Seed};

use crate::{
    model::{curves::CurvePreset, run_config::RunConfig},
    util,
};

/// Options shared by every command that runs an estimation.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EstimationArg {
    /// JSON file with a run configuration; other flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bounding curves to estimate the area between
    #[arg(long, value_enum)]
    curves: Option<CurvePreset>,
    /// Lower x bound of the sampling region
    #[arg(long, allow_negative_numbers = true)]
    x_min: Option<f64>,
    /// Upper x bound of the sampling region
    #[arg(long, allow_negative_numbers = true)]
    x_max: Option<f64>,
    /// Lower y bound of the sampling region
    #[arg(long, allow_negative_numbers = true)]
    y_min: Option<f64>,
    /// Upper y bound of the sampling region
    #[arg(long, allow_negative_numbers = true)]
    y_max: Option<f64>,
    /// Stop once the standard deviation is at or below this value [default: 0.005]
    #[arg(long)]
    tolerance: Option<f64>,
    /// Samples drawn between convergence checks [default: 10000]
    #[arg(long)]
    chunk_size: Option<u64>,
    /// Give up after this many samples [default: 100000000]
    #[arg(long)]
    max_samples: Option<u64>,
    /// 32-digit hex seed for reproducible runs
    #[arg(long)]
    seed: Option<Seed>,
}

/// A run configuration with the region and seed filled in.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub curves: CurvePreset,
    pub region: SampleRegion,
    pub estimation: EstimationConfig,
    pub seed: Option<Seed>,
}

impl EstimationArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<ResolvedConfig> {
        let base = match &self.config {
            Some(path) => util::read_json_file::<RunConfig>("run config", path)?,
            None => RunConfig::from_preset(self.curves.unwrap_or_default()),
        };
        self.apply(base)
    }

    fn apply(&self, base: RunConfig) -> anyhow::Result<ResolvedConfig> {
        let curves = self.curves.unwrap_or(base.curves);
        let region = match base.region {
            Some(region) if self.curves.is_none_or(|c| c == base.curves) => region,
            _ => curves.default_region()?,
        };
        let x = Interval::new(
            self.x_min.unwrap_or(region.x().lo()),
            self.x_max.unwrap_or(region.x().hi()),
        )?;
        let y = Interval::new(
            self.y_min.unwrap_or(region.y().lo()),
            self.y_max.unwrap_or(region.y().hi()),
        )?;

        let mut estimation = base.estimation;
        if let Some(tolerance) = self.tolerance {
            estimation.tolerance = tolerance;
        }
        if let Some(chunk_size) = self.chunk_size {
            estimation.chunk_size = chunk_size;
        }
        if let Some(max_samples) = self.max_samples {
            estimation.max_samples = max_samples;
        }
        estimation.validate()?;

        Ok(ResolvedConfig {
            curves,
            region: SampleRegion::new(x, y)?,
            estimation,
            seed: self.seed.or(base.seed),
        })
    }
}
