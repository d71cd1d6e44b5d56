use areamc_engine::{EstimationConfig, SampleRegion, Seed};
use serde::{Deserialize, Serialize};

use super::curves::CurvePreset;

/// Everything needed to reproduce an estimation run.
///
/// Can be loaded from a JSON file with `--config`; command-line flags given
/// explicitly override the file's values.
///
/// ```json
/// {
///   "curves": "quarter-circle",
///   "region": { "x": [0.0, 1.0], "y": [0.0, 1.0] },
///   "estimation": { "tolerance": 0.001 },
///   "seed": "0123456789abcdeffedcba9876543210"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub curves: CurvePreset,
    /// Defaults to the preset's own region.
    #[serde(default)]
    pub region: Option<SampleRegion>,
    #[serde(default)]
    pub estimation: EstimationConfig,
    /// Drawn from the OS random source when absent.
    #[serde(default)]
    pub seed: Option<Seed>,
}

impl RunConfig {
    #[must_use]
    pub fn from_preset(curves: CurvePreset) -> Self {
        Self {
            curves,
            region: None,
            estimation: EstimationConfig::default(),
            seed: None,
        }
    }
}
