use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stopping parameters for an [`Estimation`](super::Estimation).
///
/// # Example
///
/// ```
/// use areamc_engine::EstimationConfig;
///
/// let config = EstimationConfig::new(0.005)
///     .with_chunk_size(1_000)
///     .with_max_samples(5_000_000);
/// assert!(config.validate().is_ok());
///
/// assert!(EstimationConfig::new(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Largest acceptable standard deviation of the running estimate.
    pub tolerance: f64,
    /// Samples drawn between two convergence checks.
    pub chunk_size: u64,
    /// Hard cap on the total number of samples.
    pub max_samples: u64,
}

impl EstimationConfig {
    pub const DEFAULT_TOLERANCE: f64 = 0.005;
    pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;
    pub const DEFAULT_MAX_SAMPLES: u64 = 100_000_000;

    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            max_samples: Self::DEFAULT_MAX_SAMPLES,
        }
    }

    #[must_use]
    pub fn with_chunk_size(self, chunk_size: u64) -> Self {
        Self { chunk_size, ..self }
    }

    #[must_use]
    pub fn with_max_samples(self, max_samples: u64) -> Self {
        Self {
            max_samples,
            ..self
        }
    }

    /// Rejects settings under which a run could not make progress or stop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance {
                tolerance: self.tolerance,
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroSampleLimit);
        }
        Ok(())
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EstimationConfig::default();
        assert_eq!(config.tolerance, 0.005);
        assert_eq!(config.chunk_size, 10_000);
        assert_eq!(config.max_samples, 100_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for tolerance in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                EstimationConfig::new(tolerance).validate(),
                Err(ConfigError::NonPositiveTolerance { .. })
            ));
        }
        assert!(EstimationConfig::new(f64::INFINITY).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_limits() {
        assert!(matches!(
            EstimationConfig::default().with_chunk_size(0).validate(),
            Err(ConfigError::ZeroChunkSize)
        ));
        assert!(matches!(
            EstimationConfig::default().with_max_samples(0).validate(),
            Err(ConfigError::ZeroSampleLimit)
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EstimationConfig = serde_json::from_str(r#"{"tolerance":0.01}"#).unwrap();
        assert_eq!(config, EstimationConfig::new(0.01));
    }
}
