use std::f64::consts::PI;

use areamc_engine::{Band, CurveFn, RegionError, SampleRegion};
use serde::{Deserialize, Serialize};

/// Built-in pairs of bounding curves, each with a default sampling region.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    clap::ValueEnum,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CurvePreset {
    /// Between 4 sin(x) and x^x sin(x), x in [2, pi], y in [0, 7]
    #[default]
    #[display("power-sine")]
    PowerSine,
    /// Every point is a hit; the estimate is the region area
    #[display("full")]
    Full,
    /// Under sqrt(1 - x^2) on the unit square; the area is pi/4
    #[display("quarter-circle")]
    QuarterCircle,
}

fn power_sine_lower(x: f64) -> f64 {
    x.sin() * 4.0
}

fn power_sine_upper(x: f64) -> f64 {
    x.powf(x) * x.sin()
}

fn quarter_circle_upper(x: f64) -> f64 {
    (1.0 - x * x).max(0.0).sqrt()
}

fn zero(_: f64) -> f64 {
    0.0
}

fn neg_infinity(_: f64) -> f64 {
    f64::NEG_INFINITY
}

fn infinity(_: f64) -> f64 {
    f64::INFINITY
}

impl CurvePreset {
    #[must_use]
    pub fn band(self) -> Band<CurveFn, CurveFn> {
        let (lower, upper): (CurveFn, CurveFn) = match self {
            Self::PowerSine => (power_sine_lower, power_sine_upper),
            Self::Full => (neg_infinity, infinity),
            Self::QuarterCircle => (zero, quarter_circle_upper),
        };
        Band::new(lower, upper)
    }

    pub fn default_region(self) -> Result<SampleRegion, RegionError> {
        match self {
            Self::PowerSine => SampleRegion::from_bounds((2.0, PI), (0.0, 7.0)),
            Self::Full | Self::QuarterCircle => SampleRegion::from_bounds((0.0, 1.0), (0.0, 1.0)),
        }
    }

    /// Exact area for the default region, where known in closed form.
    #[must_use]
    pub fn known_area(self) -> Option<f64> {
        match self {
            Self::PowerSine => None,
            Self::Full => Some(1.0),
            Self::QuarterCircle => Some(PI / 4.0),
        }
    }
}
