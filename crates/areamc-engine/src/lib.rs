//! Monte Carlo estimation of the area between two curves.
//!
//! - [`geometry`]: the sampling rectangle ([`SampleRegion`]) and hit predicates
//!   ([`HitTest`], [`Band`])
//! - [`sampling`]: seeded uniform point generation ([`PointSampler`], [`Seed`])
//! - [`estimation`]: the lazy, capped estimation run ([`Estimation`])
//!
//! # Example
//!
//! ```
//! use areamc_engine::{Band, Estimation, EstimationConfig, SampleRegion};
//!
//! let region = SampleRegion::from_bounds((0.0, 2.0), (0.0, 1.0)).unwrap();
//! // Everything below the diagonal y = x / 2: area 1
//! let curves = Band::new(|_: f64| 0.0, |x: f64| x / 2.0);
//!
//! let mut estimation = Estimation::new(region, curves, EstimationConfig::new(0.01)).unwrap();
//! for snapshot in estimation.by_ref() {
//!     println!("N={}: {:.3} +/- {:.3}", snapshot.samples, snapshot.estimate, snapshot.std_dev);
//! }
//! assert!(estimation.status().is_converged());
//! ```

pub use self::{estimation::*, geometry::*, sampling::*};

pub mod estimation;
pub mod geometry;
pub mod sampling;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RegionError {
    #[display("interval bounds must be finite, got [{lo}, {hi}]")]
    NonFiniteBound { lo: f64, hi: f64 },
    #[display("interval lower bound {lo} exceeds upper bound {hi}")]
    ReversedBounds { lo: f64, hi: f64 },
    #[display("interval [{lo}, {hi}] is too wide, its length overflows")]
    InfiniteLength { lo: f64, hi: f64 },
    #[display("region area overflows for width {width} and height {height}")]
    InfiniteArea { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("tolerance must be positive, got {tolerance}")]
    NonPositiveTolerance { tolerance: f64 },
    #[display("chunk size must be at least 1")]
    ZeroChunkSize,
    #[display("sample limit must be at least 1")]
    ZeroSampleLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid seed: {input:?} is not a hex string")]
    InvalidHex { input: String },
}
