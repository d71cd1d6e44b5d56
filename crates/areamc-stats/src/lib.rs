//! Statistical building blocks for Monte Carlo area estimation.
//!
//! - [`incremental`]: online (Welford) accumulator of the running area estimate
//!   with a standard-deviation convergence test
//! - [`descriptive`]: min, max, mean, median and spread of a set of estimates
//! - [`percentiles`]: nearest-rank percentiles of a set of estimates
//!
//! # Examples
//!
//! ```
//! use areamc_stats::incremental::IncrementalEstimator;
//!
//! let mut estimator = IncrementalEstimator::new(4.0);
//! for hit in [true, false, true, true] {
//!     estimator.record_sample(hit);
//! }
//! assert_eq!(estimator.hit_count(), 3);
//! assert_eq!(estimator.current_value(), 3.0);
//! ```
//!
//! ```
//! use areamc_stats::descriptive::DescriptiveStats;
//!
//! let estimates = [0.78, 0.79, 0.785];
//! let stats = DescriptiveStats::new(estimates).unwrap();
//! assert_eq!(stats.median, 0.785);
//! ```

pub mod descriptive;
pub mod incremental;
pub mod percentiles;
