//! The driving loop: sample, record, check.
//!
//! [`Estimation`] ties a [`PointSampler`](crate::PointSampler), a
//! [`HitTest`](crate::HitTest) and an
//! [`IncrementalEstimator`](areamc_stats::incremental::IncrementalEstimator)
//! together and exposes the run as an iterator of snapshots, stopped by
//! [`EstimationConfig`].

pub use self::{config::*, run::*};

mod config;
mod run;
