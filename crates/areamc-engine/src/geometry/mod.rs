//! Sampling rectangle and hit predicates.
//!
//! - [`Interval`] and [`SampleRegion`] describe the rectangle points are drawn from
//! - [`HitTest`] decides whether a point counts, with [`Band`] covering the
//!   common case of a region bounded by two curves

pub use self::{curves::*, region::*};

mod curves;
mod region;
