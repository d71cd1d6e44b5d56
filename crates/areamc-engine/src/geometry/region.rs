use serde::{Deserialize, Serialize};

use crate::RegionError;

/// A closed interval `[lo, hi]` on the real line.
///
/// Serialized as a two-element array `[lo, hi]`.
///
/// # Example
///
/// ```
/// use areamc_engine::Interval;
///
/// let interval = Interval::new(2.0, 5.0).unwrap();
/// assert_eq!(interval.length(), 3.0);
/// assert_eq!(interval.lerp(0.5), 3.5);
///
/// assert!(Interval::new(1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates an interval, rejecting non-finite bounds, `lo > hi` and a
    /// length that overflows to infinity.
    pub fn new(lo: f64, hi: f64) -> Result<Self, RegionError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(RegionError::NonFiniteBound { lo, hi });
        }
        if lo > hi {
            return Err(RegionError::ReversedBounds { lo, hi });
        }
        if !(hi - lo).is_finite() {
            return Err(RegionError::InfiniteLength { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }

    /// Maps `t` in `[0, 1)` onto the interval.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        self.lo + t * self.length()
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = RegionError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.lo, interval.hi)
    }
}

/// Axis-aligned rectangle that points are sampled from.
///
/// # Example
///
/// ```
/// use areamc_engine::{Interval, SampleRegion};
///
/// let region = SampleRegion::new(
///     Interval::new(0.0, 2.0).unwrap(),
///     Interval::new(-1.0, 2.0).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(region.area(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegionBounds", into = "RegionBounds")]
pub struct SampleRegion {
    x: Interval,
    y: Interval,
}

#[derive(Serialize, Deserialize)]
struct RegionBounds {
    x: Interval,
    y: Interval,
}

impl TryFrom<RegionBounds> for SampleRegion {
    type Error = RegionError;

    fn try_from(RegionBounds { x, y }: RegionBounds) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<SampleRegion> for RegionBounds {
    fn from(SampleRegion { x, y }: SampleRegion) -> Self {
        Self { x, y }
    }
}

impl SampleRegion {
    /// Creates a region, rejecting one whose area overflows to infinity.
    pub fn new(x: Interval, y: Interval) -> Result<Self, RegionError> {
        let area = x.length() * y.length();
        if !area.is_finite() {
            return Err(RegionError::InfiniteArea {
                width: x.length(),
                height: y.length(),
            });
        }
        Ok(Self { x, y })
    }

    /// Builds a region from raw bounds, validating both intervals.
    pub fn from_bounds(x: (f64, f64), y: (f64, f64)) -> Result<Self, RegionError> {
        Self::new(Interval::try_from(x)?, Interval::try_from(y)?)
    }

    #[must_use]
    pub fn x(&self) -> Interval {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> Interval {
        self.y
    }

    /// Product of the two interval lengths.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.x.length() * self.y.length()
    }

    /// Maps a point of the unit square onto the region.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> (f64, f64) {
        (self.x.lerp(u), self.y.lerp(v))
    }
}
