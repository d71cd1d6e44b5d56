/// Decides whether a sampled point counts as a hit.
///
/// Implemented for [`Band`] and for any `Fn(f64, f64) -> bool` closure.
pub trait HitTest {
    fn is_hit(&self, x: f64, y: f64) -> bool;
}

impl<F> HitTest for F
where
    F: Fn(f64, f64) -> bool,
{
    fn is_hit(&self, x: f64, y: f64) -> bool {
        self(x, y)
    }
}

/// The set of points lying between a lower and an upper bounding curve.
///
/// A point `(x, y)` is a hit when `lower(x) <= y <= upper(x)`. Where the
/// curves cross (`lower(x) > upper(x)`) nothing is a hit.
///
/// # Example
///
/// ```
/// use areamc_engine::{Band, HitTest};
///
/// let band = Band::new(|x: f64| x, |x: f64| 2.0 * x);
/// assert!(band.is_hit(1.0, 1.5));
/// assert!(band.is_hit(1.0, 2.0));
/// assert!(!band.is_hit(1.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Band<L, U> {
    lower: L,
    upper: U,
}

impl<L, U> Band<L, U>
where
    L: Fn(f64) -> f64,
    U: Fn(f64) -> f64,
{
    #[must_use]
    pub fn new(lower: L, upper: U) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn lower(&self, x: f64) -> f64 {
        (self.lower)(x)
    }

    #[must_use]
    pub fn upper(&self, x: f64) -> f64 {
        (self.upper)(x)
    }
}

impl<L, U> HitTest for Band<L, U>
where
    L: Fn(f64) -> f64,
    U: Fn(f64) -> f64,
{
    fn is_hit(&self, x: f64, y: f64) -> bool {
        y <= self.upper(x) && y >= self.lower(x)
    }
}

/// Bounding curve type used by the built-in curve sets.
pub type CurveFn = fn(f64) -> f64;
