use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{SampleRegion, Seed};

/// Draws points uniformly from a [`SampleRegion`].
///
/// Each point consumes two uniform draws in `[0, 1)` from a [`Pcg32`]
/// generator, x first and then y.
///
/// # Example
///
/// ```
/// use areamc_engine::{PointSampler, SampleRegion, Seed};
///
/// let region = SampleRegion::from_bounds((0.0, 1.0), (0.0, 1.0)).unwrap();
/// let seed = Seed::from_bytes([7; 16]);
///
/// let mut a = PointSampler::with_seed(region, seed);
/// let mut b = PointSampler::with_seed(region, seed);
/// assert_eq!(a.sample(), b.sample());
/// ```
#[derive(Debug, Clone)]
pub struct PointSampler {
    rng: Pcg32,
    region: SampleRegion,
    seed: Seed,
}

impl PointSampler {
    /// Creates a sampler seeded from the OS random source.
    ///
    /// For reproducible sampling, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(region: SampleRegion) -> Self {
        Self::with_seed(region, rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(region: SampleRegion, seed: Seed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
            region,
            seed,
        }
    }

    #[must_use]
    pub fn region(&self) -> &SampleRegion {
        &self.region
    }

    /// The seed this sampler started from.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Draws the next point.
    pub fn sample(&mut self) -> (f64, f64) {
        let u = self.rng.random::<f64>();
        let v = self.rng.random::<f64>();
        self.region.point_at(u, v)
    }
}
