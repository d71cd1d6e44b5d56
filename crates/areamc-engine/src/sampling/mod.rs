//! Seeded uniform point generation.

pub use self::{sampler::*, seed::*};

mod sampler;
mod seed;
