//! This module implements RandomEngine on top of the abstractions of the
//! standard "random" crate.

use super::RandomEngine;
use crate::numeric::Float;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Default seed, kept from the historical driver for reproducibility
pub const DEFAULT_SEED: u64 = 12345;

/// Facade which makes the rand crate look like a RandomEngine
#[derive(Clone, Debug)]
pub struct RandGenerator {
    rng: Engine,
}
//
impl RandGenerator {
    /// Spawn a new random number generator with the default seed
    pub fn new() -> Self {
        Self::seeded(DEFAULT_SEED)
    }

    /// Spawn a new random number generator with an arbitrary seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Advance state to a statistically independent stream
    ///
    /// Jumps are deterministic, so that a batch of particles gets the same
    /// stream no matter which thread ends up processing it.
    pub fn jump(&mut self) {
        self.rng.jump();
    }
}

impl Default for RandGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine for RandGenerator {
    fn uniform(&mut self) -> Float {
        // gen() draws in [0, 1), flip it to get (0, 1]
        1. - self.rng.gen::<Float>()
    }

    fn normal(&mut self, mean: Float, std_dev: Float) -> Float {
        let z: Float = StandardNormal.sample(&mut self.rng);
        mean + std_dev * z
    }
}
