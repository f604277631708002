//! Random number generation. Momentum distributions only see the engine
//! through the RandomEngine trait, the concrete generator is built on top of
//! the "rand" crate that is the Rust standard for RNGs.

mod standard;

use crate::numeric::Float;

pub use self::standard::{RandGenerator as RandomGenerator, DEFAULT_SEED};

/// Source of random numbers for one parallel execution lane
///
/// Each lane must own its engine, and engines used concurrently must produce
/// statistically independent streams.
///
pub trait RandomEngine {
    /// Generate a uniformly distributed number in (0, 1]
    ///
    /// Zero is excluded so that callers may safely take the logarithm or the
    /// inverse of the result.
    fn uniform(&mut self) -> Float;

    /// Generate a normally distributed number with given mean and spread
    fn normal(&mut self, mean: Float, std_dev: Float) -> Float;
}

impl<R: RandomEngine + ?Sized> RandomEngine for &mut R {
    fn uniform(&mut self) -> Float {
        (**self).uniform()
    }

    fn normal(&mut self, mean: Float, std_dev: Float) -> Float {
        (**self).normal(mean, std_dev)
    }
}
