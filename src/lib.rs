//! Momentum injection for particle-in-cell plasma simulations
//!
//! When a simulation creates new particles, it needs to give them a momentum.
//! This crate provides the distributions that such momenta are drawn from,
//! behind a single closed dispatcher, [`InjectorMomentum`]:
//!
//! * A constant momentum, identical for every particle
//! * Uniform and gaussian distributions, independent on each axis
//! * A flux-weighted gaussian, for particles entering through a surface
//! * Drifting Maxwell-Boltzmann and Maxwell-Jüttner plasmas, whose temperature
//!   and drift speed may vary in space
//! * A radial expansion, where momentum grows linearly with the distance to
//!   the origin
//! * User-provided functions of position for each momentum component
//!
//! Momenta are normalized, u = γ·v/c. Each distribution can draw a random
//! momentum at some position with `sample`, and report the mean drift momentum
//! at that position with `bulk_mean`.
//!
//! Randomness comes from a [`random::RandomEngine`], which each execution lane
//! must own. A single [`InjectorMomentum`] may be shared by all lanes.
//!
//! Invalid physical input found at sampling time (negative temperature,
//! superluminal drift...) is fatal: the sampler panics. Configuration files
//! are checked beforehand and get reported as regular errors.

#![warn(missing_docs)]

pub mod config;
pub mod fields;
pub mod injector;
pub mod momentum;
pub mod moments;
pub mod numeric;
pub mod output;
pub mod random;
pub mod scheduling;

pub use crate::{
    config::Configuration,
    injector::{InjectorMomentum, Type},
    momentum::{Axis, MomentumVector},
    numeric::Float,
};

use crate::{
    moments::{MomentAccumulator, MomentResults},
    random::RandomGenerator,
};

/// Sample the configured number of particles at the configured position, and
/// compute the moments of their momentum distribution
pub fn sample_moments(cfg: &Configuration) -> MomentResults {
    let [x, y, z] = [cfg.position[0], cfg.position[1], cfg.position[2]];
    let injector = &cfg.injector;

    // This kernel samples a number of particles, given an initial random
    // number generator state, and returns the accumulated moments
    let sample_particles = |num_particles: usize, rng: &mut RandomGenerator| {
        let mut accumulator = MomentAccumulator::new();
        for _ in 0..num_particles {
            accumulator.integrate(&injector.sample(x, y, z, rng));
        }
        accumulator
    };

    scheduling::run_sampling(cfg.num_particles, cfg.seed, sample_particles)
}
