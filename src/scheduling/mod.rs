//! This module takes care of scheduling the sampling work, encapsulating use
//! of multiple threads

#[cfg(not(feature = "multi-threading"))]
mod sequential;
#[cfg(feature = "multi-threading")]
mod multi_threading;

use crate::{
    moments::{MomentAccumulator, MomentResults},
    random::RandomGenerator,
};

/// Size of the sampled particle batches
///
/// Particles are grouped in batches of a certain size in order to reduce
/// accumulation error and achieve perfect reproducibility between sequential
/// and parallel runs. Each batch draws from its own random number stream.
///
pub const PARTICLE_BATCH_SIZE: usize = 10_000;

/// Number of batches needed to sample a certain amount of particles
fn num_batches(num_particles: usize) -> usize {
    num_particles / PARTICLE_BATCH_SIZE + usize::from(num_particles % PARTICLE_BATCH_SIZE != 0)
}

/// Size of the n-th batch of a run
fn batch_size(num_particles: usize, batch_id: usize) -> usize {
    (num_particles - batch_id * PARTICLE_BATCH_SIZE).min(PARTICLE_BATCH_SIZE)
}

/// Random number stream of each batch
///
/// The n-th batch gets the seeded stream after n jumps, so results do not
/// depend on which thread processes which batch.
///
fn batch_streams(num_batches: usize, mut rng: RandomGenerator) -> Vec<RandomGenerator> {
    (0..num_batches)
        .map(|_| {
            let stream = rng.clone();
            rng.jump();
            stream
        })
        .collect()
}

/// Run the sampling in the manner that was configured at build time.
///
/// Takes as parameters the total number of particles to be sampled, the seed
/// of the random number generator, and a kernel that samples a certain number
/// of particles given a random number generator.
///
/// Returns the finalized moments of the sampled momenta.
///
pub fn run_sampling(
    num_particles: usize,
    seed: u64,
    sample_particles: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> MomentAccumulator,
) -> MomentResults {
    // Should have already been checked at configuration time
    assert!(num_particles > 0, "Must sample at least one particle");

    let num_batches = num_batches(num_particles);
    log::debug!(
        "Sampling {} particles in {} batches",
        num_particles,
        num_batches
    );
    let streams = batch_streams(num_batches, RandomGenerator::seeded(seed));

    // Integrate sampling results...
    let accumulator = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            sequential::run_sampling_impl(num_particles, streams, sample_particles)
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            multi_threading::run_sampling_impl(num_particles, streams, sample_particles)
        }
    };

    assert_eq!(
        accumulator.num_particles(),
        num_particles,
        "Every particle should be sampled exactly once"
    );
    log::debug!("Merged the moments of {} particles", accumulator.num_particles());
    accumulator.finalize()
}
