//! Sequential back-end of the sampling

use crate::{moments::MomentAccumulator, random::RandomGenerator, scheduling::batch_size};

/// Sample particles in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs. It also keeps the
/// accumulated sums from growing much larger than the accumulated values.
///
pub fn run_sampling_impl(
    num_particles: usize,
    streams: Vec<RandomGenerator>,
    sample_particles: impl Fn(usize, &mut RandomGenerator) -> MomentAccumulator,
) -> MomentAccumulator {
    assert!(!streams.is_empty(), "There should be at least one batch");
    streams
        .into_iter()
        .enumerate()
        .map(|(batch_id, mut rng)| sample_particles(batch_size(num_particles, batch_id), &mut rng))
        .fold(MomentAccumulator::new(), |mut acc, batch| {
            acc.merge(batch);
            acc
        })
}
