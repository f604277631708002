//! Multi-threaded back-end of the sampling

use crate::{moments::MomentAccumulator, random::RandomGenerator, scheduling::batch_size};
use std::sync::Mutex;

/// Sample particles in multi-threaded mode
///
/// Takes one random number stream per batch as input, and does not finalize
/// the output results.
///
pub fn run_sampling_impl(
    num_particles: usize,
    streams: Vec<RandomGenerator>,
    sample_particles: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> MomentAccumulator,
) -> MomentAccumulator {
    let accumulator = ReproducibleAccumulator::new(streams.len());

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for (batch_id, mut task_rng) in streams.into_iter().enumerate() {
            let accumulator_ref = &accumulator;
            let sample_particles_ref = &sample_particles;
            scope.spawn(move |_| {
                let batch_size = batch_size(num_particles, batch_id);
                let result = sample_particles_ref(batch_size, &mut task_rng);
                accumulator_ref.set_task_result(batch_id, result);
            });
        }
    });

    accumulator.get_merged_result()
}

/// Results storage which merges batches in a reproducible order
struct ReproducibleAccumulator {
    /// Storage for the intermediary results of parallel tasks
    results: Box<[Mutex<Option<MomentAccumulator>>]>,
}
//
impl ReproducibleAccumulator {
    /// Set up results storage for N parallel tasks
    fn new(num_tasks: usize) -> Self {
        assert!(num_tasks > 0, "There should be at least one task");
        Self {
            results: (0..num_tasks)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Record the results of the n-th sampling task
    fn set_task_result(&self, task_id: usize, result: MomentAccumulator) {
        let mut lock = self.results[task_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Tasks should not report results twice");
        *lock = Some(result);
    }

    /// Aggregate the results in batch order
    fn get_merged_result(self) -> MomentAccumulator {
        self.results
            .into_vec()
            .into_iter()
            .map(|entry| {
                entry
                    .into_inner()
                    .expect("Mutex data should be valid")
                    .expect("Result should be ready")
            })
            .fold(MomentAccumulator::new(), |mut acc, batch| {
                acc.merge(batch);
                acc
            })
    }
}
