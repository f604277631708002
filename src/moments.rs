//! This module integrates the moments of the sampled momentum distribution,
//! which is how a sampling run checks itself against the expected bulk drift

use crate::{
    momentum::{MomentumVector, MOMENTUM_DIM},
    numeric::Float,
};
use num_traits::Zero;
use prefix_num_ops::real::*;

/// This struct accumulates per-axis sums over sampled momenta, and ultimately
/// computes the final statistics (see MomentResults below).
#[derive(Clone, Debug, PartialEq)]
pub struct MomentAccumulator {
    /// Number of integrated particles
    num_particles: usize,

    /// Sum of momenta
    sum: MomentumVector,

    /// Sum of squared momenta, per axis
    sum_sq: MomentumVector,

    /// Smallest momentum seen on each axis
    min: MomentumVector,

    /// Largest momentum seen on each axis
    max: MomentumVector,
}
//
impl MomentAccumulator {
    /// Prepare for moment integration
    pub fn new() -> Self {
        Self {
            num_particles: 0,
            sum: MomentumVector::zero(),
            sum_sq: MomentumVector::zero(),
            min: MomentumVector::repeat(Float::INFINITY),
            max: MomentumVector::repeat(Float::NEG_INFINITY),
        }
    }

    /// Integrate one sampled momentum
    pub fn integrate(&mut self, u: &MomentumVector) {
        self.num_particles += 1;
        self.sum += u;
        self.sum_sq += u.component_mul(u);
        self.min = self.min.inf(u);
        self.max = self.max.sup(u);
    }

    /// Integrate the moments from another accumulator
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge(&mut self, other: Self) {
        self.num_particles += other.num_particles;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Number of momenta integrated so far
    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    /// Turn the integrated sums into final statistics
    pub fn finalize(self) -> MomentResults {
        assert!(
            self.num_particles > 0,
            "Cannot compute moments without any particle"
        );
        let n = self.num_particles as Float;
        let mean = self.sum / n;

        // Unbiased variance estimate, clamped since rounding errors on a
        // constant distribution may give a tiny negative value
        let variance = if self.num_particles > 1 {
            MomentumVector::from_fn(|dim, _| {
                let var = (self.sum_sq[dim] - self.sum[dim] * self.sum[dim] / n) / (n - 1.);
                var.max(0.)
            })
        } else {
            MomentumVector::zero()
        };
        let std_error = variance.map(|var| sqrt(var / n));

        MomentResults {
            num_particles: self.num_particles,
            mean,
            variance,
            std_error,
            min: self.min,
            max: self.max,
        }
    }
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Final statistics of a sampling run
#[derive(Clone, Debug, PartialEq)]
pub struct MomentResults {
    /// Number of sampled particles
    pub num_particles: usize,

    /// Mean momentum
    pub mean: MomentumVector,

    /// Per-axis variance of the momentum
    pub variance: MomentumVector,

    /// Standard error on the mean momentum
    pub std_error: MomentumVector,

    /// Per-axis minimum of the momentum
    pub min: MomentumVector,

    /// Per-axis maximum of the momentum
    pub max: MomentumVector,
}
//
impl MomentResults {
    /// Distance from the mean to some expected value, in units of the
    /// standard error
    ///
    /// Axes where the standard error is zero give 0 when the mean matches
    /// exactly, and an infinite deviation otherwise.
    ///
    pub fn deviation(&self, expected: &MomentumVector) -> MomentumVector {
        MomentumVector::from_fn(|dim, _| {
            let diff = abs(self.mean[dim] - expected[dim]);
            if diff == 0. {
                0.
            } else {
                diff / self.std_error[dim]
            }
        })
    }

    /// Truth that the mean is compatible with an expected value, within a
    /// certain number of standard errors on every axis
    pub fn is_compatible(&self, expected: &MomentumVector, num_sigmas: Float) -> bool {
        let deviation = self.deviation(expected);
        (0..MOMENTUM_DIM).all(|dim| deviation[dim] <= num_sigmas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulate(momenta: &[MomentumVector]) -> MomentAccumulator {
        let mut acc = MomentAccumulator::new();
        for u in momenta {
            acc.integrate(u);
        }
        acc
    }

    #[test]
    fn statistics_of_known_sample() {
        let results = accumulate(&[
            MomentumVector::new(1., 0., -2.),
            MomentumVector::new(3., 0., 2.),
        ])
        .finalize();
        assert_eq!(results.num_particles, 2);
        assert_eq!(results.mean, MomentumVector::new(2., 0., 0.));
        assert_eq!(results.variance, MomentumVector::new(2., 0., 8.));
        assert_eq!(results.std_error, MomentumVector::new(1., 0., 2.));
        assert_eq!(results.min, MomentumVector::new(1., 0., -2.));
        assert_eq!(results.max, MomentumVector::new(3., 0., 2.));
    }

    #[test]
    fn merging_is_equivalent_to_integrating() {
        let momenta = [
            MomentumVector::new(0.5, 1., -1.),
            MomentumVector::new(-0.5, 2., 4.),
            MomentumVector::new(1.5, 0., 0.25),
        ];
        let mut merged = accumulate(&momenta[..1]);
        merged.merge(accumulate(&momenta[1..]));
        assert_eq!(merged, accumulate(&momenta));
        assert_eq!(merged.num_particles(), 3);
    }

    #[test]
    fn single_particle_has_no_spread() {
        let results = accumulate(&[MomentumVector::new(1., 2., 3.)]).finalize();
        assert_eq!(results.variance, MomentumVector::zero());
        assert!(results.is_compatible(&MomentumVector::new(1., 2., 3.), 0.));
        assert!(!results.is_compatible(&MomentumVector::new(1., 2., 3.5), 1e9));
    }

    #[test]
    fn deviation_is_in_standard_errors() {
        let results = accumulate(&[
            MomentumVector::new(1., 0., -2.),
            MomentumVector::new(3., 0., 2.),
        ])
        .finalize();
        let deviation = results.deviation(&MomentumVector::new(0., 0., 1.));
        assert_eq!(deviation, MomentumVector::new(2., 0., 0.5));
        assert!(results.is_compatible(&MomentumVector::new(0., 0., 1.), 2.));
        assert!(!results.is_compatible(&MomentumVector::new(0., 0., 1.), 1.9));
    }

    #[test]
    #[should_panic(expected = "without any particle")]
    fn empty_accumulator_cannot_finalize() {
        MomentAccumulator::new().finalize();
    }
}
