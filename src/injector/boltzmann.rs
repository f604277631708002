//! Maxwell-Boltzmann plasma with a relativistic bulk drift
//!
//! The rest-frame distribution is a non-relativistic Maxwellian, which is only
//! accurate for θ = kT/mc² ≪ 1. The bulk drift may be relativistic.

use super::boost;
use crate::{
    fields::{TemperatureField, VelocityField},
    momentum::MomentumVector,
    numeric::Float,
    random::RandomEngine,
};
use prefix_num_ops::real::*;

/// Drifting Maxwell-Boltzmann distribution with space-dependent parameters
#[derive(Clone, Debug)]
pub struct Boltzmann {
    temperature: TemperatureField,
    velocity: VelocityField,
}
//
impl Boltzmann {
    /// Set up a drifting Maxwellian from temperature and drift speed fields
    pub fn new(temperature: TemperatureField, velocity: VelocityField) -> Self {
        Self {
            temperature,
            velocity,
        }
    }

    /// Draw the momentum of a new particle at some position
    ///
    /// # Panics
    ///
    /// If the local temperature is negative, or if the local drift speed is
    /// not below the speed of light.
    ///
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        x: Float,
        y: Float,
        z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        let theta = self.temperature.eval(x, y, z);
        if theta < 0. {
            panic!(
                "Negative temperature parameter theta encountered, which is not allowed \
                 (got theta = {} at ({}, {}, {}))",
                theta, x, y, z
            );
        }
        let beta = boost::checked_drift_speed(&self.velocity, x, y, z);
        let axis = self.velocity.axis();

        // Rest-frame thermal momentum, boost axis drawn first
        let v_th = sqrt(theta);
        let dir = axis.index();
        let [dir1, dir2] = axis.transverse();
        let mut u = MomentumVector::zeros();
        u[dir] = rng.normal(0., v_th);
        u[dir1] = rng.normal(0., v_th);
        u[dir2] = rng.normal(0., v_th);
        let gamma = sqrt(1. + u.norm_squared());

        boost::flip_and_boost(u, gamma, beta, axis, rng)
    }

    /// Bulk drift momentum at some position
    #[inline]
    pub fn bulk_mean(&self, x: Float, y: Float, z: Float) -> MomentumVector {
        boost::drift_momentum(&self.velocity, x, y, z)
    }
}
