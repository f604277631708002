//! Maxwell-Jüttner plasma with a relativistic bulk drift
//!
//! Unlike Boltzmann, the rest-frame distribution is the relativistic thermal
//! equilibrium, so hot plasmas (θ ≳ 1) are modeled correctly. Speeds are drawn
//! with Sobol's rejection method, following Zenitani 2015 (Phys. Plasmas 22,
//! 042116).

use super::boost;
use crate::{
    fields::{TemperatureField, VelocityField},
    momentum::MomentumVector,
    numeric::{floats::consts::PI, Float},
    random::RandomEngine,
};
use prefix_num_ops::real::*;

/// Lowest temperature for which Sobol's method is efficient enough
///
/// Colder plasmas would need another method, such as inverse transform
/// sampling, which is not implemented.
///
pub const MIN_THETA: Float = 0.1;

/// Drifting Maxwell-Jüttner distribution with space-dependent parameters
#[derive(Clone, Debug)]
pub struct Juttner {
    temperature: TemperatureField,
    velocity: VelocityField,
}
//
impl Juttner {
    /// Set up a drifting Maxwell-Jüttner distribution from temperature and
    /// drift speed fields
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
    /// If the local temperature is below MIN_THETA, or if the local drift
    /// speed is not below the speed of light.
    ///
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        x: Float,
        y: Float,
        z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        let theta = self.temperature.eval(x, y, z);
        if theta < MIN_THETA {
            panic!(
                "Temperature parameter theta is less than minimum {} allowed for \
                 Maxwell-Juttner (got theta = {} at ({}, {}, {}))",
                MIN_THETA, theta, x, y, z
            );
        }
        let beta = boost::checked_drift_speed(&self.velocity, x, y, z);
        let axis = self.velocity.axis();

        // Draw the rest-frame speed, then spread it over the unit sphere
        let (speed, gamma) = sobol_speed(theta, rng);
        let x1 = rng.uniform();
        let x2 = rng.uniform();
        let transverse = 2. * speed * sqrt(x1 * (1. - x1));
        let [dir1, dir2] = axis.transverse();
        let mut u = MomentumVector::zeros();
        u[dir1] = transverse * sin(2. * PI * x2);
        u[dir2] = transverse * cos(2. * PI * x2);
        u[axis.index()] = speed * (2. * x1 - 1.);

        boost::flip_and_boost(u, gamma, beta, axis, rng)
    }

    /// Bulk drift momentum at some position
    #[inline]
    pub fn bulk_mean(&self, x: Float, y: Float, z: Float) -> MomentumVector {
        boost::drift_momentum(&self.velocity, x, y, z)
    }
}

/// Sample the momentum magnitude |u| of a Maxwell-Jüttner distribution at
/// temperature θ, returning it along with the matching Lorentz factor
///
/// The proposal −θ·ln(r1·r2·r3) follows the u²·exp(−u/θ) envelope, and the
/// acceptance condition u − γ > θ·ln(r4) corrects it to u²·exp(−γ/θ) (eq. 10
/// of Zenitani).
///
fn sobol_speed<R: RandomEngine + ?Sized>(theta: Float, rng: &mut R) -> (Float, Float) {
    let mut u: Float = 0.;
    let mut gamma: Float = 0.;
    let mut x1: Float = 0.;
    while u - gamma <= x1 {
        u = -theta * ln(rng.uniform() * rng.uniform() * rng.uniform());
        gamma = sqrt(1. + u * u);
        x1 = theta * ln(rng.uniform());
    }
    (u, gamma)
}
