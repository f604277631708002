//! Non-drifting or drifting Maxwellian in the non-relativistic limit

use crate::{momentum::MomentumVector, numeric::Float, random::RandomEngine};

/// Independent normal distribution along each axis
#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian {
    /// Central momentum
    u_m: MomentumVector,

    /// Momentum spread
    u_th: MomentumVector,
}
//
impl Gaussian {
    /// Set up a gaussian distribution from its mean and spread
    pub fn new(u_m: MomentumVector, u_th: MomentumVector) -> Self {
        Self { u_m, u_th }
    }

    /// Draw the momentum of a new particle
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        _x: Float,
        _y: Float,
        _z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        MomentumVector::from_fn(|dim, _| rng.normal(self.u_m[dim], self.u_th[dim]))
    }

    /// Central momentum
    #[inline]
    pub fn bulk_mean(&self, _x: Float, _y: Float, _z: Float) -> MomentumVector {
        self.u_m
    }
}
