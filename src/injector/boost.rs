//! Lorentz boost machinery shared by the relativistic thermal distributions
//!
//! A rest-frame isotropic momentum u' is turned into a lab-frame momentum of a
//! plasma drifting at speed β along some axis with two steps from Zenitani
//! 2015 (Phys. Plasmas 22, 042116):
//!
//! - The flipping method (eq. 32) reverses u'[dir] with probability
//!   −β·u'[dir]/γ'. This maps the rest-frame position volume element to the
//!   lab frame, so that particle densities may be specified in the lab frame.
//! - The Lorentz transform (eq. 17) of the momentum along the boost axis.
//!
//! For β = 0, neither step alters the momentum.

use crate::{
    fields::VelocityField,
    momentum::{Axis, MomentumVector},
    numeric::Float,
    random::RandomEngine,
};
use prefix_num_ops::real::*;

/// Evaluate the drift speed at some position, dying if it is not subluminal
#[inline]
pub fn checked_drift_speed(velocity: &VelocityField, x: Float, y: Float, z: Float) -> Float {
    let beta = velocity.eval(x, y, z);
    if beta <= -1. || beta >= 1. {
        panic!(
            "beta = v/c magnitude greater than or equal to 1 (got beta = {} at ({}, {}, {}))",
            beta, x, y, z
        );
    }
    beta
}

/// Apply the flipping method, then boost by β along `axis`
///
/// `gamma` is the Lorentz factor associated with the rest-frame momentum `u`.
/// Consumes exactly one uniform draw.
///
#[inline]
pub fn flip_and_boost<R: RandomEngine + ?Sized>(
    mut u: MomentumVector,
    gamma: Float,
    beta: Float,
    axis: Axis,
    rng: &mut R,
) -> MomentumVector {
    let dir = axis.index();
    if -beta * u[dir] / gamma > rng.uniform() {
        u[dir] = -u[dir];
    }
    u[dir] = (u[dir] + gamma * beta) / sqrt(1. - beta * beta);
    u
}

/// Momentum of the bulk drift, γβ along the boost axis
#[inline]
pub fn drift_momentum(velocity: &VelocityField, x: Float, y: Float, z: Float) -> MomentumVector {
    let beta = velocity.eval(x, y, z);
    let gamma = 1. / sqrt(1. - beta * beta);
    let mut u = MomentumVector::zeros();
    u[velocity.axis().index()] = gamma * beta;
    u
}
