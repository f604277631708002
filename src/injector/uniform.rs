//! Momenta drawn uniformly inside an axis-aligned box

use crate::{momentum::MomentumVector, numeric::Float, random::RandomEngine};

/// Distribution with u_min < u < u_max independently along each axis
#[derive(Clone, Debug, PartialEq)]
pub struct Uniform {
    /// Lower corner of the momentum box
    u_min: MomentumVector,

    /// Extent of the box along each axis
    span: MomentumVector,

    /// Center of the box, precomputed for bulk_mean()
    center: MomentumVector,
}
//
impl Uniform {
    /// Set up a uniform distribution from its per-axis bounds
    pub fn new(u_min: MomentumVector, u_max: MomentumVector) -> Self {
        Self {
            u_min,
            span: u_max - u_min,
            center: (u_max + u_min) * 0.5,
        }
    }

    /// Draw the momentum of a new particle, one uniform draw per axis
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        _x: Float,
        _y: Float,
        _z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        // Draw in x, y, z order
        let r = MomentumVector::new(rng.uniform(), rng.uniform(), rng.uniform());
        self.u_min + r.component_mul(&self.span)
    }

    /// Center of the momentum box
    #[inline]
    pub fn bulk_mean(&self, _x: Float, _y: Float, _z: Float) -> MomentumVector {
        self.center
    }
}
