//! Self-similar radial expansion: momentum proportional to position

use crate::{momentum::MomentumVector, numeric::Float, random::RandomEngine};

/// Distribution where u = (u/r)·(x, y, z)
#[derive(Clone, Debug, PartialEq)]
pub struct RadialExpansion {
    /// Normalized momentum γβ per unit of distance from the origin (in SI
    /// position units)
    u_over_r: Float,
}
//
impl RadialExpansion {
    /// Set up a radial expansion with a given momentum/position ratio
    pub fn new(u_over_r: Float) -> Self {
        Self { u_over_r }
    }

    /// Momentum of a new particle, fully determined by its position
    #[inline]
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        x: Float,
        y: Float,
        z: Float,
        _rng: &mut R,
    ) -> MomentumVector {
        self.bulk_mean(x, y, z)
    }

    /// Momentum at some position
    #[inline]
    pub fn bulk_mean(&self, x: Float, y: Float, z: Float) -> MomentumVector {
        MomentumVector::new(x, y, z) * self.u_over_r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomGenerator;

    #[test]
    fn momentum_scales_with_position() {
        let expansion = RadialExpansion::new(0.5);
        let mut rng = RandomGenerator::seeded(4);
        for &(x, y, z) in &[(0., 0., 0.), (2., -4., 6.), (1e-6, 3., -0.25)] {
            let expected = MomentumVector::new(x * 0.5, y * 0.5, z * 0.5);
            assert_eq!(expansion.sample(x, y, z, &mut rng), expected);
            assert_eq!(expansion.bulk_mean(x, y, z), expected);
        }
    }
}
