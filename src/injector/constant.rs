//! Cold beam: every particle gets the same momentum

use crate::{momentum::MomentumVector, numeric::Float, random::RandomEngine};

/// Distribution which always yields the same momentum
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    u: MomentumVector,
}
//
impl Constant {
    /// Set up a constant momentum distribution
    pub fn new(ux: Float, uy: Float, uz: Float) -> Self {
        Self {
            u: MomentumVector::new(ux, uy, uz),
        }
    }

    /// Momentum of a new particle, independent of position and randomness
    #[inline]
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        _x: Float,
        _y: Float,
        _z: Float,
        _rng: &mut R,
    ) -> MomentumVector {
        self.u
    }

    /// Mean momentum, which is the momentum of every particle
    #[inline]
    pub fn bulk_mean(&self, _x: Float, _y: Float, _z: Float) -> MomentumVector {
        self.u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomGenerator;

    #[test]
    fn ignores_position_and_randomness() {
        let constant = Constant::new(-1., 0.5, 2.);
        let expected = MomentumVector::new(-1., 0.5, 2.);
        let mut rng = RandomGenerator::seeded(3);
        for i in 0..10 {
            let pos = i as Float;
            assert_eq!(constant.sample(pos, -pos, 2. * pos, &mut rng), expected);
            assert_eq!(constant.bulk_mean(pos, -pos, 2. * pos), expected);
        }
    }
}
