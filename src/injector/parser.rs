//! Momentum given by user-defined analytic functions of the position

use crate::{
    fields::PositionFunction,
    momentum::MomentumVector,
    numeric::Float,
    random::RandomEngine,
};

/// Distribution where each momentum component is a function of (x, y, z)
///
/// The functions typically come from a compiled user expression, but any
/// position function will do.
///
#[derive(Clone, Debug)]
pub struct Parser {
    ux: PositionFunction,
    uy: PositionFunction,
    uz: PositionFunction,
}
//
impl Parser {
    /// Set up a distribution from one function per momentum component
    pub fn new(ux: PositionFunction, uy: PositionFunction, uz: PositionFunction) -> Self {
        Self { ux, uy, uz }
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
        MomentumVector::new(
            self.ux.eval(x, y, z),
            self.uy.eval(x, y, z),
            self.uz.eval(x, y, z),
        )
    }
}
