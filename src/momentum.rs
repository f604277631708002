//! This module implements the momentum vector and axis handling shared by all
//! momentum distributions.

use crate::numeric::Float;
use eyre::{bail, Result};
use nalgebra::Vector3;
use std::{fmt, str::FromStr};

/// Momentum dimension
pub const MOMENTUM_DIM: usize = 3;

/// Normalized particle momentum (proper velocity γv/c along each axis)
pub type MomentumVector = Vector3<Float>;

/// Convenience const for accessing the X coordinate of a momentum
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a momentum
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a momentum
pub const Z: usize = 2;

/// Spatial axis along which a drift, a flux normal or a boost is defined
///
/// In RZ geometry, X and Y actually stand for the radial and azimuthal
/// components, following the convention of the field evaluators.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// First axis (radial in RZ geometry)
    X,
    /// Second axis (azimuthal in RZ geometry)
    Y,
    /// Third axis
    Z,
}
//
impl Axis {
    /// Build an axis from its coordinate index, if valid
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            X => Some(Axis::X),
            Y => Some(Axis::Y),
            Z => Some(Axis::Z),
            _ => None,
        }
    }

    /// Coordinate index of this axis
    pub fn index(self) -> usize {
        match self {
            Axis::X => X,
            Axis::Y => Y,
            Axis::Z => Z,
        }
    }

    /// Indices of the two other axes, in cyclic order
    ///
    /// Boosted distributions fill these after the boost axis itself.
    pub fn transverse(self) -> [usize; 2] {
        let dir = self.index();
        [(dir + 1) % MOMENTUM_DIM, (dir + 2) % MOMENTUM_DIM]
    }
}

impl FromStr for Axis {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x" | "0" => Ok(Axis::X),
            "y" | "1" => Ok(Axis::Y),
            "z" | "2" => Ok(Axis::Z),
            other => bail!("'{}' is not a valid axis, expected one of x, y, z", other),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(fmt, "{}", name)
    }
}
