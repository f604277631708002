//! Spatial scalar fields which parametrize the relativistic thermal
//! distributions: local temperature and local drift speed.
//!
//! How a profile is evaluated (constant, compiled expression, tabulated data)
//! is not the concern of the momentum distributions, which only query the
//! field at a particle position.

use crate::{momentum::Axis, numeric::Float};
use eyre::{bail, ensure, Result};
use std::{fmt, str::FromStr, sync::Arc};

/// Real-valued function of the position, shareable across threads
///
/// Cloning only bumps a reference count, so distributions holding one stay
/// cheap to duplicate.
///
#[derive(Clone)]
pub struct PositionFunction(Arc<dyn Fn(Float, Float, Float) -> Float + Send + Sync>);
//
impl PositionFunction {
    /// Wrap a function of (x, y, z)
    pub fn new(f: impl Fn(Float, Float, Float) -> Float + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the function at some position
    #[inline]
    pub fn eval(&self, x: Float, y: Float, z: Float) -> Float {
        (self.0)(x, y, z)
    }
}

impl fmt::Debug for PositionFunction {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PositionFunction(..)")
    }
}

/// Spatial profile of a scalar quantity
#[derive(Clone, Debug)]
pub enum ScalarProfile {
    /// Same value everywhere
    Constant(Float),

    /// Value computed from the position
    Function(PositionFunction),
}
//
impl ScalarProfile {
    /// Evaluate the profile at some position
    #[inline]
    pub fn eval(&self, x: Float, y: Float, z: Float) -> Float {
        match self {
            ScalarProfile::Constant(value) => *value,
            ScalarProfile::Function(f) => f.eval(x, y, z),
        }
    }
}

impl From<Float> for ScalarProfile {
    fn from(value: Float) -> Self {
        ScalarProfile::Constant(value)
    }
}

impl From<PositionFunction> for ScalarProfile {
    fn from(f: PositionFunction) -> Self {
        ScalarProfile::Function(f)
    }
}

/// Local temperature θ = kT/mc² of a plasma
#[derive(Clone, Debug)]
pub struct TemperatureField {
    profile: ScalarProfile,
}
//
impl TemperatureField {
    /// Build a temperature field from its spatial profile
    pub fn new(profile: impl Into<ScalarProfile>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    /// Temperature at some position. Range checks are left to the caller.
    #[inline]
    pub fn eval(&self, x: Float, y: Float, z: Float) -> Float {
        self.profile.eval(x, y, z)
    }
}

/// Direction of a bulk drift: an axis and a sign
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriftDirection {
    /// Axis along which the plasma drifts
    pub axis: Axis,

    /// Truth that the drift goes towards negative coordinates
    pub negative: bool,
}
//
impl DriftDirection {
    /// Drift towards positive coordinates along some axis
    pub fn positive(axis: Axis) -> Self {
        Self {
            axis,
            negative: false,
        }
    }

    /// Drift towards negative coordinates along some axis
    pub fn negative(axis: Axis) -> Self {
        Self {
            axis,
            negative: true,
        }
    }

    /// Sign to be applied to the drift speed profile
    pub fn sign(self) -> Float {
        if self.negative {
            -1.
        } else {
            1.
        }
    }
}

impl FromStr for DriftDirection {
    type Err = eyre::Report;

    /// Parse directions of the form "x", "+y" or "-z"
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ensure!(!s.is_empty(), "Drift direction must not be empty");
        let (negative, axis) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let axis = match axis.to_lowercase().as_str() {
            "x" => Axis::X,
            "y" => Axis::Y,
            "z" => Axis::Z,
            _ => bail!(
                "'{}' is not a valid drift direction, expected [+-]x, [+-]y or [+-]z",
                s
            ),
        };
        Ok(Self { axis, negative })
    }
}

/// Local drift speed β = v/c of a plasma, along a fixed boost axis
#[derive(Clone, Debug)]
pub struct VelocityField {
    profile: ScalarProfile,
    direction: DriftDirection,
}
//
impl VelocityField {
    /// Build a drift speed field from its spatial profile and direction
    pub fn new(profile: impl Into<ScalarProfile>, direction: DriftDirection) -> Self {
        Self {
            profile: profile.into(),
            direction,
        }
    }

    /// Signed drift speed at some position. Range checks are left to the
    /// caller.
    #[inline]
    pub fn eval(&self, x: Float, y: Float, z: Float) -> Float {
        self.direction.sign() * self.profile.eval(x, y, z)
    }

    /// Boost axis
    #[inline]
    pub fn axis(&self) -> Axis {
        self.direction.axis
    }
}
