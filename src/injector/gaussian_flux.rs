//! Flux-weighted Maxwellian, for particles injected through a surface
//!
//! Particles crossing a surface per unit time are weighted by their velocity
//! along the surface normal, so along that axis the momentum density is
//! u·exp(−(u−u_m)²/2u_th²) rather than a plain gaussian.

use crate::{
    momentum::{Axis, MomentumVector},
    numeric::Float,
    random::RandomEngine,
};
use prefix_num_ops::real::*;

/// Side of the injection surface towards which particles are emitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FluxDirection {
    /// Towards increasing coordinates
    Positive,

    /// Towards decreasing coordinates
    Negative,
}
//
impl FluxDirection {
    /// Interpret a direction sign, as found in input decks (+1 or -1)
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            1 => Some(FluxDirection::Positive),
            -1 => Some(FluxDirection::Negative),
            _ => None,
        }
    }
}

/// Gaussian distribution, with flux weighting along the normal axis
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFlux {
    /// Central momentum
    u_m: MomentumVector,

    /// Momentum spread
    u_th: MomentumVector,

    /// Axis normal to the injection surface
    flux_normal_axis: Axis,

    /// Direction of injection along the normal axis
    flux_direction: FluxDirection,
}
//
impl GaussianFlux {
    /// Set up a flux-weighted gaussian distribution
    ///
    /// # Panics
    ///
    /// The central momentum along the flux axis may not be negative: the
    /// flux-weighted density is only supported for u_m ≥ 0.
    ///
    pub fn new(
        u_m: MomentumVector,
        u_th: MomentumVector,
        flux_normal_axis: Axis,
        flux_direction: FluxDirection,
    ) -> Self {
        assert!(
            u_m[flux_normal_axis.index()] >= 0.,
            "When using the gaussianflux distribution, the central momentum along the flux \
             axis must be positive or zero (got u{}_m = {})",
            flux_normal_axis,
            u_m[flux_normal_axis.index()]
        );
        Self {
            u_m,
            u_th,
            flux_normal_axis,
            flux_direction,
        }
    }

    /// Draw the momentum of a new particle
    ///
    /// The flux-axis value is drawn first, then the two other axes in
    /// increasing coordinate order.
    ///
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        _x: Float,
        _y: Float,
        _z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        let normal = self.flux_normal_axis.index();
        let mut u_normal = flux_weighted_gaussian(self.u_m[normal], self.u_th[normal], rng);
        if self.flux_direction == FluxDirection::Negative {
            u_normal = -u_normal;
        }
        MomentumVector::from_fn(|dim, _| {
            if dim == normal {
                u_normal
            } else {
                rng.normal(self.u_m[dim], self.u_th[dim])
            }
        })
    }

    /// Central momentum, as configured (flux weighting is not reflected)
    #[inline]
    pub fn bulk_mean(&self, _x: Float, _y: Float, _z: Float) -> MomentumVector {
        self.u_m
    }
}

/// Below this ratio u_m/u_th, the slow drift rejection method is used
const SLOW_DRIFT_THRESHOLD: Float = 0.6;

/// Draw u ≥ 0 from the density p(u) ∝ u·exp(−(u−u_m)²/2u_th²), u_m ≥ 0
///
/// Both regimes sample an easy approximating density and correct it with a
/// rejection step. The loops have no iteration cap, but their acceptance
/// probability stays bounded away from zero for any valid u_m, u_th.
///
pub fn flux_weighted_gaussian<R: RandomEngine + ?Sized>(
    u_m: Float,
    u_th: Float,
    rng: &mut R,
) -> Float {
    debug_assert!(u_m >= 0.);

    // Trivial case, which would otherwise divide by zero below
    if u_th == 0. {
        return u_m;
    }

    if u_m < SLOW_DRIFT_THRESHOLD * u_th {
        // Approximate with u·exp(−u²/2approx_th²), sampled by inverting its
        // cumulative distribution, then reject with probability
        // 1 − exp(−k·(u−u_th)²). This is the path taken when u_m = 0.
        let approx_th = u_th / sqrt(1. - u_m / u_th);
        let reject_prefactor = (u_m / u_th) / (2. * u_th * u_th);
        loop {
            let x = rng.uniform();
            let u = approx_th * sqrt(2. * ln(1. / x));
            if rng.uniform() < exp(-reject_prefactor * (u - u_th) * (u - u_th)) {
                return u;
            }
        }
    } else {
        // Approximate with a gaussian centered on u_m + u_th²/u_m, restricted
        // to u ≥ 0, then accept with probability (u/u_m)·exp(1 − u/u_m), which
        // always lies in [0, 1].
        let approx_m = u_m + u_th * u_th / u_m;
        let inv_um = 1. / u_m;
        loop {
            let u = loop {
                let u = rng.normal(approx_m, u_th);
                if u >= 0. {
                    break u;
                }
            };
            if rng.uniform() < u * inv_um * exp(1. - u * inv_um) {
                return u;
            }
        }
    }
}
