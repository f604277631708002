//! Momentum distributions for newly created particles, and the closed-set
//! dispatcher which selects one of them at run time.
//!
//! Sampling runs once per particle inside parallel loops, so dispatch goes
//! through a plain enum `match` rather than trait objects: an InjectorMomentum
//! is a flat value which any worker thread can borrow and call into.

mod boltzmann;
mod boost;
mod constant;
mod gaussian;
mod gaussian_flux;
mod juttner;
mod parser;
mod radial_expansion;
mod uniform;

pub use self::{
    boltzmann::Boltzmann,
    constant::Constant,
    gaussian::Gaussian,
    gaussian_flux::{flux_weighted_gaussian, FluxDirection, GaussianFlux},
    juttner::{Juttner, MIN_THETA},
    parser::Parser,
    radial_expansion::RadialExpansion,
    uniform::Uniform,
};

use crate::{
    fields::{PositionFunction, TemperatureField, VelocityField},
    momentum::{Axis, MomentumVector},
    numeric::Float,
    random::RandomEngine,
};
use std::fmt;

/// Kind of momentum distribution held by an InjectorMomentum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Same momentum for every particle
    Constant,
    /// Independent normal distribution on each axis
    Gaussian,
    /// Gaussian weighted by the flux through a surface
    GaussianFlux,
    /// Uniform distribution in a momentum box
    Uniform,
    /// Drifting Maxwell-Boltzmann distribution
    Boltzmann,
    /// Drifting Maxwell-Jüttner distribution
    Juttner,
    /// Momentum proportional to position
    RadialExpansion,
    /// Momentum given by functions of position
    Parser,
}

impl fmt::Display for Type {
    /// Display the name used for this distribution in input decks
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Constant => "constant",
            Type::Gaussian => "gaussian",
            Type::GaussianFlux => "gaussianflux",
            Type::Uniform => "uniform",
            Type::Boltzmann => "maxwell_boltzmann",
            Type::Juttner => "maxwell_juttner",
            Type::RadialExpansion => "radial_expansion",
            Type::Parser => "parse_momentum_function",
        };
        write!(fmt, "{}", name)
    }
}

/// Momentum distribution of newly injected particles
///
/// Holds exactly one distribution, chosen at construction and never changed
/// afterwards. All methods take `&self`, so one instance may be shared by
/// every thread of a parallel particle loop, each thread bringing its own
/// random number generator.
///
/// Duplication (`clone()`) and destruction are tag-aware by construction.
///
#[derive(Clone, Debug)]
pub enum InjectorMomentum {
    /// See [`Constant`]
    Constant(Constant),
    /// See [`Gaussian`]
    Gaussian(Gaussian),
    /// See [`GaussianFlux`]
    GaussianFlux(GaussianFlux),
    /// See [`Uniform`]
    Uniform(Uniform),
    /// See [`Boltzmann`]
    Boltzmann(Boltzmann),
    /// See [`Juttner`]
    Juttner(Juttner),
    /// See [`RadialExpansion`]
    RadialExpansion(RadialExpansion),
    /// See [`Parser`]
    Parser(Parser),
}
//
impl InjectorMomentum {
    // ### CONSTRUCTION ###

    /// Same momentum (ux, uy, uz) for every particle
    pub fn constant(ux: Float, uy: Float, uz: Float) -> Self {
        Constant::new(ux, uy, uz).into()
    }

    /// Normal distribution of mean u_m and spread u_th on each axis
    pub fn gaussian(u_m: MomentumVector, u_th: MomentumVector) -> Self {
        Gaussian::new(u_m, u_th).into()
    }

    /// Flux-weighted gaussian through a surface normal to `flux_normal_axis`
    ///
    /// # Panics
    ///
    /// If the central momentum along the flux axis is negative.
    ///
    pub fn gaussian_flux(
        u_m: MomentumVector,
        u_th: MomentumVector,
        flux_normal_axis: Axis,
        flux_direction: FluxDirection,
    ) -> Self {
        GaussianFlux::new(u_m, u_th, flux_normal_axis, flux_direction).into()
    }

    /// Uniform distribution with u_min < u < u_max on each axis
    pub fn uniform(u_min: MomentumVector, u_max: MomentumVector) -> Self {
        Uniform::new(u_min, u_max).into()
    }

    /// Drifting Maxwell-Boltzmann distribution
    pub fn boltzmann(temperature: TemperatureField, velocity: VelocityField) -> Self {
        Boltzmann::new(temperature, velocity).into()
    }

    /// Drifting Maxwell-Jüttner distribution
    pub fn juttner(temperature: TemperatureField, velocity: VelocityField) -> Self {
        Juttner::new(temperature, velocity).into()
    }

    /// Radial expansion with momentum u_over_r·(x, y, z)
    pub fn radial_expansion(u_over_r: Float) -> Self {
        RadialExpansion::new(u_over_r).into()
    }

    /// Momentum given by one function of position per component
    pub fn parser(ux: PositionFunction, uy: PositionFunction, uz: PositionFunction) -> Self {
        Parser::new(ux, uy, uz).into()
    }

    // ### SAMPLING ###

    /// Draw the momentum of a particle created at (x, y, z)
    ///
    /// # Panics
    ///
    /// For Boltzmann and Jüttner distributions, if the local temperature is
    /// out of the supported range or the local drift speed is not subluminal.
    /// Such a configuration is a modeling error, it is never recovered from.
    ///
    #[inline]
    pub fn sample<R: RandomEngine + ?Sized>(
        &self,
        x: Float,
        y: Float,
        z: Float,
        rng: &mut R,
    ) -> MomentumVector {
        match self {
            InjectorMomentum::Constant(d) => d.sample(x, y, z, rng),
            InjectorMomentum::Gaussian(d) => d.sample(x, y, z, rng),
            InjectorMomentum::GaussianFlux(d) => d.sample(x, y, z, rng),
            InjectorMomentum::Uniform(d) => d.sample(x, y, z, rng),
            InjectorMomentum::Boltzmann(d) => d.sample(x, y, z, rng),
            InjectorMomentum::Juttner(d) => d.sample(x, y, z, rng),
            InjectorMomentum::RadialExpansion(d) => d.sample(x, y, z, rng),
            InjectorMomentum::Parser(d) => d.sample(x, y, z, rng),
        }
    }

    /// Mean (bulk) momentum at (x, y, z), without any randomness
    #[inline]
    pub fn bulk_mean(&self, x: Float, y: Float, z: Float) -> MomentumVector {
        match self {
            InjectorMomentum::Constant(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::Gaussian(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::GaussianFlux(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::Uniform(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::Boltzmann(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::Juttner(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::RadialExpansion(d) => d.bulk_mean(x, y, z),
            InjectorMomentum::Parser(d) => d.bulk_mean(x, y, z),
        }
    }

    // ### INTROSPECTION AND LIFECYCLE ###

    /// Kind of distribution in use
    pub fn kind(&self) -> Type {
        match self {
            InjectorMomentum::Constant(_) => Type::Constant,
            InjectorMomentum::Gaussian(_) => Type::Gaussian,
            InjectorMomentum::GaussianFlux(_) => Type::GaussianFlux,
            InjectorMomentum::Uniform(_) => Type::Uniform,
            InjectorMomentum::Boltzmann(_) => Type::Boltzmann,
            InjectorMomentum::Juttner(_) => Type::Juttner,
            InjectorMomentum::RadialExpansion(_) => Type::RadialExpansion,
            InjectorMomentum::Parser(_) => Type::Parser,
        }
    }

    /// Release the distribution and whatever resources it holds
    ///
    /// Dropping has the same effect, this only makes the end of the injector's
    /// lifetime explicit at call sites.
    ///
    pub fn release(self) {
        log::trace!("Releasing {} momentum injector", self.kind());
    }
}

/// Generate the From conversions from each distribution to InjectorMomentum
macro_rules! impl_from_distribution {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for InjectorMomentum {
                fn from(d: $variant) -> Self {
                    InjectorMomentum::$variant(d)
                }
            }
        )*
    };
}
impl_from_distribution!(
    Constant,
    Gaussian,
    GaussianFlux,
    Uniform,
    Boltzmann,
    Juttner,
    RadialExpansion,
    Parser
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fields::DriftDirection,
        random::{scripted::ScriptedEngine, RandomGenerator},
    };

    /// One injector of each kind, with mild parameters
    fn all_injectors() -> Vec<InjectorMomentum> {
        let drift = || VelocityField::new(0.3, DriftDirection::positive(Axis::Z));
        vec![
            InjectorMomentum::constant(1., 2., 3.),
            InjectorMomentum::gaussian(
                MomentumVector::new(0.1, 0.2, 0.3),
                MomentumVector::new(0.01, 0.01, 0.01),
            ),
            InjectorMomentum::gaussian_flux(
                MomentumVector::new(0.1, 0.2, 0.3),
                MomentumVector::new(0.01, 0.01, 0.01),
                Axis::Y,
                FluxDirection::Positive,
            ),
            InjectorMomentum::uniform(MomentumVector::zeros(), MomentumVector::repeat(2.)),
            InjectorMomentum::boltzmann(TemperatureField::new(0.01), drift()),
            InjectorMomentum::juttner(TemperatureField::new(0.5), drift()),
            InjectorMomentum::radial_expansion(2.),
            InjectorMomentum::parser(
                PositionFunction::new(|x, _, _| x),
                PositionFunction::new(|_, y, _| y),
                PositionFunction::new(|_, _, z| z),
            ),
        ]
    }

    #[test]
    fn kinds_match_constructors() {
        let kinds = all_injectors()
            .iter()
            .map(InjectorMomentum::kind)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                Type::Constant,
                Type::Gaussian,
                Type::GaussianFlux,
                Type::Uniform,
                Type::Boltzmann,
                Type::Juttner,
                Type::RadialExpansion,
                Type::Parser,
            ]
        );
    }

    #[test]
    fn dispatch_reaches_the_right_distribution() {
        let mut rng = RandomGenerator::seeded(1);
        let constant = InjectorMomentum::from(Constant::new(1., 2., 3.));
        assert_eq!(constant.sample(5., 5., 5., &mut rng), MomentumVector::new(1., 2., 3.));

        let uniform =
            InjectorMomentum::uniform(MomentumVector::zeros(), MomentumVector::repeat(2.));
        assert_eq!(uniform.bulk_mean(-7., 0., 7.), MomentumVector::repeat(1.));

        let expansion = InjectorMomentum::radial_expansion(2.);
        assert_eq!(expansion.sample(1., 2., 3., &mut rng), MomentumVector::new(2., 4., 6.));
    }

    #[test]
    fn bulk_mean_consumes_no_randomness() {
        for injector in all_injectors() {
            // A scripted engine with no draws would panic if consumed
            let mut rng = ScriptedEngine::new(&[], &[]);
            injector.bulk_mean(0.5, -0.5, 1.);
            if matches!(
                injector.kind(),
                Type::Constant | Type::RadialExpansion | Type::Parser
            ) {
                injector.sample(0.5, -0.5, 1., &mut rng);
            }
            assert!(rng.exhausted());
        }
    }

    #[test]
    fn clones_behave_identically() {
        for injector in all_injectors() {
            let copy = injector.clone();
            assert_eq!(copy.kind(), injector.kind());
            let mut rng1 = RandomGenerator::seeded(9);
            let mut rng2 = RandomGenerator::seeded(9);
            for _ in 0..100 {
                assert_eq!(
                    injector.sample(0.1, 0.2, 0.3, &mut rng1),
                    copy.sample(0.1, 0.2, 0.3, &mut rng2)
                );
            }
            injector.release();
            copy.release();
        }
    }

    #[test]
    fn injectors_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InjectorMomentum>();

        let injector = InjectorMomentum::juttner(
            TemperatureField::new(1.),
            VelocityField::new(0.5, DriftDirection::negative(Axis::X)),
        );
        std::thread::scope(|scope| {
            for seed in 0..4 {
                let injector = &injector;
                scope.spawn(move || {
                    let mut rng = RandomGenerator::seeded(seed);
                    for _ in 0..1000 {
                        let u = injector.sample(0., 0., 0., &mut rng);
                        assert!(u.iter().all(|u| u.is_finite()));
                    }
                });
            }
        });
    }

    #[test]
    fn type_names_match_input_decks() {
        assert_eq!(Type::GaussianFlux.to_string(), "gaussianflux");
        assert_eq!(Type::Boltzmann.to_string(), "maxwell_boltzmann");
        assert_eq!(Type::Juttner.to_string(), "maxwell_juttner");
    }
}
