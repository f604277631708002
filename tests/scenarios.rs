//! End-to-end checks of the momentum injector, through its public API

use approx::assert_abs_diff_eq;
use momentum_injector::{
    fields::{DriftDirection, PositionFunction, TemperatureField, VelocityField},
    injector::FluxDirection,
    random::{RandomEngine, RandomGenerator},
    sample_moments, Axis, Configuration, InjectorMomentum, MomentumVector, Type,
};

#[test]
fn constant_ignores_position_and_randomness() {
    let injector = InjectorMomentum::constant(1., 2., 3.);
    let mut rng = RandomGenerator::seeded(1);
    for _ in 0..10 {
        rng.uniform();
        assert_eq!(
            injector.sample(5., 5., 5., &mut rng),
            MomentumVector::new(1., 2., 3.)
        );
    }
}

#[test]
fn uniform_bulk_mean_is_box_center() {
    let injector =
        InjectorMomentum::uniform(MomentumVector::zeros(), MomentumVector::repeat(2.));
    for &(x, y, z) in &[(0., 0., 0.), (-3., 1e6, 0.5)] {
        assert_eq!(injector.bulk_mean(x, y, z), MomentumVector::repeat(1.));
    }
}

#[test]
#[should_panic(expected = "central momentum along the flux axis must be positive or zero")]
fn negative_flux_mean_aborts_construction() {
    InjectorMomentum::gaussian_flux(
        MomentumVector::new(-0.1, 0., 0.),
        MomentumVector::repeat(0.1),
        Axis::X,
        FluxDirection::Positive,
    );
}

#[test]
#[should_panic(expected = "Negative temperature parameter theta")]
fn negative_temperature_aborts_first_sample() {
    let injector = InjectorMomentum::boltzmann(
        TemperatureField::new(-1.),
        VelocityField::new(0., DriftDirection::positive(Axis::X)),
    );
    // Querying the drift does not check the temperature
    assert_eq!(injector.bulk_mean(1., 2., 3.), MomentumVector::zeros());
    injector.sample(1., 2., 3., &mut RandomGenerator::new());
}

#[test]
fn parser_components_follow_position() {
    let injector = InjectorMomentum::parser(
        PositionFunction::new(|x, _, _| 2. * x),
        PositionFunction::new(|_, y, z| y - z),
        PositionFunction::new(|_, _, _| -1.),
    );
    let expected = MomentumVector::new(2., -1., -1.);
    assert_eq!(injector.sample(1., 2., 3., &mut RandomGenerator::new()), expected);
    assert_eq!(injector.bulk_mean(1., 2., 3.), expected);
}

#[test]
fn gaussian_run_matches_bulk_mean() {
    let cfg = Configuration::parse(
        "num_particles = 50000
         seed = 3
         momentum_distribution_type = gaussian
         ux_m = 0.2
         uy_m = -1
         ux_th = 0.5
         uy_th = 0.1
         uz_th = 2",
    )
    .unwrap();
    let results = sample_moments(&cfg);
    assert_eq!(results.num_particles, 50_000);
    assert!(results.is_compatible(&cfg.injector.bulk_mean(0., 0., 0.), 5.));
    assert_abs_diff_eq!(results.variance[2], 4., epsilon = 0.2);
}

#[test]
fn uniform_run_stays_in_bounds() {
    let cfg = Configuration::parse(
        "num_particles = 25000
         momentum_distribution_type = uniform
         ux_min = -1
         ux_max = 1
         uz_min = 2
         uz_max = 4",
    )
    .unwrap();
    let results = sample_moments(&cfg);
    assert!(results.min[0] >= -1. && results.max[0] <= 1.);
    assert_eq!((results.min[1], results.max[1]), (0., 0.));
    assert!(results.min[2] >= 2. && results.max[2] <= 4.);
    assert!(results.is_compatible(&MomentumVector::new(0., 0., 3.), 5.));
}

#[test]
fn radial_expansion_run_is_deterministic() {
    let cfg = Configuration::parse(
        "num_particles = 100
         position = 1 -2 0.5
         momentum_distribution_type = radial_expansion
         u_over_r = 2",
    )
    .unwrap();
    let results = sample_moments(&cfg);
    assert_eq!(results.mean, MomentumVector::new(2., -4., 1.));
    assert_eq!(results.variance, MomentumVector::zeros());
}

#[test]
fn sampling_runs_are_reproducible() {
    let config_str = "num_particles = 30001
                      seed = 11
                      momentum_distribution_type = maxwell_juttner
                      theta = 1
                      beta = 0.3
                      bulk_vel_dir = z";
    let first = sample_moments(&Configuration::parse(config_str).unwrap());
    let second = sample_moments(&Configuration::parse(config_str).unwrap());
    assert_eq!(first, second);

    let other_seed = config_str.replace("seed = 11", "seed = 12");
    let third = sample_moments(&Configuration::parse(&other_seed).unwrap());
    assert_ne!(first.mean, third.mean);
}

#[test]
fn injector_is_shared_across_threads() {
    let injector = InjectorMomentum::juttner(
        TemperatureField::new(1.),
        VelocityField::new(0.5, DriftDirection::negative(Axis::Y)),
    );
    assert_eq!(injector.kind(), Type::Juttner);
    let injector = &injector;
    std::thread::scope(|s| {
        for seed in 0..4 {
            s.spawn(move || {
                let mut rng = RandomGenerator::seeded(seed);
                for _ in 0..1000 {
                    let u = injector.sample(0., 0., 0., &mut rng);
                    assert!(u.iter().all(|u| u.is_finite()));
                }
            });
        }
    });
}
