//! Mechanism for loading and checking the sampling configuration
//!
//! The configuration file is a list of `key = value` lines, with `#` comments.
//! Momentum distribution keys follow the naming of plasma simulation input
//! decks (`momentum_distribution_type`, `ux_m`, `theta`, `bulk_vel_dir`...).

use crate::{
    fields::{DriftDirection, TemperatureField, VelocityField},
    injector::{FluxDirection, InjectorMomentum, Type, MIN_THETA},
    momentum::{Axis, MomentumVector},
    numeric::Float,
    random::DEFAULT_SEED,
};
use eyre::{bail, ensure, eyre, Result, WrapErr};
use log::{debug, warn};
use nalgebra::Vector3;
use std::{fs, str::FromStr};

/// Sampling configuration
pub struct Configuration {
    /// Number of particle momenta to be sampled
    pub num_particles: usize,

    /// Position at which particles are created
    pub position: Vector3<Float>,

    /// Seed of the random number generator
    pub seed: u64,

    /// Momentum distribution of the created particles
    pub injector: InjectorMomentum,

    /// Raw configuration entries, in file order, for display purposes
    entries: Vec<(String, String)>,
}
//
impl Configuration {
    /// Load the configuration from a file and check it
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Could not read configuration file {}", file_name))?;
        let config = Self::parse(&config_str)?;
        debug!(
            "Loaded {} configuration entries from {}",
            config.entries.len(),
            file_name
        );
        Ok(config)
    }

    /// Decode a configuration from its textual representation
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut items = ConfigItems::new(config_str)?;

        let num_particles = items.take("num_particles")?.parse::<usize>()?;
        let position = items.take_or("position", "0 0 0").parse_vector()?;
        let seed = match items.find("seed") {
            Some(item) => item.parse::<u64>()?,
            None => DEFAULT_SEED,
        };
        let injector = parse_injector(&mut items)?;

        // Leftover keys are most likely typos, which must not go unnoticed
        items.ensure_all_used()?;

        // A sensible run must sample at least one particle
        ensure!(num_particles > 0, "Please sample at least one particle");

        Ok(Configuration {
            num_particles,
            position,
            seed,
            injector,
            entries: items.into_entries(),
        })
    }

    /// Display the configuration
    pub fn print(&self) {
        for (key, value) in &self.entries {
            println!("{:<26} : {}", key, value);
        }
    }
}

/// Build the momentum distribution described by the configuration
fn parse_injector(items: &mut ConfigItems) -> Result<InjectorMomentum> {
    let kind = items.take("momentum_distribution_type")?.data.to_lowercase();
    let injector = match kind.as_str() {
        "constant" => {
            let u = items.vector_or(["ux", "uy", "uz"], 0.)?;
            InjectorMomentum::constant(u[0], u[1], u[2])
        }
        "gaussian" => {
            let u_m = items.vector_or(["ux_m", "uy_m", "uz_m"], 0.)?;
            let u_th = items.vector_or(["ux_th", "uy_th", "uz_th"], 0.)?;
            check_spread(&u_th)?;
            InjectorMomentum::gaussian(u_m, u_th)
        }
        "gaussianflux" => {
            let u_m = items.vector_or(["ux_m", "uy_m", "uz_m"], 0.)?;
            let u_th = items.vector_or(["ux_th", "uy_th", "uz_th"], 0.)?;
            check_spread(&u_th)?;
            let axis = items.take("flux_normal_axis")?.parse::<Axis>()?;
            let sign = items.take("flux_direction")?.parse::<i32>()?;
            let direction = FluxDirection::from_sign(sign)
                .ok_or_else(|| eyre!("flux_direction must be +1 or -1, got {}", sign))?;
            ensure!(
                u_m[axis.index()] >= 0.,
                "When using the {} distribution, the central momentum along the flux axis \
                 must be positive or zero",
                Type::GaussianFlux
            );
            InjectorMomentum::gaussian_flux(u_m, u_th, axis, direction)
        }
        "uniform" => {
            let u_min = items.vector_or(["ux_min", "uy_min", "uz_min"], 0.)?;
            let u_max = items.vector_or(["ux_max", "uy_max", "uz_max"], 0.)?;
            if u_min.iter().zip(u_max.iter()).any(|(min, max)| min > max) {
                warn!("Some uniform momentum bounds are inverted, min > max");
            }
            InjectorMomentum::uniform(u_min, u_max)
        }
        "maxwell_boltzmann" => {
            let temperature = parse_temperature(items, 0.)?;
            let velocity = parse_velocity(items)?;
            InjectorMomentum::boltzmann(temperature, velocity)
        }
        "maxwell_juttner" => {
            let temperature = parse_temperature(items, MIN_THETA)?;
            let velocity = parse_velocity(items)?;
            InjectorMomentum::juttner(temperature, velocity)
        }
        "radial_expansion" => {
            let u_over_r = items.take("u_over_r")?.parse::<Float>()?;
            InjectorMomentum::radial_expansion(u_over_r)
        }
        "parse_momentum_function" => bail!(
            "{} requires an expression evaluator, which configuration files do not provide. \
             Build it through InjectorMomentum::parser() instead.",
            Type::Parser
        ),
        other => bail!("Unknown momentum_distribution_type '{}'", other),
    };
    Ok(injector)
}

/// Momentum spreads must be nonnegative
fn check_spread(u_th: &MomentumVector) -> Result<()> {
    ensure!(
        u_th.iter().all(|&th| th >= 0.),
        "Momentum spreads must be positive or zero, got {:?}",
        u_th.as_slice()
    );
    Ok(())
}

/// Parse the temperature field of a thermal distribution
fn parse_temperature(items: &mut ConfigItems, min_theta: Float) -> Result<TemperatureField> {
    let kind = items.take_or("theta_distribution_type", "constant").data;
    ensure!(
        kind == "constant",
        "theta_distribution_type '{}' is not supported, only constant temperatures can be \
         configured from a file",
        kind
    );
    let theta = items.take("theta")?.parse::<Float>()?;
    ensure!(
        theta >= min_theta,
        "Temperature parameter theta = {} is below the minimum {} allowed for this distribution",
        theta,
        min_theta
    );
    Ok(TemperatureField::new(theta))
}

/// Parse the drift speed field of a thermal distribution
fn parse_velocity(items: &mut ConfigItems) -> Result<VelocityField> {
    let kind = items.take_or("beta_distribution_type", "constant").data;
    ensure!(
        kind == "constant",
        "beta_distribution_type '{}' is not supported, only constant drifts can be configured \
         from a file",
        kind
    );
    let beta = items.take_or("beta", "0").parse::<Float>()?;
    ensure!(
        beta > -1. && beta < 1.,
        "beta = v/c magnitude greater than or equal to 1 (got {})",
        beta
    );
    let direction = items.take_or("bulk_vel_dir", "+x").parse::<DriftDirection>()?;
    Ok(VelocityField::new(beta, direction))
}

/// Set of `key = value` entries, which keeps track of which were used
struct ConfigItems<'data> {
    entries: Vec<(&'data str, &'data str)>,
    used: Vec<bool>,
}
//
impl<'data> ConfigItems<'data> {
    /// Split the configuration file into entries
    fn new(config_str: &'data str) -> Result<Self> {
        let mut entries = Vec::<(&str, &str)>::new();
        for (line_idx, line) in config_str.lines().enumerate() {
            // Drop comments and surrounding whitespace, ignore blank lines
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| eyre!("Line {}: expected 'key = value'", line_idx + 1))?;
            let (key, value) = (key.trim(), value.trim());
            ensure!(
                !entries.iter().any(|&(k, _)| k == key),
                "Line {}: {} is configured twice",
                line_idx + 1,
                key
            );
            entries.push((key, value));
        }
        let used = vec![false; entries.len()];
        Ok(Self { entries, used })
    }

    /// Fetch a mandatory configuration item
    fn take(&mut self, name: &'static str) -> Result<ConfigItem<'data>> {
        self.find(name).ok_or_else(|| eyre!("Missing configuration of {}", name))
    }

    /// Fetch an optional configuration item, with a default value
    fn take_or(&mut self, name: &'static str, default: &'static str) -> ConfigItem<'data> {
        self.find(name).unwrap_or_else(|| ConfigItem::new(name, default))
    }

    /// Fetch three optional scalars as a vector, with a common default
    fn vector_or(&mut self, names: [&'static str; 3], default: Float) -> Result<MomentumVector> {
        let mut result = MomentumVector::repeat(default);
        for (dst, name) in result.iter_mut().zip(names) {
            if let Some(item) = self.find(name) {
                *dst = item.parse::<Float>()?;
            }
        }
        Ok(result)
    }

    /// Look up an item and mark it as used
    fn find(&mut self, name: &'static str) -> Option<ConfigItem<'data>> {
        let idx = self.entries.iter().position(|&(key, _)| key == name)?;
        self.used[idx] = true;
        Some(ConfigItem::new(name, self.entries[idx].1))
    }

    /// Check that every entry of the file was used
    fn ensure_all_used(&self) -> Result<()> {
        let unused = self
            .entries
            .iter()
            .zip(&self.used)
            .filter(|(_, &used)| !used)
            .map(|(&(key, _), _)| key)
            .collect::<Vec<_>>();
        ensure!(
            unused.is_empty(),
            "Unknown or unused configuration keys: {}",
            unused.join(", ")
        );
        Ok(())
    }

    /// Extract owned entries, for later display
    fn into_entries(self) -> Vec<(String, String)> {
        self.entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect()
    }
}

/// A value from the configuration file, tagged with the key which it is
/// associated with for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a key and raw data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: Into<eyre::Report>,
    {
        self.data
            .parse::<T>()
            .map_err(Into::<eyre::Report>::into)
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }

    /// Parse a whitespace-separated triplet of numbers
    fn parse_vector(self) -> Result<Vector3<Float>> {
        let components = self
            .data
            .split_whitespace()
            .map(|c| c.parse::<Float>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))?;
        ensure!(
            components.len() == 3,
            "Configuration of {} should have 3 components, got {}",
            self.name,
            components.len()
        );
        Ok(Vector3::from_column_slice(&components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn full_gaussian_configuration() {
        let config = Configuration::parse(
            "# Thermal electrons
             num_particles = 1000
             position = 1 2 3
             seed = 42
             momentum_distribution_type = gaussian
             ux_m = 0.5    # drift
             uz_th = 0.01",
        )
        .unwrap();
        assert_eq!(config.num_particles, 1000);
        assert_eq!(config.position, Vector3::new(1., 2., 3.));
        assert_eq!(config.seed, 42);
        assert_eq!(config.injector.kind(), Type::Gaussian);
        assert_eq!(
            config.injector.bulk_mean(0., 0., 0.),
            MomentumVector::new(0.5, 0., 0.)
        );
    }

    #[test]
    fn defaults_apply() {
        let config =
            Configuration::parse("num_particles = 1\nmomentum_distribution_type = constant")
                .unwrap();
        assert_eq!(config.position, Vector3::zeros());
        assert_eq!(config.seed, 12345);
        assert_eq!(config.injector.bulk_mean(1., 1., 1.), MomentumVector::zeros());
    }

    #[test]
    fn thermal_distributions() {
        let config = Configuration::parse(
            "num_particles = 10
             momentum_distribution_type = maxwell_juttner
             theta = 2
             beta = 0.6
             bulk_vel_dir = -y",
        )
        .unwrap();
        assert_eq!(config.injector.kind(), Type::Juttner);
        let bulk = config.injector.bulk_mean(0., 0., 0.);
        assert_abs_diff_eq!(bulk[1], -0.75, epsilon = 1e-6);
    }

    #[test]
    fn flux_configuration() {
        let config = Configuration::parse(
            "num_particles = 10
             momentum_distribution_type = gaussianflux
             uz_m = 0.1
             uz_th = 0.05
             flux_normal_axis = z
             flux_direction = -1",
        )
        .unwrap();
        assert_eq!(config.injector.kind(), Type::GaussianFlux);
    }

    #[test]
    fn invalid_configurations_are_reported() {
        let invalid = [
            // Missing particle count
            "momentum_distribution_type = constant",
            // No particle at all
            "num_particles = 0\nmomentum_distribution_type = constant",
            // Typo in a key
            "num_particles = 1\nmomentum_distribution_type = constant\nux_n = 1",
            // Duplicate key
            "num_particles = 1\nnum_particles = 2\nmomentum_distribution_type = constant",
            // Not a key-value pair
            "num_particles 1\nmomentum_distribution_type = constant",
            // Unknown distribution
            "num_particles = 1\nmomentum_distribution_type = kappa",
            // Negative flux-axis mean
            "num_particles = 1\nmomentum_distribution_type = gaussianflux\nux_m = -0.1\n\
             flux_normal_axis = x\nflux_direction = 1",
            // Null flux direction
            "num_particles = 1\nmomentum_distribution_type = gaussianflux\n\
             flux_normal_axis = x\nflux_direction = 0",
            // Negative spread
            "num_particles = 1\nmomentum_distribution_type = gaussian\nux_th = -1",
            // Negative temperature
            "num_particles = 1\nmomentum_distribution_type = maxwell_boltzmann\ntheta = -1",
            // Cold Jüttner plasma
            "num_particles = 1\nmomentum_distribution_type = maxwell_juttner\ntheta = 0.01",
            // Superluminal drift
            "num_particles = 1\nmomentum_distribution_type = maxwell_boltzmann\ntheta = 0.1\n\
             beta = 1",
            // Bad drift direction
            "num_particles = 1\nmomentum_distribution_type = maxwell_boltzmann\ntheta = 0.1\n\
             bulk_vel_dir = w",
            // Expression-based profiles
            "num_particles = 1\nmomentum_distribution_type = parse_momentum_function",
            // Bad position
            "num_particles = 1\nposition = 1 2\nmomentum_distribution_type = constant",
        ];
        for config_str in &invalid {
            assert!(
                Configuration::parse(config_str).is_err(),
                "Configuration should have been rejected:\n{}",
                config_str
            );
        }
    }

    #[test]
    fn errors_name_the_faulty_key() {
        let config_str = "num_particles = many\nmomentum_distribution_type = constant";
        let err = Configuration::parse(config_str).err().unwrap();
        assert!(format!("{:#}", err).contains("num_particles"));
    }
}
