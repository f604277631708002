//! Momentum sampling driver
//!
//! Reads a configuration file (by default `injector.cfg`) describing a
//! momentum distribution and a probe position, samples the requested number of
//! particles there, and checks the moments of the result against the expected
//! bulk drift. A summary is printed, and the full results are written to
//! `momentum.data`.
//!
//! Log verbosity is controlled through the `RUST_LOG` environment variable.

use env_logger::Builder;
use eyre::WrapErr;
use log::LevelFilter;
use momentum_injector::{output, sample_moments, Configuration};
use std::{env, io::Write, path::Path, time::Instant};

/// Configuration file used when none is specified
const DEFAULT_CONFIG: &str = "injector.cfg";

fn main() -> eyre::Result<()> {
    // ### LOGGING ###

    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // ### CONFIGURATION READOUT ###

    let config_file = env::args().nth(1);
    let config_file = config_file.as_deref().unwrap_or(DEFAULT_CONFIG);
    let cfg = Configuration::load(config_file).wrap_err("Failed to load the configuration")?;
    cfg.print();
    log::info!(
        "Sampling {} particles from the {} distribution",
        cfg.num_particles,
        cfg.injector.kind()
    );

    // ### SAMPLING ###

    // Configuration I/O is kept out of the timing
    let saved_time = Instant::now();
    let results = sample_moments(&cfg);
    let elapsed_time = saved_time.elapsed();

    // ### RESULTS DISPLAY AND STORAGE ###

    output::dump_results(&cfg, &results, elapsed_time, Path::new("."))
        .wrap_err("Failed to output the results")?;
    cfg.injector.release();
    Ok(())
}
