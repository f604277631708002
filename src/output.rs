//! This module is in charge of outputting the final sampling results to the
//! standard output and to disk

use crate::{
    config::Configuration,
    momentum::{Axis, MomentumVector},
    moments::MomentResults,
    numeric::Float,
};
use eyre::{Result, WrapErr};
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
    time::Duration,
};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Number of significant digits in file output
const SIG_DIGITS: usize = (Float::DIGITS - 1) as usize;

/// Name of the results file
pub const RESULTS_FILE: &str = "momentum.data";

/// Number of standard errors beyond which a mean is reported as suspicious
pub const MAX_DEVIATION: Float = 5.;

/// Output the sampling results to the console and to disk
pub fn dump_results(
    cfg: &Configuration,
    results: &MomentResults,
    elapsed_time: Duration,
    output_dir: &Path,
) -> Result<()> {
    let expected = cfg
        .injector
        .bulk_mean(cfg.position[0], cfg.position[1], cfg.position[2]);
    print_results(results, &expected);

    // Compute a timestamp of when the run ended
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .wrap_err("Failed to format the run timestamp")?;

    let path = output_dir.join(RESULTS_FILE);
    let mut dat_file =
        File::create(&path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    write_results(&mut dat_file, cfg, results, &expected, elapsed_time, &timestamp)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    log::info!("Results written to {}", path.display());
    Ok(())
}

/// Display a summary of the moments, comparing the mean to the bulk drift
fn print_results(results: &MomentResults, expected: &MomentumVector) {
    let deviation = results.deviation(expected);
    println!();
    println!("    :      mean     |   std error   |   bulk mean");
    for axis in AXES {
        let dim = axis.index();
        println!(
            "u{}  : {:>13.6e} | {:>13.6e} | {:>13.6e}",
            axis, results.mean[dim], results.std_error[dim], expected[dim]
        );
        if deviation[dim] > MAX_DEVIATION {
            log::warn!(
                "Mean u{} deviates from the bulk mean by {:.1} standard errors",
                axis,
                deviation[dim]
            );
        }
    }
}

/// Write the results file
fn write_results(
    file: &mut impl Write,
    cfg: &Configuration,
    results: &MomentResults,
    expected: &MomentumVector,
    elapsed_time: Duration,
    timestamp: &str,
) -> io::Result<()> {
    writeln_entry(file, timestamp)?;
    writeln_entry(file, ("Distribution", &*cfg.injector.kind().to_string()))?;
    writeln_entry(file, ("Number of particles", results.num_particles))?;
    writeln_entry(file, ("Random seed", cfg.seed))?;
    for axis in AXES {
        let key = format!("Position {}", axis);
        writeln_entry(file, (&key[..], cfg.position[axis.index()]))?;
    }
    writeln_entry(file, "---------------------------------------------")?;
    let elapsed_secs = elapsed_time.as_secs_f64() as Float;
    writeln_entry(file, ("Elapsed time               (s)", elapsed_secs))?;
    let secs_per_particle = elapsed_secs / (results.num_particles as Float);
    writeln_entry(file, ("Time per particle          (s)", secs_per_particle))?;
    writeln_entry(file, "---------------------------------------------")?;

    // Per-axis table: mean, standard error, bulk mean, deviation, extrema
    let decimals = (SIG_DIGITS - 1).min(7);
    let deviation = results.deviation(expected);
    writeln!(file)?;
    for axis in AXES {
        let dim = axis.index();
        writeln!(
            file,
            "  u{}{:>w$.d$e}{:>w$.d$e}{:>w$.d$e}{:>w$.d$e}{:>w$.d$e}{:>w$.d$e}{:>w$.d$e}",
            axis,
            results.mean[dim],
            results.std_error[dim],
            results.variance[dim],
            expected[dim],
            deviation[dim],
            results.min[dim],
            results.max[dim],
            w = decimals + 8,
            d = decimals,
        )?;
    }
    Ok(())
}

/// Momentum axes, in output order
const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

/// Text output facility for the results file's key-value styling
fn writeln_entry(file: &mut impl Write, data: impl WriteEntry) -> io::Result<()> {
    write!(file, " ")?;
    data.write(file)?;
    writeln!(file)
}

/// Trait implemented by things which can be printed in the results file
trait WriteEntry: Sized {
    /// Write down `self` to the output file
    fn write(self, file: &mut impl Write) -> io::Result<()>;
}

impl WriteEntry for &str {
    fn write(self, file: &mut impl Write) -> io::Result<()> {
        write!(file, "{}", self)
    }
}

impl WriteEntry for usize {
    fn write(self, file: &mut impl Write) -> io::Result<()> {
        write!(file, "{}", self)
    }
}

impl WriteEntry for u64 {
    fn write(self, file: &mut impl Write) -> io::Result<()> {
        write!(file, "{}", self)
    }
}

impl WriteEntry for Float {
    // Close approximation of printf's %g
    fn write(self, file: &mut impl Write) -> io::Result<()> {
        write_engineering(file, self, SIG_DIGITS)
    }
}

impl<T: WriteEntry> WriteEntry for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, file: &mut impl Write) -> io::Result<()> {
        write!(file, "{:<31}: ", self.0)?;
        self.1.write(file)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        write!(writer, "0")
    } else if !x.is_finite() {
        write!(writer, "{}", x)
    } else {
        let log_x = x.abs().log10();
        if (-3. ..(sig_digits as Float)).contains(&log_x) {
            // Rust's precision counts digits after the decimal point, so adjust
            // it to the magnitude to print a constant number of significant
            // digits. The leading zero of numbers below 1 does not count.
            precision = (precision as isize - log_x.trunc() as isize) as usize;
            if log_x < 0. {
                precision += 1
            }

            // Drop trailing zeros, but be careful with integer numbers...
            let str_with_zeros = format!("{:.1$}", x, precision);
            if str_with_zeros.contains('.') {
                write!(
                    writer,
                    "{}",
                    str_with_zeros.trim_end_matches('0').trim_end_matches('.')
                )
            } else {
                write!(writer, "{}", str_with_zeros)
            }
        } else {
            write!(writer, "{:.1$e}", x, precision)
        }
    }
}
