//! CSV export functionality
//!
//! # Quick Examples
//!
//! ## Convergence table
//!
//! ```rust,ignore
//! use rdiff_rs::output::export::export_convergence_csv;
//!
//! export_convergence_csv(&study, "convergence.csv", None)?;
//! ```
//!
//! **Output** (`convergence.csv`):
//! ```csv
//! Nodes,dx (m),RMS error
//! 20,2.500000e-4,1.234567e-2
//! 40,1.250000e-4,3.086420e-3
//! ```
//!
//! ## Profile comparison
//!
//! ```rust,ignore
//! use rdiff_rs::output::export::export_profile_csv;
//!
//! export_profile_csv(&solution.grid, &numerical, Some(&analytical), "profile.csv", None)?;
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use nalgebra::DVector;

use crate::convergence::ConvergenceStudy;

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for CSV export.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column separator (default: `,`)
    pub delimiter: char,

    /// Significant digits for floating-point columns (default: 6)
    pub precision: usize,

    /// Write `#`-prefixed header lines with run metadata (default: false)
    pub include_metadata: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
        }
    }
}

// =================================================================================================
// Export Functions
// =================================================================================================

/// Write the convergence table (nodes, dx, RMS error) to a CSV file.
///
/// When metadata is enabled the fitted slope and intercept go into
/// `#`-prefixed comment lines above the header, so the file stays loadable
/// by tools that skip comments.
pub fn export_convergence_csv(
    study: &ConvergenceStudy,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);
    let d = config.delimiter;

    let mut writer = BufWriter::new(File::create(output_path)?);

    if config.include_metadata {
        writeln!(writer, "# Convergence study")?;
        writeln!(writer, "# Fitted slope: {:.4}", study.fit.slope)?;
        writeln!(writer, "# Fitted intercept: {:.4}", study.fit.intercept)?;
        if let Some(nodes) = study.truncated_at {
            writeln!(writer, "# Truncated at n = {} (non-finite error)", nodes)?;
        }
        writeln!(writer, "#")?;
    }

    writeln!(writer, "Nodes{}dx (m){}RMS error", d, d)?;
    for record in &study.records {
        writeln!(
            writer,
            "{}{}{:.p$e}{}{:.p$e}",
            record.nodes,
            d,
            record.dx,
            d,
            record.rms_error,
            p = config.precision
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a spatial profile to a CSV file, optionally alongside the
/// analytical reference evaluated on the same grid.
///
/// # Errors
///
/// Fails when the sequences have mismatched lengths or the file cannot be
/// written.
pub fn export_profile_csv(
    grid: &[f64],
    numerical: &DVector<f64>,
    analytical: Option<&DVector<f64>>,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if grid.len() != numerical.len() {
        return Err(format!(
            "grid has {} points but the profile has {}",
            grid.len(),
            numerical.len()
        )
        .into());
    }
    if let Some(reference) = analytical {
        if reference.len() != grid.len() {
            return Err(format!(
                "grid has {} points but the reference has {}",
                grid.len(),
                reference.len()
            )
            .into());
        }
    }

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);
    let d = config.delimiter;
    let p = config.precision;

    let mut writer = BufWriter::new(File::create(output_path)?);

    match analytical {
        Some(reference) => {
            writeln!(writer, "x (m){}Numerical{}Analytical", d, d)?;
            for i in 0..grid.len() {
                writeln!(
                    writer,
                    "{:.p$e}{}{:.p$e}{}{:.p$e}",
                    grid[i],
                    d,
                    numerical[i],
                    d,
                    reference[i],
                    p = p
                )?;
            }
        }
        None => {
            writeln!(writer, "x (m){}Numerical", d)?;
            for i in 0..grid.len() {
                writeln!(writer, "{:.p$e}{}{:.p$e}", grid[i], d, numerical[i], p = p)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
