//! Spatial profile plotting
//!
//! Plots the final concentration profile of a solver run against the
//! analytical reference evaluated on the same grid — the visual companion
//! of the RMS-error number.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rdiff_rs::output::visualization::plot_profile_comparison;
//!
//! let solution = FtcsSolver::new().solve(&params, 50, 200)?;
//! let analytical = analytic_concentration(&solution.grid, params.total_time, &params, 50);
//! plot_profile_comparison(&solution.grid, &solution.concentration,
//!                         &analytical, "profile.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use nalgebra::DVector;

use super::config::PlotConfig;

// =================================================================================================
// Profile Comparison
// =================================================================================================

/// Plot a numerical profile and the analytical reference on shared axes.
///
/// Distances are shown in millimetres (the reference configuration is a
/// 5 mm tissue sample; metres would label every tick `0.00x`).
///
/// # Arguments
///
/// * `grid` - Grid coordinates [m]
/// * `numerical` - Solver concentration at each node
/// * `analytical` - Reference concentration at each node
/// * `output_path` - Where to save the plot (`.png` or `.svg`)
/// * `config` - Optional plot configuration
pub fn plot_profile_comparison(
    grid: &[f64],
    numerical: &DVector<f64>,
    analytical: &DVector<f64>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if grid.len() != numerical.len() || grid.len() != analytical.len() {
        return Err("profile plot: grid and profiles must share a length".into());
    }
    if grid.is_empty() {
        return Err("profile plot: empty grid".into());
    }

    let default_config = PlotConfig::profile("Concentration Profile");
    let config = config.unwrap_or(&default_config);

    let x_mm: Vec<f64> = grid.iter().map(|&x| x * 1000.0).collect();

    let max_c = numerical
        .iter()
        .chain(analytical.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &x_mm, numerical, analytical, config, max_c)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &x_mm, numerical, analytical, config, max_c)
        }
    }
}

/// Implementation with a concrete backend.
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    x_mm: &[f64],
    numerical: &DVector<f64>,
    analytical: &DVector<f64>,
    config: &PlotConfig,
    max_c: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let max_x = *x_mm.last().expect("non-empty grid");

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_x, 0.0..(max_c * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    chart
        .draw_series(LineSeries::new(
            x_mm.iter().zip(analytical.iter()).map(|(&x, &c)| (x, c)),
            ShapeStyle::from(&config.reference_color).stroke_width(config.line_width),
        ))?
        .label("Analytical")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.reference_color));

    chart
        .draw_series(
            x_mm.iter()
                .zip(numerical.iter())
                .map(|(&x, &c)| Circle::new((x, c), 3, config.line_color.filled())),
        )?
        .label("Numerical (FTCS)")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, config.line_color.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
