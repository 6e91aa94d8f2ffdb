//! Log-log convergence plotting
//!
//! Renders the (dx, RMS error) records of a convergence study on log-log
//! axes together with a slope-2 reference line anchored at the coarsest
//! point, so the empirical order can be judged by eye.

use plotters::prelude::*;
use std::error::Error;

use super::config::PlotConfig;
use crate::convergence::ConvergenceStudy;

// =================================================================================================
// Convergence Plot
// =================================================================================================

/// Plot the convergence study on log-log axes.
///
/// Draws the measured errors (markers + line, labelled with the fitted
/// slope) and a dashed `dx²` reference line through the coarsest record.
///
/// # Errors
///
/// Fails when the study has fewer than two records (nothing to draw a
/// trend through) or the file cannot be written.
pub fn plot_convergence(
    study: &ConvergenceStudy,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if study.records.len() < 2 {
        return Err("convergence plot needs at least two records".into());
    }

    let default_config = PlotConfig::convergence("Convergence Study");
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_convergence_impl(backend, study, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_convergence_impl(backend, study, config)
        }
    }
}

/// Implementation with a concrete backend.
fn plot_convergence_impl<DB: DrawingBackend>(
    backend: DB,
    study: &ConvergenceStudy,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let points: Vec<(f64, f64)> = study
        .records
        .iter()
        .map(|r| (r.dx, r.rms_error))
        .collect();

    // Records are ordered coarse → fine, so dx decreases.
    let (dx_max, err_anchor) = points[0];
    let dx_min = points.last().expect("at least two records").0;

    // dx² reference through the coarsest measured point
    let reference: Vec<(f64, f64)> = points
        .iter()
        .map(|&(dx, _)| (dx, err_anchor * (dx / dx_max).powi(2)))
        .collect();

    let err_min = points
        .iter()
        .chain(reference.iter())
        .map(|&(_, e)| e)
        .fold(f64::INFINITY, f64::min);
    let err_max = points
        .iter()
        .map(|&(_, e)| e)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (dx_min * 0.8..dx_max * 1.2).log_scale(),
            (err_min * 0.5..err_max * 2.0).log_scale(),
        )?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.1e}", x))
            .y_label_formatter(&|y| format!("{:.1e}", y))
            .draw()?;
    }

    let slope_label = format!("Measured (slope = {:.2})", study.fit.slope);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
        ))?
        .label(slope_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.line_color));

    chart.draw_series(
        points
            .iter()
            .map(|&(dx, e)| Circle::new((dx, e), 4, config.line_color.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(
            reference.iter().copied(),
            ShapeStyle::from(&config.reference_color).stroke_width(1),
        ))?
        .label("Reference slope = 2")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.reference_color));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
