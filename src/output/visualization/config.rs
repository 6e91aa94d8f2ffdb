//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots.
///
/// # Example
///
/// ```rust,ignore
/// use rdiff_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Drug Concentration at t = 2 h");
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title
    pub title: String,

    /// X-axis label (set by the plot-type constructor)
    pub xlabel: String,

    /// Y-axis label (set by the plot-type constructor)
    pub ylabel: String,

    /// Line color for the primary series (default: RED)
    pub line_color: RGBColor,

    /// Line color for the reference series (default: BLACK)
    pub reference_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: RED,
            reference_color: BLACK,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    /// Configuration for a spatial profile plot.
    pub fn profile(title: &str) -> Self {
        Self {
            title: title.to_string(),
            xlabel: "Distance (mm)".to_string(),
            ylabel: "Concentration (c/c0)".to_string(),
            ..Default::default()
        }
    }

    /// Configuration for a log-log convergence plot.
    pub fn convergence(title: &str) -> Self {
        Self {
            title: title.to_string(),
            xlabel: "Grid spacing dx (m)".to_string(),
            ylabel: "RMS error".to_string(),
            line_color: BLUE,
            ..Default::default()
        }
    }
}
