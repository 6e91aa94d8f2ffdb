//! Visualization of simulation results
//!
//! Plotting built on the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration ([`PlotConfig`])
//! - **profiles**: Spatial profiles (numerical vs analytical comparison)
//! - **convergence**: Log-log RMS-error plot with the fitted slope
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rdiff_rs::output::visualization::{plot_profile_comparison, plot_convergence};
//!
//! plot_profile_comparison(&solution.grid, &solution.concentration,
//!                         &analytical, "profile.png", None)?;
//! plot_convergence(&study, "convergence.png", None)?;
//! ```
//!
//! Both functions pick the backend from the file extension: `.svg` gets
//! the SVG backend, everything else the bitmap backend.

pub mod config;
pub mod convergence;
pub mod profiles;

pub use config::PlotConfig;
pub use convergence::plot_convergence;
pub use profiles::plot_profile_comparison;
