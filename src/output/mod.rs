//! Output module for simulation results
//!
//! The presentation layer. The core (solver + convergence driver) exposes
//! plain ordered numeric sequences; this module consumes them and nothing
//! else — no core type ever calls back into plotting or printing.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← PNG/SVG plots using plotters
//! │   ├── config.rs
//! │   ├── profiles.rs     profile comparison (numerical vs analytical)
//! │   └── convergence.rs  log-log error plot with fitted slope
//! └── export/             ← CSV export
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rdiff_rs::output::export::export_convergence_csv;
//! use rdiff_rs::output::visualization::plot_convergence;
//!
//! let study = run_convergence_study(&params, &grids, &rule, 50)?;
//! export_convergence_csv(&study, "convergence.csv", None)?;
//! plot_convergence(&study, "convergence.png", None)?;
//! ```

pub mod export;
pub mod visualization;
