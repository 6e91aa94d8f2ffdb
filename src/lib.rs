//! rdiff-rs: Reaction-Diffusion Verification Framework
//!
//! A small framework for solving the 1-D diffusion-decay equation with an
//! explicit finite-difference scheme and verifying the numerical solution
//! against an exact eigenfunction expansion.
//!
//! # Architecture
//!
//! rdiff-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - `physics` holds the problem definition (parameters) and the exact
//!      analytical solution
//!    - `solver` holds the numerical method (FTCS time stepping)
//!
//! 2. **Verification as a first-class operation**
//!    - `convergence` drives the solver across grid resolutions, measures
//!      the RMS error against the analytical reference, and fits the
//!      empirical convergence order
//!
//! # The Problem
//!
//! ```text
//! ∂c/∂t = D·∂²c/∂x² − k·c        on  x ∈ [0, L]
//! c(0, t) = c0     (source, Dirichlet)
//! c(L, t) = 0      (sink, Dirichlet)
//! c(x, 0) = 0      (initial condition)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rdiff_rs::physics::TissueParams;
//! use rdiff_rs::solver::FtcsSolver;
//! use rdiff_rs::convergence::{run_convergence_study, StepRule};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Physical parameters (drug diffusing through 5 mm of tissue)
//! let params = TissueParams::drug_in_tissue();
//!
//! // 2. Single numerical solve: 50 intervals, 200 time steps
//! let solver = FtcsSolver::new();
//! let solution = solver.solve(&params, 50, 200)?;
//! assert!(solution.stability.is_stable());
//!
//! // 3. Convergence study against the analytical solution
//! let study = run_convergence_study(
//!     &params,
//!     &[20, 40, 80],
//!     &StepRule::quadratic(2),
//!     50,
//! )?;
//! println!("observed order: {:.2}", study.fit.slope);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Parameter set and analytical reference solution
//! - [`solver`]: FTCS explicit finite-difference solver
//! - [`convergence`]: Convergence study driver and log-log slope fit
//! - [`output`]: Result visualization and export (presentation layer)
//! - [`error`]: Structured error types

// Core modules
pub mod error;
pub mod physics;
pub mod solver;
pub mod convergence;

// Presentation collaborators
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use rdiff_rs::prelude::*;
    //! ```
    pub use crate::convergence::{
        run_convergence_study,
        ConvergenceRecord,
        ConvergenceStudy,
        PowerLawFit,
        StepRule,
    };
    pub use crate::error::{ConfigError, SolverError, StudyError};
    pub use crate::physics::{analytic_concentration, TissueParams};
    pub use crate::solver::{rms_error, FtcsSolution, FtcsSolver, StabilityReport};
}
