//! Problem definition and analytical reference
//!
//! This module holds everything that is *physics* rather than *numerics*:
//!
//! - **Parameter set** ([`TissueParams`]): the five physical constants that
//!   define one diffusion-decay problem. Constructed once, validated once,
//!   shared by read-only reference with every other component.
//! - **Analytical solution** ([`analytic_concentration`]): the exact
//!   eigenfunction expansion the numerical solver is verified against.
//!
//! # Architecture
//!
//! The physics side never time-steps anything. The analytical evaluator is
//! a pure function of `(x, t, params)` — a finite summation, not state
//! evolution. Everything iterative lives in [`solver`](crate::solver).
//!
//! # Example
//!
//! ```rust
//! use rdiff_rs::physics::{analytic_concentration, TissueParams};
//!
//! let params = TissueParams::drug_in_tissue();
//! let x = vec![0.0, 0.0025, 0.005];
//! let c = analytic_concentration(&x, params.total_time, &params, 50);
//!
//! // Boundary values are satisfied exactly at any time
//! assert!((c[0] - params.source_concentration).abs() < 1e-12);
//! assert!(c[2].abs() < 1e-9);
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

mod analytic;
mod params;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use analytic::{analytic_concentration, steady_state_profile, DEFAULT_SERIES_TERMS};
pub use params::TissueParams;
