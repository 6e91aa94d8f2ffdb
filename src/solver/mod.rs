//! Numerical solver
//!
//! This module provides the explicit finite-difference solver for the
//! diffusion-decay problem and the error metric used to compare it against
//! the analytical reference.
//!
//! # Core Concepts
//!
//! ## The Scheme (FTCS)
//!
//! Forward-Time, Centered-Space: forward difference in time, centered
//! second difference in space. The update for an interior node is
//!
//! ```text
//! next[i] = cur[i] + α·(cur[i+1] − 2·cur[i] + cur[i−1]) − k·dt·cur[i]
//! α = D·dt/dx²
//! ```
//!
//! ## Stability
//!
//! The diffusion part of the scheme is conditionally stable: for
//! `α > 0.5` the highest spatial mode is amplified every step and the
//! error grows without bound. The solver *checks* this once per invocation
//! and reports it through [`StabilityReport`] — it does not abort, because
//! a caller sweeping parameters needs to know which runs are untrustworthy
//! without losing the sweep.
//!
//! ## Double Buffering
//!
//! Every interior node is updated from a frozen snapshot of the current
//! time level. The solver keeps two field buffers and swaps them after
//! each step; an in-place sweep that read an already-updated neighbor
//! would silently change the scheme. This is an invariant, not an
//! implementation detail.
//!
//! # Module Organization
//!
//! - **`ftcs`**: [`FtcsSolver`], [`FtcsSolution`], [`StabilityReport`]
//! - this file: [`rms_error`], the metric shared with the convergence
//!   driver
//!
//! # Quick Start
//!
//! ```rust
//! use rdiff_rs::physics::TissueParams;
//! use rdiff_rs::solver::FtcsSolver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = TissueParams::drug_in_tissue();
//! let solution = FtcsSolver::new().solve(&params, 50, 200)?;
//!
//! assert_eq!(solution.concentration.len(), 51);
//! assert_eq!(solution.concentration[0], 1.0);   // source
//! assert_eq!(solution.concentration[50], 0.0);  // sink
//! # Ok(())
//! # }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

mod ftcs;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use ftcs::{FtcsSolution, FtcsSolver, StabilityReport, STABILITY_LIMIT};

use nalgebra::DVector;

// =================================================================================================
// Error Metric
// =================================================================================================

/// Root-mean-square difference between two same-length fields.
///
/// Zero if and only if the fields agree at every node; independent of the
/// order in which the node pairs are visited.
///
/// # Panics
///
/// Panics when the fields have different lengths — comparing fields from
/// different grids is a caller bug, not a recoverable condition.
///
/// # Example
///
/// ```rust
/// use nalgebra::DVector;
/// use rdiff_rs::solver::rms_error;
///
/// let a = DVector::from_vec(vec![1.0, 2.0, 3.0]);
/// let b = DVector::from_vec(vec![1.0, 2.0, 4.0]);
/// assert!((rms_error(&a, &b) - (1.0f64 / 3.0).sqrt()).abs() < 1e-15);
/// ```
pub fn rms_error(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "rms_error: field lengths differ ({} vs {})",
        a.len(),
        b.len()
    );

    let sum_squared: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum();

    (sum_squared / a.len() as f64).sqrt()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_error_zero_iff_equal() {
        let a = DVector::from_vec(vec![0.5, -1.0, 2.0, 0.0]);
        assert_eq!(rms_error(&a, &a), 0.0);

        let mut b = a.clone();
        b[2] += 1e-9;
        assert!(rms_error(&a, &b) > 0.0);
    }

    #[test]
    fn test_rms_error_pair_order_independent() {
        let a = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let b = DVector::from_vec(vec![0.0, 4.0, 1.0, 8.0]);

        // Reversing both fields permutes the node pairs without changing
        // any individual difference.
        let a_rev = DVector::from_vec(a.iter().rev().copied().collect::<Vec<_>>());
        let b_rev = DVector::from_vec(b.iter().rev().copied().collect::<Vec<_>>());

        assert_eq!(rms_error(&a, &b), rms_error(&a_rev, &b_rev));
    }

    #[test]
    fn test_rms_error_known_value() {
        let a = DVector::from_vec(vec![0.0, 0.0]);
        let b = DVector::from_vec(vec![3.0, 4.0]);
        // sqrt((9 + 16) / 2)
        assert!((rms_error(&a, &b) - 12.5f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_rms_error_propagates_non_finite() {
        let a = DVector::from_vec(vec![0.0, f64::NAN]);
        let b = DVector::from_vec(vec![0.0, 0.0]);
        assert!(rms_error(&a, &b).is_nan());

        let c = DVector::from_vec(vec![0.0, f64::INFINITY]);
        assert!(!rms_error(&c, &b).is_finite());
    }

    #[test]
    #[should_panic(expected = "field lengths differ")]
    fn test_rms_error_length_mismatch_panics() {
        let a = DVector::from_vec(vec![1.0, 2.0]);
        let b = DVector::from_vec(vec![1.0]);
        rms_error(&a, &b);
    }
}
