//! FTCS explicit finite-difference solver
//!
//! # Mathematical Background
//!
//! The diffusion-decay equation
//!
//! ```text
//! ∂c/∂t = D·∂²c/∂x² − k·c
//! ```
//!
//! is discretized Forward-Time, Centered-Space on a uniform grid of
//! `nodes + 1` points over `[0, L]`:
//!
//! ```text
//! next[i] = cur[i] + α·(cur[i+1] − 2·cur[i] + cur[i−1]) − k·dt·cur[i]
//! ```
//!
//! with `α = D·dt/dx²`. The decay term uses the time level *before* the
//! update (fully explicit); this matches the time-decay semantics of the
//! analytical reference and must not be made implicit.
//!
//! # Characteristics
//!
//! - **Order**: second-order in space O(dx²), first-order in time O(dt)
//! - **Stability**: conditional; requires `α ≤ 0.5` for the diffusion term
//! - **Memory**: two field buffers, swapped each step
//!
//! # Boundary Handling
//!
//! Both boundaries are Dirichlet: the source node is pinned to `c0` and
//! the sink node to zero. They are imposed once before stepping and
//! re-imposed on the freshly computed level every step — the interior
//! update never evolves them.

use log::warn;
use nalgebra::DVector;

use crate::error::SolverError;
use crate::physics::TissueParams;

/// Stability threshold for the diffusion term of the FTCS scheme.
///
/// `α` strictly above this value amplifies the highest grid mode every
/// step; `α` exactly at the limit is still stable.
pub const STABILITY_LIMIT: f64 = 0.5;

// =================================================================================================
// Stability Report
// =================================================================================================

/// Structured outcome of the per-invocation stability check.
///
/// Carried inside every [`FtcsSolution`] so callers can react
/// programmatically instead of scraping a log. An unstable run is *not* an
/// error: the returned field is still fully defined by the update rule,
/// just potentially divergent.
///
/// # Example
///
/// ```rust
/// use rdiff_rs::physics::TissueParams;
/// use rdiff_rs::solver::FtcsSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let params = TissueParams::drug_in_tissue();
/// // Far too few steps for this grid: α > 0.5
/// let solution = FtcsSolver::new().solve(&params, 200, 10)?;
/// assert!(!solution.stability.is_stable());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    /// Stability ratio `α = D·dt/dx²`
    pub alpha: f64,

    /// Grid spacing `dx = L/nodes` [m]
    pub dx: f64,

    /// Time step `dt = T/steps` [s]
    pub dt: f64,
}

impl StabilityReport {
    /// `true` when `α ≤ 0.5` (the boundary value counts as stable).
    pub fn is_stable(&self) -> bool {
        self.alpha <= STABILITY_LIMIT
    }
}

// =================================================================================================
// Solution
// =================================================================================================

/// Result of one solver invocation.
///
/// Plain ordered numeric sequences, ready for the convergence driver or
/// the presentation layer — no rendering, no printing.
#[derive(Debug, Clone, PartialEq)]
pub struct FtcsSolution {
    /// Grid coordinates, `nodes + 1` evenly spaced points over `[0, L]`
    pub grid: Vec<f64>,

    /// Concentration at each grid node after the final step
    pub concentration: DVector<f64>,

    /// Outcome of the stability check for this run
    pub stability: StabilityReport,
}

// =================================================================================================
// FTCS Solver
// =================================================================================================

/// Explicit FTCS time-stepping solver.
///
/// # Algorithm
///
/// 1. Validate parameters, `nodes ≥ 2`, `steps ≥ 1`
/// 2. Derive `dx`, `dt`, `α`; warn (but proceed) when `α > 0.5`
/// 3. Start from the zero field, impose the Dirichlet boundaries
/// 4. For each step, update every interior node from a frozen snapshot of
///    the current level, re-impose the boundaries, swap buffers
/// 5. Return the grid and the final field together with the
///    [`StabilityReport`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FtcsSolver;

impl FtcsSolver {
    /// Create a new FTCS solver.
    pub fn new() -> Self {
        Self
    }

    /// Advance the zero initial condition over `steps` uniform time steps
    /// covering `params.total_time` on a grid of `nodes` intervals.
    ///
    /// # Errors
    ///
    /// [`SolverError::Config`] for an invalid parameter set,
    /// [`SolverError::TooFewNodes`] for `nodes < 2`,
    /// [`SolverError::ZeroSteps`] for `steps == 0`.
    pub fn solve(
        &self,
        params: &TissueParams,
        nodes: usize,
        steps: usize,
    ) -> Result<FtcsSolution, SolverError> {
        // ====== Step 1: Validation ======

        params.validate()?;

        if nodes < 2 {
            return Err(SolverError::TooFewNodes { nodes });
        }
        if steps == 0 {
            return Err(SolverError::ZeroSteps);
        }

        // ====== Step 2: Discretization ======

        let dx = params.length / nodes as f64;
        let dt = params.total_time / steps as f64;
        let alpha = params.diffusivity * dt / (dx * dx);

        let stability = StabilityReport { alpha, dx, dt };
        if !stability.is_stable() {
            warn!(
                "FTCS unstable: alpha = {:.3} > {} (nodes = {}, steps = {}); \
                 results are untrustworthy, reduce dt or coarsen the grid",
                alpha, STABILITY_LIMIT, nodes, steps
            );
        }

        let grid: Vec<f64> = (0..=nodes).map(|i| i as f64 * dx).collect();

        // ====== Step 3: Initial and Boundary Conditions ======

        // c(x, 0) = 0 everywhere, then the Dirichlet values are imposed
        // before the first step.
        let mut current = DVector::zeros(nodes + 1);
        let mut next = DVector::zeros(nodes + 1);

        let c0 = params.source_concentration;
        let k_dt = params.decay_rate * dt;

        current[0] = c0;
        current[nodes] = 0.0;

        // ====== Step 4: Time Stepping ======

        for _ in 0..steps {
            // Interior update against the frozen `current` level only.
            // `next` is a separate buffer, so no partially updated value
            // can leak into the stencil of a later index.
            for i in 1..nodes {
                next[i] = current[i]
                    + alpha * (current[i + 1] - 2.0 * current[i] + current[i - 1])
                    - k_dt * current[i];
            }

            // Re-impose the Dirichlet boundaries; they are never evolved.
            next[0] = c0;
            next[nodes] = 0.0;

            std::mem::swap(&mut current, &mut next);
        }

        // ====== Step 5: Result ======

        Ok(FtcsSolution {
            grid,
            concentration: current,
            stability,
        })
    }

    /// Solver name (for logs and plot legends).
    pub fn name(&self) -> &'static str {
        "FTCS Explicit Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{analytic_concentration, steady_state_profile, DEFAULT_SERIES_TERMS};
    use crate::solver::rms_error;

    fn reference() -> TissueParams {
        TissueParams::drug_in_tissue()
    }

    // ====== Contract Violations ======

    #[test]
    fn test_rejects_too_few_nodes() {
        let solver = FtcsSolver::new();
        assert_eq!(
            solver.solve(&reference(), 1, 100).unwrap_err(),
            SolverError::TooFewNodes { nodes: 1 }
        );
        assert_eq!(
            solver.solve(&reference(), 0, 100).unwrap_err(),
            SolverError::TooFewNodes { nodes: 0 }
        );
    }

    #[test]
    fn test_rejects_zero_steps() {
        let solver = FtcsSolver::new();
        assert_eq!(
            solver.solve(&reference(), 50, 0).unwrap_err(),
            SolverError::ZeroSteps
        );
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut params = reference();
        params.length = -1.0;

        let result = FtcsSolver::new().solve(&params, 50, 100);
        assert!(matches!(result, Err(SolverError::Config(_))));
    }

    // ====== Shape and Boundaries ======

    #[test]
    fn test_field_shape_and_boundary_values() {
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 50, 200).unwrap();

        assert_eq!(solution.grid.len(), 51);
        assert_eq!(solution.concentration.len(), 51);

        assert_eq!(solution.grid[0], 0.0);
        assert!((solution.grid[50] - params.length).abs() < 1e-15);

        // Dirichlet values are exact, not approximate
        assert_eq!(solution.concentration[0], params.source_concentration);
        assert_eq!(solution.concentration[50], 0.0);
    }

    #[test]
    fn test_boundaries_hold_for_any_step_count() {
        let params = reference();
        let solver = FtcsSolver::new();

        for &steps in &[1, 2, 7, 100] {
            let solution = solver.solve(&params, 10, steps).unwrap();
            assert_eq!(solution.concentration[0], params.source_concentration);
            assert_eq!(solution.concentration[10], 0.0);
        }
    }

    #[test]
    fn test_grid_is_uniform() {
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 40, 100).unwrap();
        let dx = params.length / 40.0;

        for i in 1..solution.grid.len() {
            let spacing = solution.grid[i] - solution.grid[i - 1];
            assert!((spacing - dx).abs() < 1e-15);
        }
    }

    // ====== Stability Report ======

    #[test]
    fn test_stability_report_values() {
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 50, 200).unwrap();

        let dx = params.length / 50.0;
        let dt = params.total_time / 200.0;
        let expected_alpha = params.diffusivity * dt / (dx * dx);

        assert!((solution.stability.alpha - expected_alpha).abs() < 1e-15);
        assert!((solution.stability.dx - dx).abs() < 1e-15);
        assert!((solution.stability.dt - dt).abs() < 1e-15);
        assert!(solution.stability.is_stable());
    }

    #[test]
    fn test_unstable_run_is_flagged_but_still_returns() {
        // nodes = 400, steps = 20 on the reference parameters gives
        // alpha = 1e-10 · 360 / (1.25e-5)² ≈ 230
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 400, 20).unwrap();

        assert!(solution.stability.alpha > STABILITY_LIMIT);
        assert!(!solution.stability.is_stable());
        // The field is still fully defined by the update rule.
        assert_eq!(solution.concentration.len(), 401);
        assert_eq!(solution.concentration[0], params.source_concentration);
    }

    #[test]
    fn test_alpha_exactly_at_limit_is_stable() {
        let report = StabilityReport {
            alpha: STABILITY_LIMIT,
            dx: 1.0,
            dt: 1.0,
        };
        assert!(report.is_stable());

        let report = StabilityReport {
            alpha: STABILITY_LIMIT + 1e-12,
            dx: 1.0,
            dt: 1.0,
        };
        assert!(!report.is_stable());
    }

    // ====== Frozen-Snapshot Invariant ======

    #[test]
    fn test_single_step_uses_frozen_level() {
        // After one step from the initial state, only node 1 can be
        // non-zero in the interior: next[1] = α·c0, next[i>1] = 0.
        // An in-place left-to-right sweep would leak α²·c0 into node 2.
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 10, 1).unwrap();

        let alpha = solution.stability.alpha;
        assert!(
            (solution.concentration[1] - alpha * params.source_concentration).abs() < 1e-15
        );
        for i in 2..10 {
            assert_eq!(solution.concentration[i], 0.0, "node {} leaked", i);
        }
    }

    #[test]
    fn test_decay_term_uses_previous_level() {
        // Two steps on a 2-interval grid, worked by hand.
        // next[1] = c1 + α·(c2 − 2c1 + c0) − k·dt·c1
        let params = TissueParams::new(1.0, 0.01, 0.5, 2.0, 1.0).unwrap();
        let solution = FtcsSolver::new().solve(&params, 2, 2).unwrap();

        let dx = 0.5;
        let dt = 0.5;
        let alpha = 0.01 * dt / (dx * dx); // 0.02
        let k_dt = 0.5 * dt; // 0.25

        // step 1: c = [2, 0, 0] → c1 = α·2
        let c1_after_1 = alpha * 2.0;
        // step 2: c1 = c1 + α·(0 − 2c1 + 2) − k·dt·c1
        let c1_after_2 = c1_after_1 + alpha * (0.0 - 2.0 * c1_after_1 + 2.0) - k_dt * c1_after_1;

        assert!((solution.concentration[1] - c1_after_2).abs() < 1e-15);
    }

    // ====== Physical Behaviour ======

    #[test]
    fn test_pure_diffusion_reaches_linear_steady_state() {
        // k = 0, run far past the diffusion time L²/D: the discrete steady
        // state of the Dirichlet problem is exactly the linear profile.
        let params = TissueParams::new(1.0, 1.0, 0.0, 1.0, 3.0).unwrap();
        let solution = FtcsSolver::new().solve(&params, 20, 3000).unwrap();
        assert!(solution.stability.is_stable());

        for (i, &x) in solution.grid.iter().enumerate() {
            let expected = 1.0 - x;
            assert!(
                (solution.concentration[i] - expected).abs() < 1e-6,
                "node {}: {} vs linear {}",
                i,
                solution.concentration[i],
                expected
            );
        }
    }

    #[test]
    fn test_long_run_approaches_analytic_steady_state() {
        // Ten simulated days on the reference tissue: transient gone.
        let mut params = reference();
        params.total_time = 864_000.0;

        // Keep alpha below 0.5: dt ≤ 0.5·dx²/D = 0.5·(2.5e-4)²/1e-10
        let solution = FtcsSolver::new().solve(&params, 20, 10_000).unwrap();
        assert!(solution.stability.is_stable());

        // Tolerance is the spatial discretization error of the steep
        // steady profile at this dx (γ·dx ≈ 0.35), not roundoff.
        for (i, &x) in solution.grid.iter().enumerate() {
            let expected = steady_state_profile(x, &params);
            assert!(
                (solution.concentration[i] - expected).abs() < 5e-3,
                "node {}: {} vs steady {}",
                i,
                solution.concentration[i],
                expected
            );
        }
    }

    #[test]
    fn test_coarse_grid_matches_reference_within_expected_error() {
        // The documented verification scenario: Nx = 50, Nt = 200.
        let params = reference();
        let solution = FtcsSolver::new().solve(&params, 50, 200).unwrap();
        assert!(solution.stability.is_stable());

        let analytic = analytic_concentration(
            &solution.grid,
            params.total_time,
            &params,
            DEFAULT_SERIES_TERMS,
        );

        let error = rms_error(&solution.concentration, &analytic);
        assert!(
            error > 1e-4 && error < 5e-2,
            "RMS error {} outside the coarse-grid range",
            error
        );
    }
}
