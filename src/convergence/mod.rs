//! Convergence study driver
//!
//! Runs the FTCS solver at a sequence of grid resolutions, measures the
//! RMS error of each run against the analytical reference at the final
//! time, and fits the observed `error ∝ dxᵖ` relationship on log-log axes.
//!
//! # Grid / Time-Step Coupling
//!
//! Refining only in space would eventually violate the stability
//! condition `α = D·dt/dx² ≤ 0.5`: halving `dx` quadruples `α` at fixed
//! `dt`. The driver therefore couples the step count to the node count
//! through a [`StepRule`]:
//!
//! - [`StepRule::Quadratic`]: `steps = scale · n²`. Holds `α` constant
//!   across resolutions, so the O(dt) temporal error also shrinks like
//!   `dx²` and the fitted slope isolates the spatial order.
//! - [`StepRule::StabilityBound`]: `steps = ⌈2·D·T·n²/L² · margin⌉`, the
//!   minimal step count derived directly from `α ≤ 0.5`, times a safety
//!   margin. Prefer this when the quadratic constant would be guesswork
//!   for unfamiliar parameters.
//!
//! # Failure Containment
//!
//! A non-finite RMS error (an unstable or overflowed run) truncates the
//! study at that resolution: the offending point is never fitted, coarser
//! resolutions already gathered are kept, and the truncation is recorded
//! on the result. Fewer than two distinct finite records make the slope
//! fit undefined and the study is reported inconclusive — never a
//! degenerate fit, never a NaN presented as data.
//!
//! # Example
//!
//! ```rust
//! use rdiff_rs::convergence::{run_convergence_study, StepRule};
//! use rdiff_rs::physics::TissueParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = TissueParams::drug_in_tissue();
//! let study = run_convergence_study(
//!     &params,
//!     &[20, 40, 80],
//!     &StepRule::quadratic(2),
//!     50,
//! )?;
//!
//! // Second-order interior stencil: slope ≈ 2
//! assert!(study.fit.slope > 1.5 && study.fit.slope < 2.5);
//! # Ok(())
//! # }
//! ```

use log::{info, warn};
use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::StudyError;
use crate::physics::{analytic_concentration, TissueParams};
use crate::solver::{rms_error, FtcsSolver, STABILITY_LIMIT};

// =================================================================================================
// Step Rule
// =================================================================================================

/// Rule coupling the time-step count to the node count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepRule {
    /// `steps = scale · n²`.
    ///
    /// Keeps `α` constant while refining, provided the coarsest resolution
    /// is stable. `scale = 2` reproduces the reference study.
    Quadratic { scale: usize },

    /// `steps = ⌈(2·D·T/L²) · n² · margin⌉`.
    ///
    /// The minimal step count that satisfies `α ≤ 0.5`, scaled by a
    /// safety `margin ≥ 1`.
    StabilityBound { margin: f64 },

    /// The same step count for every resolution.
    ///
    /// Isolates spatial error when `steps` is very large — but fine grids
    /// will cross the stability limit and truncate the study.
    Fixed { steps: usize },
}

impl StepRule {
    /// Quadratic rule with the given scale constant.
    pub fn quadratic(scale: usize) -> Self {
        Self::Quadratic { scale }
    }

    /// Stability-derived rule with the given safety margin.
    pub fn stability_bound(margin: f64) -> Self {
        Self::StabilityBound { margin }
    }

    /// Step count for a grid of `nodes` intervals.
    pub fn steps_for(&self, params: &TissueParams, nodes: usize) -> usize {
        let n2 = nodes * nodes;
        match *self {
            Self::Quadratic { scale } => (scale * n2).max(1),
            Self::StabilityBound { margin } => {
                let minimal = params.diffusivity * params.total_time * n2 as f64
                    / (STABILITY_LIMIT * params.length * params.length);
                (minimal * margin).ceil().max(1.0) as usize
            }
            Self::Fixed { steps } => steps.max(1),
        }
    }
}

// =================================================================================================
// Records and Fit
// =================================================================================================

/// One (resolution, error) measurement of the study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRecord {
    /// Number of grid intervals
    pub nodes: usize,

    /// Grid spacing `dx = L/nodes` [m]
    pub dx: f64,

    /// RMS error of the solver against the analytical reference
    pub rms_error: f64,
}

/// Least-squares fit of `ln(error) = slope·ln(dx) + intercept`.
///
/// Diagnostic output only: the slope estimates the empirical convergence
/// order, it never alters behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// Empirical convergence order `p` in `error ∝ dxᵖ`
    pub slope: f64,

    /// Fitted intercept on log-log axes
    pub intercept: f64,
}

/// Complete outcome of a convergence study.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceStudy {
    /// Finite records, ordered as the candidate resolutions were given
    pub records: Vec<ConvergenceRecord>,

    /// Log-log least-squares fit over `records`
    pub fit: PowerLawFit,

    /// Node count at which a non-finite error truncated the study, if any
    pub truncated_at: Option<usize>,
}

// =================================================================================================
// Driver
// =================================================================================================

/// Run the convergence study.
///
/// For each candidate node count `n` (given in increasing order) the
/// solver runs with `rule.steps_for(params, n)` time steps, the reference
/// is evaluated on the same grid at `total_time` with `n_terms` series
/// terms, and the RMS error is recorded. See the module docs for the
/// truncation and failure policy.
///
/// # Errors
///
/// [`StudyError::NoResolutions`] for an empty candidate list,
/// [`StudyError::Solver`] when an invocation is rejected up front, and
/// [`StudyError::Inconclusive`] when fewer than two distinct finite
/// records remain.
pub fn run_convergence_study(
    params: &TissueParams,
    node_counts: &[usize],
    rule: &StepRule,
    n_terms: usize,
) -> Result<ConvergenceStudy, StudyError> {
    if node_counts.is_empty() {
        return Err(StudyError::NoResolutions);
    }
    params.validate().map_err(crate::error::SolverError::from)?;

    let raw = measure_all(params, node_counts, rule, n_terms)?;

    // Truncate at the first non-finite error: that resolution and every
    // later (finer, smaller-dt) one are unusable for the fit.
    let mut records = Vec::with_capacity(raw.len());
    let mut truncated_at = None;

    for record in raw {
        if !record.rms_error.is_finite() {
            warn!(
                "grid n = {} produced a non-finite error; dropping it and \
                 all finer resolutions from the fit",
                record.nodes
            );
            truncated_at = Some(record.nodes);
            break;
        }
        info!(
            "n = {:>5}  dx = {:.3e}  rms = {:.3e}",
            record.nodes, record.dx, record.rms_error
        );
        records.push(record);
    }

    // The fit needs at least two distinct spacings. Candidates arrive in
    // increasing order, so repeated node counts sit adjacent; they share
    // one dx and would zero the least-squares variance.
    let mut distinct: Vec<usize> = records.iter().map(|r| r.nodes).collect();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(StudyError::Inconclusive {
            finite: distinct.len(),
        });
    }

    let fit = fit_log_log(&records);

    Ok(ConvergenceStudy {
        records,
        fit,
        truncated_at,
    })
}

/// Measure every candidate resolution.
///
/// Each resolution owns its own grid and field, so with the `parallel`
/// feature the measurements run independently through rayon; the
/// truncation policy is applied afterwards on the ordered results.
#[cfg(feature = "parallel")]
fn measure_all(
    params: &TissueParams,
    node_counts: &[usize],
    rule: &StepRule,
    n_terms: usize,
) -> Result<Vec<ConvergenceRecord>, StudyError> {
    node_counts
        .par_iter()
        .map(|&nodes| measure_one(params, nodes, rule, n_terms))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn measure_all(
    params: &TissueParams,
    node_counts: &[usize],
    rule: &StepRule,
    n_terms: usize,
) -> Result<Vec<ConvergenceRecord>, StudyError> {
    let mut records = Vec::with_capacity(node_counts.len());
    for &nodes in node_counts {
        let record = measure_one(params, nodes, rule, n_terms)?;
        let finite = record.rms_error.is_finite();
        records.push(record);
        if !finite {
            // Every finer resolution shares the same fate; don't burn
            // time computing fields we already know are unusable.
            break;
        }
    }
    Ok(records)
}

/// Solve one resolution and compare it against the reference.
fn measure_one(
    params: &TissueParams,
    nodes: usize,
    rule: &StepRule,
    n_terms: usize,
) -> Result<ConvergenceRecord, StudyError> {
    let steps = rule.steps_for(params, nodes);
    let solution = FtcsSolver::new().solve(params, nodes, steps)?;

    let reference = analytic_concentration(&solution.grid, params.total_time, params, n_terms);
    let error = rms_error(&solution.concentration, &reference);

    Ok(ConvergenceRecord {
        nodes,
        dx: params.length / nodes as f64,
        rms_error: error,
    })
}

/// Least-squares line through `(ln dx, ln error)`.
fn fit_log_log(records: &[ConvergenceRecord]) -> PowerLawFit {
    let n = records.len() as f64;

    let log_points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.dx.ln(), r.rms_error.ln()))
        .collect();

    let mean_x: f64 = log_points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y: f64 = log_points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let covariance: f64 = log_points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let variance: f64 = log_points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();

    let slope = covariance / variance;
    let intercept = mean_y - slope * mean_x;

    PowerLawFit { slope, intercept }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn reference() -> TissueParams {
        TissueParams::drug_in_tissue()
    }

    // ====== Step Rule ======

    #[test]
    fn test_quadratic_rule() {
        let rule = StepRule::quadratic(2);
        assert_eq!(rule.steps_for(&reference(), 20), 800);
        assert_eq!(rule.steps_for(&reference(), 320), 204_800);
    }

    #[test]
    fn test_quadratic_rule_keeps_alpha_constant() {
        let params = reference();
        let rule = StepRule::quadratic(2);

        let alpha_of = |n: usize| {
            let dx = params.length / n as f64;
            let dt = params.total_time / rule.steps_for(&params, n) as f64;
            params.diffusivity * dt / (dx * dx)
        };

        let base = alpha_of(20);
        for &n in &[40, 80, 160, 320] {
            assert!((alpha_of(n) - base).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stability_bound_rule_keeps_alpha_at_or_below_limit() {
        let params = reference();
        let rule = StepRule::stability_bound(1.0);

        for &n in &[3, 20, 50, 137, 320] {
            let steps = rule.steps_for(&params, n);
            let dx = params.length / n as f64;
            let dt = params.total_time / steps as f64;
            let alpha = params.diffusivity * dt / (dx * dx);
            assert!(
                alpha <= STABILITY_LIMIT + 1e-12,
                "n = {}: alpha = {} exceeds the limit",
                n,
                alpha
            );
        }
    }

    #[test]
    fn test_stability_bound_margin_tightens_alpha() {
        let params = reference();
        let loose = StepRule::stability_bound(1.0).steps_for(&params, 50);
        let tight = StepRule::stability_bound(4.0).steps_for(&params, 50);
        assert!(tight >= 4 * loose - 4);
    }

    #[test]
    fn test_step_rule_never_returns_zero() {
        let params = TissueParams::new(1.0, 1e-12, 0.0, 1.0, 1e-6).unwrap();
        assert!(StepRule::stability_bound(1.0).steps_for(&params, 2) >= 1);
    }

    // ====== Fit ======

    #[test]
    fn test_fit_recovers_exact_power_law() {
        // error = 3·dx²  →  slope 2, intercept ln 3
        let records: Vec<ConvergenceRecord> = [0.1, 0.05, 0.025, 0.0125]
            .iter()
            .map(|&dx| ConvergenceRecord {
                nodes: (1.0 / dx) as usize,
                dx,
                rms_error: 3.0 * dx * dx,
            })
            .collect();

        let fit = fit_log_log(&records);
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 3.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_fit_first_order_law() {
        let records: Vec<ConvergenceRecord> = [0.2, 0.1, 0.05]
            .iter()
            .map(|&dx| ConvergenceRecord {
                nodes: (1.0 / dx) as usize,
                dx,
                rms_error: 0.7 * dx,
            })
            .collect();

        let fit = fit_log_log(&records);
        assert!((fit.slope - 1.0).abs() < 1e-12);
    }

    // ====== Driver ======

    #[test]
    fn test_study_on_reference_configuration_is_second_order() {
        // Small version of the full verification study (the complete
        // resolution ladder runs in the integration tests).
        let study = run_convergence_study(
            &reference(),
            &[20, 40, 80],
            &StepRule::quadratic(2),
            50,
        )
        .unwrap();

        assert_eq!(study.records.len(), 3);
        assert!(study.truncated_at.is_none());
        assert!(
            study.fit.slope > 1.8 && study.fit.slope < 2.2,
            "observed order {} not second order",
            study.fit.slope
        );
    }

    #[test]
    fn test_records_keep_candidate_order_and_spacing() {
        let params = reference();
        let study =
            run_convergence_study(&params, &[20, 40], &StepRule::quadratic(2), 50).unwrap();

        assert_eq!(study.records[0].nodes, 20);
        assert_eq!(study.records[1].nodes, 40);
        assert!((study.records[0].dx - params.length / 20.0).abs() < 1e-15);
        assert!(study.records[0].rms_error > study.records[1].rms_error);
    }

    #[test]
    fn test_empty_candidate_list_rejected() {
        let err = run_convergence_study(&reference(), &[], &StepRule::quadratic(2), 50)
            .unwrap_err();
        assert_eq!(err, StudyError::NoResolutions);
    }

    #[test]
    fn test_contract_violation_propagates() {
        // A 1-interval grid is a solver contract violation, not a
        // numerical failure: it aborts the study immediately.
        let err = run_convergence_study(&reference(), &[1, 20], &StepRule::quadratic(2), 50)
            .unwrap_err();
        assert_eq!(
            err,
            StudyError::Solver(SolverError::TooFewNodes { nodes: 1 })
        );
    }

    #[test]
    fn test_unstable_resolutions_truncate_the_study() {
        // A fixed step count: alpha grows with n², so the coarse grids
        // stay stable (n = 20: α ≈ 0.03, n = 40: α ≈ 0.12) while
        // n = 160 (α ≈ 1.8) diverges into a non-finite error.
        let study = run_convergence_study(
            &reference(),
            &[20, 40, 160, 320],
            &StepRule::Fixed { steps: 400 },
            50,
        )
        .unwrap();

        assert_eq!(study.truncated_at, Some(160));
        assert_eq!(study.records.len(), 2);
        assert_eq!(study.records[0].nodes, 20);
        assert_eq!(study.records[1].nodes, 40);
        assert!(study.records.iter().all(|r| r.rms_error.is_finite()));
    }

    #[test]
    fn test_inconclusive_with_single_resolution() {
        let err = run_convergence_study(&reference(), &[20], &StepRule::quadratic(2), 50)
            .unwrap_err();
        assert_eq!(err, StudyError::Inconclusive { finite: 1 });
    }

    #[test]
    fn test_duplicate_resolutions_are_inconclusive() {
        // Two records sharing one dx carry no slope information; fitting
        // them would divide by a zero variance.
        let err = run_convergence_study(&reference(), &[20, 20], &StepRule::quadratic(2), 50)
            .unwrap_err();
        assert_eq!(err, StudyError::Inconclusive { finite: 1 });
    }

    #[test]
    fn test_duplicate_resolution_beside_a_distinct_one_still_fits() {
        let study =
            run_convergence_study(&reference(), &[20, 20, 40], &StepRule::quadratic(2), 50)
                .unwrap();

        assert_eq!(study.records.len(), 3);
        assert!(study.fit.slope.is_finite());
        assert!(study.fit.slope > 1.5 && study.fit.slope < 2.5);
    }

    #[test]
    fn test_stability_bound_rule_produces_conclusive_study() {
        let study = run_convergence_study(
            &reference(),
            &[20, 40, 80],
            &StepRule::stability_bound(2.0),
            50,
        )
        .unwrap();

        assert!(study.fit.slope > 1.5 && study.fit.slope < 2.5);
    }
}
