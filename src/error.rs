//! Structured error types
//!
//! The error taxonomy mirrors the three layers of the crate:
//!
//! - [`ConfigError`]: a physical parameter violates its invariant. Rejected
//!   before any computation begins.
//! - [`SolverError`]: a single solver invocation cannot start (bad grid or
//!   step count, or invalid parameters).
//! - [`StudyError`]: the convergence study as a whole cannot produce a
//!   slope fit.
//!
//! Numerical *instability* is deliberately not an error: an unstable run
//! still returns its field, flagged through
//! [`StabilityReport`](crate::solver::StabilityReport), so a parameter
//! sweep can keep going and decide afterwards which runs to trust.

use thiserror::Error;

/// Violation of a parameter-set invariant.
///
/// All five physical parameters must be finite; all except the decay rate
/// must be strictly positive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter that must be strictly positive is zero or negative.
    #[error("{name} must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// The decay rate is negative (zero is allowed: pure diffusion).
    #[error("decay rate must be non-negative, got {value}")]
    NegativeDecayRate { value: f64 },

    /// A parameter is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

/// Contract violation detected before a solver run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The parameter set failed validation.
    #[error("invalid parameters: {0}")]
    Config(#[from] ConfigError),

    /// Fewer than two grid intervals: no interior node to update.
    #[error("grid must have at least 2 intervals, got {nodes}")]
    TooFewNodes { nodes: usize },

    /// A zero step count cannot cover the simulated time span.
    #[error("step count must be at least 1")]
    ZeroSteps,
}

/// Failure of the convergence study as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudyError {
    /// One of the solver invocations was rejected.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// No resolutions were requested.
    #[error("convergence study needs at least one candidate resolution")]
    NoResolutions,

    /// Fewer than two distinct finite error records survived: the log-log
    /// slope fit is undefined and the study is reported as inconclusive.
    #[error(
        "convergence study inconclusive: {finite} distinct finite record(s), \
         at least 2 required for the slope fit"
    )]
    Inconclusive { finite: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::NonPositive {
            name: "length",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "length must be strictly positive, got -1");
    }

    #[test]
    fn test_solver_error_wraps_config_error() {
        let config = ConfigError::NegativeDecayRate { value: -2e-4 };
        let err: SolverError = config.clone().into();
        assert_eq!(err, SolverError::Config(config));
    }

    #[test]
    fn test_inconclusive_message_mentions_record_count() {
        let err = StudyError::Inconclusive { finite: 1 };
        assert!(err.to_string().contains("1 distinct finite record"));
        assert!(err.to_string().contains("inconclusive"));
    }
}
