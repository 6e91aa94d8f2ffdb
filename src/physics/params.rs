//! Physical parameter set
//!
//! One immutable bundle of constants defines one diffusion-decay problem.
//! The struct replaces the ambient "parameter dictionary" pattern: it is
//! explicitly constructed, validated up front, and passed by reference into
//! every component — no shared mutable state.

use crate::error::ConfigError;

// =================================================================================================
// Parameter Set
// =================================================================================================

/// Physical constants of the 1-D diffusion-decay problem.
///
/// # Invariants
///
/// All fields are finite. `length`, `diffusivity`, `source_concentration`
/// and `total_time` are strictly positive; `decay_rate` is non-negative
/// (zero means pure diffusion). [`TissueParams::new`] enforces these,
/// direct struct construction can be re-checked with
/// [`TissueParams::validate`].
///
/// # Example
///
/// ```rust
/// use rdiff_rs::physics::TissueParams;
///
/// let params = TissueParams::new(0.005, 1e-10, 2e-4, 1.0, 7200.0).unwrap();
/// assert_eq!(params, TissueParams::drug_in_tissue());
///
/// // Invalid parameters are rejected before any computation
/// assert!(TissueParams::new(-1.0, 1e-10, 2e-4, 1.0, 7200.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TissueParams {
    /// Domain length L [m]
    pub length: f64,

    /// Diffusion coefficient D [m²/s]
    pub diffusivity: f64,

    /// First-order decay rate constant k [1/s]
    pub decay_rate: f64,

    /// Source concentration c0 at x = 0 [arbitrary units]
    pub source_concentration: f64,

    /// Total simulated time T [s]
    pub total_time: f64,
}

impl TissueParams {
    /// Create a validated parameter set.
    pub fn new(
        length: f64,
        diffusivity: f64,
        decay_rate: f64,
        source_concentration: f64,
        total_time: f64,
    ) -> Result<Self, ConfigError> {
        let params = Self {
            length,
            diffusivity,
            decay_rate,
            source_concentration,
            total_time,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reference configuration: drug diffusing through 5 mm of biological
    /// tissue over two hours.
    ///
    /// `L = 5 mm`, `D = 1e-10 m²/s`, `k = 2e-4 s⁻¹`, `c0 = 1`, `T = 7200 s`.
    pub fn drug_in_tissue() -> Self {
        Self {
            length: 0.005,
            diffusivity: 1e-10,
            decay_rate: 2e-4,
            source_concentration: 1.0,
            total_time: 7200.0,
        }
    }

    /// Check every field against its invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("length", self.length),
            ("diffusivity", self.diffusivity),
            ("source concentration", self.source_concentration),
            ("total time", self.total_time),
        ];

        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if !self.decay_rate.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "decay rate",
                value: self.decay_rate,
            });
        }
        if self.decay_rate < 0.0 {
            return Err(ConfigError::NegativeDecayRate {
                value: self.decay_rate,
            });
        }

        Ok(())
    }

    /// Decay length scale ratio `γL` with `γ = sqrt(k/D)`.
    ///
    /// Governs how steep the steady-state profile is; used by the
    /// analytical evaluator.
    pub fn gamma(&self) -> f64 {
        (self.decay_rate / self.diffusivity).sqrt()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
