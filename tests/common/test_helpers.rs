//! Helper functions for integration tests

use nalgebra::DVector;
use rdiff_rs::physics::TissueParams;

/// The documented verification scenario: reference tissue parameters with
/// a 50-interval grid and 200 time steps.
pub fn reference_scenario() -> (TissueParams, usize, usize) {
    (TissueParams::drug_in_tissue(), 50, 200)
}

/// Relative error with a floor for near-zero references.
pub fn relative_error(value: f64, expected: f64) -> f64 {
    let scale = expected.abs().max(1e-12);
    (value - expected).abs() / scale
}

/// Largest elementwise deviation between two fields of equal length.
pub fn max_abs_deviation(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    assert_eq!(a.len(), b.len(), "field lengths differ");
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max)
}
