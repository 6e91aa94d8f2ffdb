//! Common utilities for integration tests

pub mod test_helpers;

#[allow(unused_imports)]
pub use test_helpers::{max_abs_deviation, reference_scenario, relative_error};
