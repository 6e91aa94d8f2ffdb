//! Data export for external analysis
//!
//! CSV writers for the two sequences the core produces: grid/profile
//! pairs and the convergence table. Output is compatible with pandas,
//! Excel, gnuplot and friends.

mod csv;

pub use csv::{export_convergence_csv, export_profile_csv, CsvConfig};
