mod coverage_row;
pub mod kpi_ops;

pub use coverage_row::{CoverageRow, ThresholdCoverage};
