use crate::config::AccessConfiguration;
use crate::model::access::WalkTimeRecord;
use crate::model::error::AccessError;
use crate::model::io::csv_ops;
use crate::model::kpi::kpi_ops;

/// the `kpis` stage: roll walk times up into per-cell and per-school
/// coverage tables.
pub fn run(
    walk_times_path: &str,
    by_cell_output: &str,
    by_school_output: &str,
    conf: &AccessConfiguration,
) -> Result<(), AccessError> {
    let records: Vec<WalkTimeRecord> = csv_ops::read_csv(walk_times_path)?;
    if records.is_empty() {
        return Err(AccessError::ConfigurationError(format!(
            "walk-times table {walk_times_path} is empty; run 'walk-times' first"
        )));
    }
    let thresholds = &conf.thresholds_min;
    let by_cell = kpi_ops::coverage_by_cell(&records, thresholds);
    let by_school = kpi_ops::coverage_by_school(&records, thresholds);
    kpi_ops::write_coverage_csv(by_cell_output, "sa1_code_2021", &by_cell, thresholds)?;
    kpi_ops::write_coverage_csv(by_school_output, "school", &by_school, thresholds)?;
    log::info!(
        "wrote coverage for {} cells and {} schools at thresholds {:?}",
        by_cell.len(),
        by_school.len(),
        thresholds
    );
    Ok(())
}
