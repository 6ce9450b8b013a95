use super::{CoverageRow, ThresholdCoverage};
use crate::model::access::WalkTimeRecord;
use crate::model::cell::CellCode;
use crate::model::error::AccessError;
use crate::model::io::FlexibleTable;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// coverage rolled up per cell: of the schools this cell's students
/// attend, how many are walkable within each threshold.
pub fn coverage_by_cell(records: &[WalkTimeRecord], thresholds_min: &[u32]) -> Vec<CoverageRow> {
    aggregate(
        records.iter().map(|r| (r.cell.0.clone(), r.walk_time_sec)),
        thresholds_min,
    )
}

/// coverage rolled up per school: of the cells sending students to this
/// school, how many reach a serving stop within each threshold.
pub fn coverage_by_school(records: &[WalkTimeRecord], thresholds_min: &[u32]) -> Vec<CoverageRow> {
    aggregate(
        records.iter().map(|r| (r.school.clone(), r.walk_time_sec)),
        thresholds_min,
    )
}

fn aggregate(
    observations: impl Iterator<Item = (String, f64)>,
    thresholds_min: &[u32],
) -> Vec<CoverageRow> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (key, walk_time_sec) in observations {
        groups.entry(key).or_default().push(walk_time_sec);
    }
    groups
        .into_iter()
        .map(|(key, times)| {
            let pairs = times.len() as u64;
            let thresholds = thresholds_min
                .iter()
                .map(|threshold| {
                    let limit = f64::from(*threshold) * 60.0;
                    let pairs_within = times.iter().filter(|t| **t <= limit).count() as u64;
                    ThresholdCoverage {
                        threshold_min: *threshold,
                        pairs_within,
                        fraction: pairs_within as f64 / pairs as f64,
                    }
                })
                .collect();
            CoverageRow {
                key,
                pairs,
                thresholds,
            }
        })
        .collect()
}

/// writes a coverage table with one column pair per threshold
/// (`pairs_within_{t}_min`, `pct_within_{t}_min`).
pub fn write_coverage_csv(
    path: &str,
    key_header: &str,
    rows: &[CoverageRow],
    thresholds_min: &[u32],
) -> Result<(), AccessError> {
    let mut writer = csv::Writer::from_path(Path::new(path))
        .map_err(|e| AccessError::CsvWriteError(path.to_string(), e))?;
    let mut header = vec![key_header.to_string(), String::from("pairs")];
    for threshold in thresholds_min.iter() {
        header.push(format!("pairs_within_{threshold}_min"));
        header.push(format!("pct_within_{threshold}_min"));
    }
    writer
        .write_record(&header)
        .map_err(|e| AccessError::CsvWriteError(path.to_string(), e))?;
    for row in rows.iter() {
        let mut record = vec![row.key.clone(), row.pairs.to_string()];
        for t in row.thresholds.iter() {
            record.push(t.pairs_within.to_string());
            record.push(t.fraction.to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| AccessError::CsvWriteError(path.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| AccessError::IoError(path.to_string(), e))?;
    Ok(())
}

/// reads the per-cell coverage fraction at one threshold back from a
/// coverage table written by [`write_coverage_csv`].
pub fn read_cell_coverage(
    path: &str,
    threshold_min: u32,
) -> Result<HashMap<CellCode, f64>, AccessError> {
    let table = FlexibleTable::from_csv_path(path)?;
    let key_column = table.find_column(&["sa1_code_2021"]).ok_or_else(|| {
        AccessError::ConfigurationError(format!(
            "coverage table {path} lacks an sa1_code_2021 column; run 'kpis' first"
        ))
    })?;
    let pct_header = format!("pct_within_{threshold_min}_min");
    let pct_column = table.column_index(&pct_header).ok_or_else(|| {
        AccessError::ConfigurationError(format!(
            "coverage table {path} lacks a {pct_header} column; re-run 'kpis' with threshold {threshold_min}"
        ))
    })?;
    let coverage = table
        .rows
        .iter()
        .filter_map(|row| {
            let code = table.value(row, key_column).trim();
            let fraction = table.value(row, pct_column).parse::<f64>().ok()?;
            if code.is_empty() {
                None
            } else {
                Some((CellCode::from(code), fraction))
            }
        })
        .collect();
    Ok(coverage)
}
