use crate::model::error::AccessError;
use serde::Serialize;
use std::path::Path;

/// a delimited table with lower-cased headers, for datasets whose exact
/// schema varies between portal exports.
#[derive(Debug, Clone)]
pub struct FlexibleTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FlexibleTable {
    pub fn from_csv_path(path: &str) -> Result<FlexibleTable, AccessError> {
        let mut reader = csv::Reader::from_path(Path::new(path)).map_err(|e| {
            AccessError::ConfigurationError(format!(
                "missing or unreadable table {path}: {e}"
            ))
        })?;
        let headers = reader
            .headers()
            .map_err(|e| AccessError::CsvReadError(path.to_string(), e))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect::<Vec<_>>();
        let mut rows = vec![];
        for record in reader.records() {
            let record = record.map_err(|e| AccessError::CsvReadError(path.to_string(), e))?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }
        Ok(FlexibleTable { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// first matching column from an ordered candidate list.
    pub fn find_column(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|c| self.column_index(c))
    }

    pub fn value<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(|v| v.as_str()).unwrap_or("")
    }
}

/// reads a headered CSV file into typed rows.
pub fn read_csv<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>, AccessError> {
    let mut reader = csv::Reader::from_path(Path::new(path)).map_err(|e| {
        AccessError::ConfigurationError(format!("missing or unreadable table {path}: {e}"))
    })?;
    let mut rows = vec![];
    for row in reader.deserialize::<T>() {
        rows.push(row.map_err(|e| AccessError::CsvReadError(path.to_string(), e))?);
    }
    Ok(rows)
}

/// writes serializable rows as a headered CSV file.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), AccessError> {
    let mut writer = csv::Writer::from_path(Path::new(path))
        .map_err(|e| AccessError::CsvWriteError(path.to_string(), e))?;
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| AccessError::CsvWriteError(path.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| AccessError::IoError(path.to_string(), e))?;
    Ok(())
}
