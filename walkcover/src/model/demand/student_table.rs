use crate::model::cell::CellCode;
use crate::model::error::AccessError;
use crate::model::io::FlexibleTable;
use itertools::Itertools;

/// the students-distance dataset: one row per (cell, school) enrollment
/// observation, with portal-dependent header naming.
#[derive(Debug, Clone)]
pub struct StudentTable {
    table: FlexibleTable,
}

const SA1_COLUMNS: [&str; 5] = ["sa1_code_2021", "sa1_code", "sa1", "sa1id", "sa1_code_2016"];
const SCHOOL_COLUMNS: [&str; 4] = ["school", "school_name", "schoolname", "school_label"];

impl StudentTable {
    pub fn from_csv_path(path: &str) -> Result<StudentTable, AccessError> {
        let table = FlexibleTable::from_csv_path(path)?;
        Ok(StudentTable { table })
    }

    pub fn new(table: FlexibleTable) -> StudentTable {
        StudentTable { table }
    }

    fn school_column(&self) -> Result<usize, AccessError> {
        // any 'school'-ish column that is not a code column, as portal
        // exports disagree on the exact header
        let by_substring = self
            .table
            .headers
            .iter()
            .position(|h| h.contains("school") && !h.contains("code"));
        by_substring
            .or_else(|| self.table.find_column(&SCHOOL_COLUMNS))
            .ok_or_else(|| {
                AccessError::ConfigurationError(format!(
                    "could not find a school column in the students dataset; expected one of {:?}, found: {:?}",
                    SCHOOL_COLUMNS, self.table.headers
                ))
            })
    }

    fn sa1_column(&self) -> Result<usize, AccessError> {
        self.table.find_column(&SA1_COLUMNS).ok_or_else(|| {
            AccessError::ConfigurationError(format!(
                "could not find an SA1 code column in the students dataset; expected one of {:?}, found: {:?}",
                SA1_COLUMNS, self.table.headers
            ))
        })
    }

    /// the known school-name vocabulary: deduplicated, sorted, non-empty.
    pub fn school_names(&self) -> Result<Vec<String>, AccessError> {
        let column = self.school_column()?;
        let names = self
            .table
            .rows
            .iter()
            .map(|row| self.table.value(row, column).trim().to_string())
            .filter(|name| !name.is_empty())
            .unique()
            .sorted()
            .collect();
        Ok(names)
    }

    /// deduplicated (cell, school) pairs that must be evaluated by the
    /// accessibility engine, in first-observed order.
    pub fn demand_pairs(&self) -> Result<Vec<(CellCode, String)>, AccessError> {
        let sa1 = self.sa1_column()?;
        let school = self.school_column()?;
        let pairs = self
            .table
            .rows
            .iter()
            .filter_map(|row| {
                let code = self.table.value(row, sa1).trim();
                let name = self.table.value(row, school).trim();
                if code.is_empty() || name.is_empty() {
                    None
                } else {
                    Some((CellCode::from(code), name.to_string()))
                }
            })
            .unique()
            .collect();
        Ok(pairs)
    }

    /// deduplicated, sorted cell codes, for the fallback centroid path.
    pub fn cell_codes(&self) -> Result<Vec<CellCode>, AccessError> {
        let sa1 = self.sa1_column()?;
        let codes = self
            .table
            .rows
            .iter()
            .map(|row| self.table.value(row, sa1).trim())
            .filter(|code| !code.is_empty())
            .map(CellCode::from)
            .unique()
            .sorted()
            .collect();
        Ok(codes)
    }
}
