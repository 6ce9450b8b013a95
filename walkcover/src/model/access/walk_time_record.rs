use crate::model::cell::CellCode;
use serde::{Deserialize, Serialize};

/// minimum walking time from a cell's snapped node to any stop serving
/// the school. exactly one record exists per evaluated, reachable
/// (cell, school) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkTimeRecord {
    #[serde(rename = "sa1_code_2021")]
    pub cell: CellCode,
    pub school: String,
    pub walk_time_sec: f64,
}
