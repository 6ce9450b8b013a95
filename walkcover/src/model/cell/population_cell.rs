use super::CellCode;
use serde::{Deserialize, Serialize};

/// a population cell represented by its centroid in WGS84. immutable
/// after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationCell {
    #[serde(rename = "sa1_code_2021")]
    pub code: CellCode,
    #[serde(rename = "lon")]
    pub x: f64,
    #[serde(rename = "lat")]
    pub y: f64,
}
