use serde::{Deserialize, Serialize};

/// a fuzzy assignment of one stop to one school. confidence is in
/// [0, 100] and never below the configured cutoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSchoolMatch {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub matched_school: String,
    pub confidence: u32,
}
