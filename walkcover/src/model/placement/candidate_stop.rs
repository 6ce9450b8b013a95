use serde::{Deserialize, Serialize};

/// a proposed new stop location in WGS84, with a human-readable
/// justification for downstream reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateStop {
    pub lon: f64,
    pub lat: f64,
    pub reason: String,
}
