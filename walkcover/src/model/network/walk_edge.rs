use super::WalkNodeId;
use serde::{Deserialize, Serialize};

/// a directed pedestrian network edge. parallel edges between the same
/// node pair are allowed; the undirected projection keeps the fastest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkEdge {
    pub src: WalkNodeId,
    pub dst: WalkNodeId,
    pub length_m: f64,
    pub travel_time_sec: f64,
}

impl WalkEdge {
    /// derives the travel time for an edge of the given length.
    /// zero-length (or missing-length) edges get a zero travel time.
    pub fn new(src: WalkNodeId, dst: WalkNodeId, length_m: f64, walk_speed_mps: f64) -> WalkEdge {
        let travel_time_sec = if length_m > 0.0 {
            length_m / walk_speed_mps
        } else {
            0.0
        };
        WalkEdge {
            src,
            dst,
            length_m,
            travel_time_sec,
        }
    }
}
