use super::WalkNodeId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// a vertex of the pedestrian network with its WGS84 position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkNode {
    pub node_id: WalkNodeId,
    pub x: f64,
    pub y: f64,
}

impl WalkNode {
    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}
