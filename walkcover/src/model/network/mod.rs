mod bounding_box;
mod network_source;
pub mod snap_ops;
mod walk_edge;
mod walk_graph;
mod walk_node;
mod walk_node_id;

pub use bounding_box::BoundingBox;
pub use network_source::{CsvNetworkSource, NetworkSource};
pub use walk_edge::WalkEdge;
pub use walk_graph::{UndirectedWalkTimes, WalkGraph};
pub use walk_node::WalkNode;
pub use walk_node_id::WalkNodeId;
