use super::{WalkEdge, WalkNode, WalkNodeId};
use crate::model::error::AccessError;
use std::collections::HashMap;

/// directed pedestrian multigraph for one analysis extent. built once per
/// run; read-only afterwards except for the undirected projection used by
/// shortest-path queries.
#[derive(Default, Debug, Clone)]
pub struct WalkGraph {
    nodes: HashMap<WalkNodeId, WalkNode>,
    edges: Vec<WalkEdge>,
}

/// undirected simple-graph projection of a [`WalkGraph`] where each edge
/// carries the minimum travel time among its parallel directed edges.
#[derive(Default, Debug, Clone)]
pub struct UndirectedWalkTimes {
    adjacency: HashMap<WalkNodeId, Vec<(WalkNodeId, f64)>>,
}

impl WalkGraph {
    pub fn empty() -> WalkGraph {
        WalkGraph {
            nodes: HashMap::new(),
            edges: vec![],
        }
    }

    pub fn insert_node(&mut self, node: WalkNode) {
        self.nodes.insert(node.node_id, node);
    }

    /// appends a directed edge. both endpoints must already be present.
    pub fn insert_edge(&mut self, edge: WalkEdge) -> Result<(), AccessError> {
        for id in [&edge.src, &edge.dst] {
            if !self.nodes.contains_key(id) {
                return Err(AccessError::InternalError(format!(
                    "edge references node '{id}' not in graph"
                )));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn get_node(&self, id: &WalkNodeId) -> Option<&WalkNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &WalkNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &WalkEdge> {
        self.edges.iter()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// collapses the directed multigraph into an undirected simple graph
    /// keyed on minimum travel time, symmetrizing and deduplicating
    /// parallel edges.
    pub fn undirected_min_times(&self) -> UndirectedWalkTimes {
        let mut min_times: HashMap<(WalkNodeId, WalkNodeId), f64> = HashMap::new();
        for edge in self.edges.iter() {
            let key = if edge.src <= edge.dst {
                (edge.src, edge.dst)
            } else {
                (edge.dst, edge.src)
            };
            min_times
                .entry(key)
                .and_modify(|t| {
                    if edge.travel_time_sec < *t {
                        *t = edge.travel_time_sec;
                    }
                })
                .or_insert(edge.travel_time_sec);
        }

        let mut adjacency: HashMap<WalkNodeId, Vec<(WalkNodeId, f64)>> = HashMap::new();
        for ((a, b), time) in min_times.into_iter() {
            adjacency.entry(a).or_default().push((b, time));
            if a != b {
                adjacency.entry(b).or_default().push((a, time));
            }
        }
        UndirectedWalkTimes { adjacency }
    }
}

impl UndirectedWalkTimes {
    pub fn neighbors(&self, id: &WalkNodeId) -> &[(WalkNodeId, f64)] {
        self.adjacency.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }
}
