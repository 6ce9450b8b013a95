use crate::model::network::{UndirectedWalkTimes, WalkNodeId};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// multi-source Dijkstra over the undirected minimum-travel-time graph.
///
/// # Arguments
///
/// * `graph` - collapsed undirected projection of the walk graph
/// * `sources` - the set of nodes treated as a single combined origin
///
/// # Returns
///
/// Minimum travel time in seconds from any source to each reachable node.
/// Unreachable nodes are absent from the map.
pub fn multi_source_dijkstra(
    graph: &UndirectedWalkTimes,
    sources: &[WalkNodeId],
) -> HashMap<WalkNodeId, f64> {
    let mut best: HashMap<WalkNodeId, f64> = HashMap::new();
    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, WalkNodeId)>> = BinaryHeap::new();

    for source in sources.iter() {
        best.insert(*source, 0.0);
        frontier.push(Reverse((OrderedFloat(0.0), *source)));
    }

    while let Some(Reverse((OrderedFloat(time), node))) = frontier.pop() {
        // stale heap entry, a shorter path was already settled
        if best.get(&node).is_some_and(|t| time > *t) {
            continue;
        }
        for (neighbor, edge_time) in graph.neighbors(&node).iter() {
            let candidate = time + edge_time;
            let improved = match best.get(neighbor) {
                Some(current) => candidate < *current,
                None => true,
            };
            if improved {
                best.insert(*neighbor, candidate);
                frontier.push(Reverse((OrderedFloat(candidate), *neighbor)));
            }
        }
    }

    best
}
