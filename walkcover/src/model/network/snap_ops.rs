use super::{WalkGraph, WalkNodeId};
use rstar::{primitives::GeomWithData, RTree};
use std::collections::HashMap;

pub type NodeIndex = RTree<GeomWithData<[f64; 2], WalkNodeId>>;

/// bulk-loads an R-tree over every graph node position for vectorized
/// nearest-neighbor queries.
pub fn build_node_index(graph: &WalkGraph) -> NodeIndex {
    let entries = graph
        .nodes()
        .map(|n| GeomWithData::new([n.x, n.y], n.node_id))
        .collect::<Vec<_>>();
    RTree::bulk_load(entries)
}

/// maps each entity to its geographically nearest graph node. entities with
/// missing or non-finite coordinates are excluded from the result; many
/// entities may share a node.
pub fn snap_to_nearest_nodes(
    index: &NodeIndex,
    entities: &[(String, Option<(f64, f64)>)],
) -> HashMap<String, WalkNodeId> {
    let mut snapped: HashMap<String, WalkNodeId> = HashMap::new();
    let mut skipped: usize = 0;
    for (id, point) in entities.iter() {
        let (x, y) = match point {
            Some((x, y)) if x.is_finite() && y.is_finite() => (*x, *y),
            _ => {
                skipped += 1;
                continue;
            }
        };
        if let Some(nearest) = index.nearest_neighbor(&[x, y]) {
            snapped.insert(id.clone(), nearest.data);
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} entities with missing or invalid geometry during snapping");
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::WalkNode;

    fn graph_with_nodes(positions: &[(i64, f64, f64)]) -> WalkGraph {
        let mut g = WalkGraph::empty();
        for (id, x, y) in positions {
            g.insert_node(WalkNode {
                node_id: WalkNodeId(*id),
                x: *x,
                y: *y,
            });
        }
        g
    }

    #[test]
    fn snaps_to_nearest_node() {
        let g = graph_with_nodes(&[(1, 0.0, 0.0), (2, 1.0, 1.0)]);
        let index = build_node_index(&g);
        let entities = vec![
            (String::from("a"), Some((0.1, 0.1))),
            (String::from("b"), Some((0.9, 0.9))),
        ];
        let snapped = snap_to_nearest_nodes(&index, &entities);
        assert_eq!(snapped.get("a"), Some(&WalkNodeId(1)));
        assert_eq!(snapped.get("b"), Some(&WalkNodeId(2)));
    }

    #[test]
    fn invalid_geometry_is_excluded() {
        let g = graph_with_nodes(&[(1, 0.0, 0.0)]);
        let index = build_node_index(&g);
        let entities = vec![
            (String::from("ok"), Some((0.0, 0.0))),
            (String::from("missing"), None),
            (String::from("nan"), Some((f64::NAN, 0.0))),
        ];
        let snapped = snap_to_nearest_nodes(&index, &entities);
        assert_eq!(snapped.len(), 1);
        assert!(snapped.contains_key("ok"));
    }

    #[test]
    fn many_entities_may_share_a_node() {
        let g = graph_with_nodes(&[(1, 0.0, 0.0)]);
        let index = build_node_index(&g);
        let entities = vec![
            (String::from("a"), Some((0.1, 0.0))),
            (String::from("b"), Some((-0.1, 0.0))),
        ];
        let snapped = snap_to_nearest_nodes(&index, &entities);
        assert_eq!(snapped.get("a"), snapped.get("b"));
    }
}
