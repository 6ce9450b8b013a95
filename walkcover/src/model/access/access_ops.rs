use super::WalkTimeRecord;
use crate::algorithm::search;
use crate::model::cell::CellCode;
use crate::model::error::AccessError;
use crate::model::matching::StopSchoolMatch;
use crate::model::network::{WalkGraph, WalkNodeId};
use itertools::Itertools;
use kdam::tqdm;
use std::collections::{BTreeMap, HashMap};

/// computes, per demand pair, the minimum walking time from the cell's
/// snapped node to any node hosting a stop serving that school.
///
/// one multi-source Dijkstra runs per school over the undirected
/// minimum-travel-time projection, so total cost scales with the number of
/// distinct schools rather than the number of stops. unreachable pairs are
/// omitted; duplicate paths to a pair keep the minimum.
pub fn compute_min_walk_times(
    graph: &WalkGraph,
    cell_nodes: &HashMap<String, WalkNodeId>,
    stop_nodes: &HashMap<String, WalkNodeId>,
    matches: &[StopSchoolMatch],
    demand: &[(CellCode, String)],
) -> Result<Vec<WalkTimeRecord>, AccessError> {
    // schools to the distinct graph nodes hosting their serving stops
    let mut school_sources: BTreeMap<&str, Vec<WalkNodeId>> = BTreeMap::new();
    for m in matches.iter() {
        if let Some(node) = stop_nodes.get(&m.stop_id) {
            let sources = school_sources.entry(m.matched_school.as_str()).or_default();
            if !sources.contains(node) {
                sources.push(*node);
            }
        }
    }
    if school_sources.is_empty() {
        return Err(AccessError::NoReachableStops);
    }

    let snapped_demand: Vec<(&CellCode, &str, WalkNodeId)> = demand
        .iter()
        .filter_map(|(cell, school)| {
            cell_nodes
                .get(&cell.0)
                .map(|node| (cell, school.as_str(), *node))
        })
        .collect();
    if snapped_demand.is_empty() {
        return Err(AccessError::NoReachableCells);
    }

    let unserved_schools = demand
        .iter()
        .map(|(_, school)| school)
        .unique()
        .filter(|school| !school_sources.contains_key(school.as_str()))
        .count();
    if unserved_schools > 0 {
        log::warn!("{unserved_schools} schools in the demand table have no serving stop and are skipped");
    }

    let undirected = graph.undirected_min_times();

    let mut minima: HashMap<(CellCode, String), f64> = HashMap::new();
    for (school, sources) in tqdm!(school_sources.iter(), desc = "per-school walk times") {
        let distances = search::multi_source_dijkstra(&undirected, sources);
        for (cell, pair_school, node) in snapped_demand.iter() {
            if pair_school != school {
                continue;
            }
            if let Some(time) = distances.get(node) {
                minima
                    .entry(((*cell).clone(), school.to_string()))
                    .and_modify(|t| {
                        if *time < *t {
                            *t = *time;
                        }
                    })
                    .or_insert(*time);
            }
        }
    }

    let records = minima
        .into_iter()
        .map(|((cell, school), walk_time_sec)| WalkTimeRecord {
            cell,
            school,
            walk_time_sec,
        })
        .sorted_by(|a, b| (&a.cell, &a.school).cmp(&(&b.cell, &b.school)))
        .collect::<Vec<_>>();
    log::info!("computed {} (cell, school) walk-time records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{WalkEdge, WalkNode};

    fn graph(edges: &[(i64, i64, f64)], walk_speed: f64) -> WalkGraph {
        let mut g = WalkGraph::empty();
        for (a, b, _) in edges {
            for id in [a, b] {
                g.insert_node(WalkNode {
                    node_id: WalkNodeId(*id),
                    x: 0.0,
                    y: 0.0,
                });
            }
        }
        for (a, b, len) in edges {
            g.insert_edge(WalkEdge::new(
                WalkNodeId(*a),
                WalkNodeId(*b),
                *len,
                walk_speed,
            ))
            .expect("insert");
        }
        g
    }

    fn stop_match(stop_id: &str, school: &str) -> StopSchoolMatch {
        StopSchoolMatch {
            stop_id: stop_id.to_string(),
            stop_name: None,
            matched_school: school.to_string(),
            confidence: 90,
        }
    }

    #[test]
    fn one_edge_scenario_yields_length_over_speed() {
        // 1000m at 1.25 m/s should be exactly 800 seconds
        let g = graph(&[(1, 2, 1000.0)], 1.25);
        let cell_nodes = HashMap::from([(String::from("c1"), WalkNodeId(1))]);
        let stop_nodes = HashMap::from([(String::from("s1"), WalkNodeId(2))]);
        let matches = vec![stop_match("s1", "X")];
        let demand = vec![(CellCode::from("c1"), String::from("X"))];

        let records =
            compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand).expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cell, CellCode::from("c1"));
        assert_eq!(records[0].school, "X");
        assert_eq!(records[0].walk_time_sec, 800.0);
    }

    #[test]
    fn unreachable_pairs_are_omitted() {
        // two disconnected components
        let g = graph(&[(1, 2, 100.0), (5, 6, 100.0)], 1.25);
        let cell_nodes = HashMap::from([
            (String::from("near"), WalkNodeId(1)),
            (String::from("far"), WalkNodeId(5)),
        ]);
        let stop_nodes = HashMap::from([(String::from("s1"), WalkNodeId(2))]);
        let matches = vec![stop_match("s1", "X")];
        let demand = vec![
            (CellCode::from("near"), String::from("X")),
            (CellCode::from("far"), String::from("X")),
        ];

        let records =
            compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand).expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cell, CellCode::from("near"));
        assert!(records[0].walk_time_sec >= 0.0);
    }

    #[test]
    fn duplicate_stops_keep_the_minimum() {
        // stops for the same school at both ends of a path
        let g = graph(&[(1, 2, 100.0), (2, 3, 400.0)], 1.0);
        let cell_nodes = HashMap::from([(String::from("c1"), WalkNodeId(2))]);
        let stop_nodes = HashMap::from([
            (String::from("s1"), WalkNodeId(1)),
            (String::from("s2"), WalkNodeId(3)),
        ]);
        let matches = vec![stop_match("s1", "X"), stop_match("s2", "X")];
        let demand = vec![(CellCode::from("c1"), String::from("X"))];

        let records =
            compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand).expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].walk_time_sec, 100.0);
    }

    #[test]
    fn school_with_no_serving_stops_is_skipped_silently() {
        let g = graph(&[(1, 2, 100.0)], 1.25);
        let cell_nodes = HashMap::from([(String::from("c1"), WalkNodeId(1))]);
        let stop_nodes = HashMap::from([(String::from("s1"), WalkNodeId(2))]);
        let matches = vec![stop_match("s1", "X")];
        let demand = vec![
            (CellCode::from("c1"), String::from("X")),
            (CellCode::from("c1"), String::from("Unserved School")),
        ];

        let records =
            compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand).expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school, "X");
    }

    #[test]
    fn no_snapped_stops_is_fatal() {
        let g = graph(&[(1, 2, 100.0)], 1.25);
        let cell_nodes = HashMap::from([(String::from("c1"), WalkNodeId(1))]);
        let stop_nodes: HashMap<String, WalkNodeId> = HashMap::new();
        let matches = vec![stop_match("s1", "X")];
        let demand = vec![(CellCode::from("c1"), String::from("X"))];

        let result = compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand);
        assert!(matches!(result, Err(AccessError::NoReachableStops)));
    }

    #[test]
    fn no_snapped_cells_is_fatal() {
        let g = graph(&[(1, 2, 100.0)], 1.25);
        let cell_nodes: HashMap<String, WalkNodeId> = HashMap::new();
        let stop_nodes = HashMap::from([(String::from("s1"), WalkNodeId(2))]);
        let matches = vec![stop_match("s1", "X")];
        let demand = vec![(CellCode::from("c1"), String::from("X"))];

        let result = compute_min_walk_times(&g, &cell_nodes, &stop_nodes, &matches, &demand);
        assert!(matches!(result, Err(AccessError::NoReachableCells)));
    }
}
