use super::{BoundingBox, WalkEdge, WalkGraph, WalkNode, WalkNodeId};
use crate::model::error::AccessError;
use flate2::read::GzDecoder;
use geo::{Distance, Haversine, LineString, Point};
use kdam::tqdm;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// a provider of pedestrian networks for an analysis extent.
pub trait NetworkSource {
    /// builds the walk graph for the given region, attaching a travel time
    /// in seconds to every edge using the provided walking speed.
    fn graph_for_region(
        &self,
        bbox: &BoundingBox,
        walk_speed_mps: f64,
    ) -> Result<WalkGraph, AccessError>;
}

/// network source backed by prebuilt node and edge tables
/// (CSV, optionally gzipped).
///
/// nodes: `node_id,x,y`. edges: `src,dst` with optional `length_m` and
/// optional WKT `geometry` columns.
pub struct CsvNetworkSource {
    pub nodes_path: String,
    pub edges_path: String,
}

#[derive(Debug, Deserialize)]
struct NodeRow {
    node_id: i64,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRow {
    src: i64,
    dst: i64,
    #[serde(default)]
    length_m: Option<f64>,
    #[serde(default)]
    geometry: Option<String>,
}

impl NetworkSource for CsvNetworkSource {
    fn graph_for_region(
        &self,
        bbox: &BoundingBox,
        walk_speed_mps: f64,
    ) -> Result<WalkGraph, AccessError> {
        let mut graph = WalkGraph::empty();

        let mut node_reader = csv::Reader::from_reader(open_maybe_gzip(&self.nodes_path)?);
        for row in tqdm!(node_reader.deserialize::<NodeRow>(), desc = "reading nodes") {
            let node = row.map_err(|e| AccessError::CsvReadError(self.nodes_path.clone(), e))?;
            if bbox.contains(node.x, node.y) {
                graph.insert_node(WalkNode {
                    node_id: WalkNodeId(node.node_id),
                    x: node.x,
                    y: node.y,
                });
            }
        }

        let mut dropped: usize = 0;
        let mut edge_reader = csv::Reader::from_reader(open_maybe_gzip(&self.edges_path)?);
        for row in tqdm!(edge_reader.deserialize::<EdgeRow>(), desc = "reading edges") {
            let edge = row.map_err(|e| AccessError::CsvReadError(self.edges_path.clone(), e))?;
            let (src, dst) = (WalkNodeId(edge.src), WalkNodeId(edge.dst));
            let (src_node, dst_node) = match (graph.get_node(&src), graph.get_node(&dst)) {
                (Some(a), Some(b)) => (a.clone(), b.clone()),
                _ => {
                    // endpoint truncated by the bounding box
                    dropped += 1;
                    continue;
                }
            };
            let length = edge_length_m(&edge, &src_node, &dst_node);
            graph.insert_edge(WalkEdge::new(src, dst, length, walk_speed_mps))?;
        }
        if dropped > 0 {
            log::warn!("dropped {dropped} edges with endpoints outside the bounding box");
        }
        log::info!(
            "built walk graph with {} nodes and {} edges for extent {}",
            graph.n_nodes(),
            graph.n_edges(),
            bbox
        );
        Ok(graph)
    }
}

/// best-effort edge length in meters: the stated length when positive,
/// else the great-circle length of the edge geometry, else the
/// great-circle distance between the endpoint nodes.
fn edge_length_m(edge: &EdgeRow, src: &WalkNode, dst: &WalkNode) -> f64 {
    if let Some(length) = edge.length_m {
        if length > 0.0 {
            return length;
        }
    }
    if let Some(wkt_str) = &edge.geometry {
        if let Some(linestring) = parse_linestring(wkt_str) {
            let coords: Vec<Point<f64>> = linestring.into_points();
            if coords.len() >= 2 {
                return coords
                    .windows(2)
                    .map(|w| Haversine.distance(w[0], w[1]))
                    .sum();
            }
        }
    }
    Haversine.distance(src.get_point(), dst.get_point())
}

fn parse_linestring(v: &str) -> Option<LineString<f64>> {
    let wkt_geom: wkt::Wkt<f64> = v.trim_matches('"').parse().ok()?;
    wkt_geom.try_into().ok()
}

fn open_maybe_gzip(path: &str) -> Result<Box<dyn Read>, AccessError> {
    let file = File::open(Path::new(path)).map_err(|e| {
        AccessError::ConfigurationError(format!(
            "missing network table {path}: {e}; export the pedestrian network before running 'walk-times'"
        ))
    })?;
    if path.ends_with(".gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, x: f64, y: f64) -> WalkNode {
        WalkNode {
            node_id: WalkNodeId(id),
            x,
            y,
        }
    }

    #[test]
    fn stated_length_wins() {
        let edge = EdgeRow {
            src: 1,
            dst: 2,
            length_m: Some(123.4),
            geometry: None,
        };
        let a = node(1, 0.0, 0.0);
        let b = node(2, 0.001, 0.0);
        assert_eq!(edge_length_m(&edge, &a, &b), 123.4);
    }

    #[test]
    fn geometry_length_used_when_no_stated_length() {
        // a dog-leg path should be longer than the straight endpoint distance
        let edge = EdgeRow {
            src: 1,
            dst: 2,
            length_m: None,
            geometry: Some(String::from("LINESTRING (0 0, 0.001 0.001, 0.002 0)")),
        };
        let a = node(1, 0.0, 0.0);
        let b = node(2, 0.002, 0.0);
        let with_geom = edge_length_m(&edge, &a, &b);
        let straight = Haversine.distance(a.get_point(), b.get_point());
        assert!(with_geom > straight);
    }

    #[test]
    fn endpoint_distance_fallback() {
        let edge = EdgeRow {
            src: 1,
            dst: 2,
            length_m: None,
            geometry: None,
        };
        let a = node(1, 149.0, -35.3);
        let b = node(2, 149.001, -35.3);
        let length = edge_length_m(&edge, &a, &b);
        // about 91 meters per 0.001 degree longitude at this latitude
        assert!(length > 80.0 && length < 100.0, "unexpected length {length}");
    }
}
