use crate::config::AccessConfiguration;
use crate::model::access::access_ops;
use crate::model::cell::centroid_ops;
use crate::model::demand::StudentTable;
use crate::model::error::AccessError;
use crate::model::io::{csv_ops, geojson_ops};
use crate::model::matching::match_ops;
use crate::model::network::{snap_ops, CsvNetworkSource, NetworkSource};
use crate::model::service::ServiceTable;

pub struct WalkTimesArgs {
    pub nodes_path: String,
    pub edges_path: String,
    pub services_path: String,
    pub students_path: String,
    pub centroids_csv: String,
    pub centroids_geojson: Option<String>,
    pub output_path: String,
    pub matches_output: Option<String>,
    pub stops_output: Option<String>,
}

/// the `walk-times` stage: match stops to schools, build the walk graph,
/// snap cells and stops, and compute per-(cell, school) walking times.
pub fn run(args: &WalkTimesArgs, conf: &AccessConfiguration) -> Result<(), AccessError> {
    let services = ServiceTable::from_geojson_path(&args.services_path)?;
    let students = StudentTable::from_csv_path(&args.students_path)?;

    log::info!("matching service stops to schools");
    let mapping = match_ops::prepare_school_stop_mapping(&services, &students, conf.score_cutoff)?;
    if let Some(out) = &args.matches_output {
        csv_ops::write_csv(out, &mapping)?;
    }

    log::info!("loading or deriving cell centroids");
    let cells = match centroid_ops::load_centroids(
        &args.centroids_csv,
        args.centroids_geojson.as_deref(),
    )? {
        Some(cells) => cells,
        None => centroid_ops::fallback_from_stops(&students.cell_codes()?, &services)?,
    };

    log::info!("building pedestrian graph for extent {}", conf.bbox);
    let source = CsvNetworkSource {
        nodes_path: args.nodes_path.clone(),
        edges_path: args.edges_path.clone(),
    };
    let graph = source.graph_for_region(&conf.bbox, conf.walk_speed_mps)?;

    log::info!("snapping stops and cells to graph nodes");
    let index = snap_ops::build_node_index(&graph);
    let stop_nodes = snap_ops::snap_to_nearest_nodes(&index, &services.stop_positions());
    let cell_positions = cells
        .iter()
        .map(|c| (c.code.0.clone(), Some((c.x, c.y))))
        .collect::<Vec<_>>();
    let cell_nodes = snap_ops::snap_to_nearest_nodes(&index, &cell_positions);

    log::info!("computing minimum walk time per (cell, school) pair");
    let demand = students.demand_pairs()?;
    let records =
        access_ops::compute_min_walk_times(&graph, &cell_nodes, &stop_nodes, &mapping, &demand)?;
    csv_ops::write_csv(&args.output_path, &records)?;
    log::info!("wrote {} walk-time records to {}", records.len(), args.output_path);

    // stop points for mapping tools, independent of match outcome
    if let Some(out) = &args.stops_output {
        let features = services
            .stop_positions()
            .into_iter()
            .filter_map(|(stop_id, point)| {
                point.map(|(x, y)| (x, y, vec![(String::from("stop_id"), stop_id)]))
            })
            .collect::<Vec<_>>();
        geojson_ops::write_point_features(out, &features)?;
    }
    Ok(())
}
