use crate::config::AccessConfiguration;
use crate::model::cell::centroid_ops;
use crate::model::error::AccessError;
use crate::model::io::geojson_ops;
use crate::model::kpi::kpi_ops;
use crate::model::placement::placement_ops;

/// the `suggest` stage: propose new stop locations for underserved cells
/// at one coverage threshold.
pub fn run(
    kpi_by_cell_path: &str,
    centroids_path: &str,
    output_path: &str,
    threshold_min: Option<u32>,
    conf: &AccessConfiguration,
) -> Result<(), AccessError> {
    let threshold = match threshold_min.or_else(|| conf.thresholds_min.first().copied()) {
        Some(t) => t,
        None => {
            return Err(AccessError::ConfigurationError(String::from(
                "no coverage threshold configured; set thresholds_min or pass --threshold-min",
            )))
        }
    };
    let coverage = kpi_ops::read_cell_coverage(kpi_by_cell_path, threshold)?;
    let cells = centroid_ops::load_centroids_csv(centroids_path)?;
    let candidates = placement_ops::greedy_new_stop_candidates(
        &coverage,
        &cells,
        threshold,
        conf.max_new_stops,
        conf.walk_speed_mps,
    );
    let features = candidates
        .iter()
        .map(|c| {
            (
                c.lon,
                c.lat,
                vec![(String::from("reason"), c.reason.clone())],
            )
        })
        .collect::<Vec<_>>();
    geojson_ops::write_point_features(output_path, &features)?;
    log::info!("wrote {} candidate stops to {output_path}", candidates.len());
    Ok(())
}
