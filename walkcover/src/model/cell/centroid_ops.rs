use super::{CellCode, PopulationCell};
use crate::model::error::AccessError;
use crate::model::io::geojson_ops;
use crate::model::service::ServiceTable;
use std::path::Path;

/// loads cell centroids from a CSV (`sa1_code_2021,lon,lat`) or GeoJSON
/// point file, whichever exists, preferring the CSV. returns `None` when
/// neither file is present so callers may fall back to the pseudo-centroid
/// heuristic.
pub fn load_centroids(
    csv_path: &str,
    geojson_path: Option<&str>,
) -> Result<Option<Vec<PopulationCell>>, AccessError> {
    if Path::new(csv_path).exists() {
        return load_centroids_csv(csv_path).map(Some);
    }
    if let Some(gj) = geojson_path {
        if Path::new(gj).exists() {
            return load_centroids_geojson(gj).map(Some);
        }
    }
    Ok(None)
}

pub fn load_centroids_csv(path: &str) -> Result<Vec<PopulationCell>, AccessError> {
    let mut reader = csv::Reader::from_path(Path::new(path)).map_err(|e| {
        AccessError::ConfigurationError(format!("missing or unreadable centroids file {path}: {e}"))
    })?;
    let headers = reader
        .headers()
        .map_err(|e| AccessError::CsvReadError(path.to_string(), e))?
        .clone();
    for required in ["sa1_code_2021", "lon", "lat"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AccessError::ConfigurationError(format!(
                "centroids file {path} must include columns sa1_code_2021, lon, lat (found: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }
    }
    let mut cells = vec![];
    for row in reader.deserialize::<PopulationCell>() {
        cells.push(row.map_err(|e| AccessError::CsvReadError(path.to_string(), e))?);
    }
    Ok(cells)
}

fn load_centroids_geojson(path: &str) -> Result<Vec<PopulationCell>, AccessError> {
    let features = geojson_ops::read_point_features(path)?;
    let mut cells = vec![];
    for feature in features.into_iter() {
        let code = feature.properties.get("sa1_code_2021").ok_or_else(|| {
            AccessError::ConfigurationError(format!(
                "centroid features in {path} must carry an 'sa1_code_2021' property"
            ))
        })?;
        let (x, y) = feature.point.ok_or_else(|| {
            AccessError::ConfigurationError(format!(
                "centroid features in {path} must carry point geometry"
            ))
        })?;
        cells.push(PopulationCell {
            code: CellCode(code.clone()),
            x,
            y,
        });
    }
    Ok(cells)
}

/// degraded-accuracy fallback used when no authoritative centroids are
/// available: each cell is represented by a deterministically chosen stop
/// position (stable hash of the cell code modulo the stop count). results
/// support relative coverage comparison only.
pub fn fallback_from_stops(
    cell_codes: &[CellCode],
    stops: &ServiceTable,
) -> Result<Vec<PopulationCell>, AccessError> {
    let positions: Vec<(f64, f64)> = stops
        .stop_positions()
        .into_iter()
        .filter_map(|(_, p)| p)
        .collect();
    if positions.is_empty() {
        return Err(AccessError::ConfigurationError(String::from(
            "cannot derive fallback centroids: service dataset has no stop geometry",
        )));
    }
    log::warn!(
        "no centroid file provided: assigning pseudo-centroids to {} cells from {} stop positions (coarse, relative analysis only)",
        cell_codes.len(),
        positions.len()
    );
    let cells = cell_codes
        .iter()
        .map(|code| {
            let index = (seahash::hash(code.0.as_bytes()) as usize) % positions.len();
            let (x, y) = positions[index];
            PopulationCell {
                code: code.clone(),
                x,
                y,
            }
        })
        .collect();
    Ok(cells)
}
