use crate::model::error::AccessError;
use crate::model::io::{geojson_ops, PointFeature};

/// raw school bus service records, read once per run from a GeoJSON
/// feature collection of stop/trip points.
#[derive(Debug, Clone)]
pub struct ServiceTable {
    /// property columns present anywhere in the table, first-seen order
    columns: Vec<String>,
    records: Vec<PointFeature>,
}

/// free-text property columns inspected when building a match query,
/// in priority order: headsign and destination variants first, then
/// school and stop name fields.
pub const CANDIDATE_TEXT_COLUMNS: [&str; 10] = [
    "trip_headsign",
    "headsign",
    "destination",
    "route_long_name",
    "route_short_name",
    "route_name",
    "trip_short_name",
    "school",
    "school_name",
    "stop_name",
];

const STOP_ID_COLUMNS: [&str; 4] = ["stop_id", "stop_code", "stopid", "stopcode"];

impl ServiceTable {
    pub fn from_geojson_path(path: &str) -> Result<ServiceTable, AccessError> {
        let records = geojson_ops::read_point_features(path)?;
        Ok(ServiceTable::new(records))
    }

    pub fn new(records: Vec<PointFeature>) -> ServiceTable {
        let mut columns: Vec<String> = vec![];
        for record in records.iter() {
            for key in record.properties.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        ServiceTable { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PointFeature] {
        &self.records
    }

    pub fn has_any_geometry(&self) -> bool {
        self.records.iter().any(|r| r.point.is_some())
    }

    /// the stop identifier for a record: the first recognized id column
    /// with a value, else the record's index in the table.
    pub fn stop_id(&self, index: usize) -> String {
        let record = &self.records[index];
        for column in STOP_ID_COLUMNS.iter() {
            if let Some(value) = record.properties.get(*column) {
                if !value.is_empty() {
                    return value.clone();
                }
            }
        }
        index.to_string()
    }

    pub fn stop_name(&self, index: usize) -> Option<String> {
        self.records[index].properties.get("stop_name").cloned()
    }

    /// concatenated free-text from every candidate column present in the
    /// table, space-joined in priority order.
    pub fn candidate_text(&self, index: usize) -> String {
        let record = &self.records[index];
        CANDIDATE_TEXT_COLUMNS
            .iter()
            .filter(|c| self.columns.iter().any(|col| col == **c))
            .map(|c| record.properties.get(*c).map(|v| v.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// (stop_id, position) pairs for snapping. records with no geometry
    /// carry `None` and are excluded downstream.
    pub fn stop_positions(&self) -> Vec<(String, Option<(f64, f64)>)> {
        (0..self.records.len())
            .map(|i| (self.stop_id(i), self.records[i].point))
            .collect()
    }
}
