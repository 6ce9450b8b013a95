use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("invalid walkcover configuration: {0}")]
    ConfigurationError(String),
    #[error("no stop-to-school matches at or above the score cutoff: {0}")]
    NoMatches(String),
    #[error("no school-serving stops could be snapped to the walk graph; confirm the network tables cover the service area and re-run 'walk-times'")]
    NoReachableStops,
    #[error("no population cell centroids could be snapped to the walk graph; provide centroids covering the network extent and re-run 'walk-times'")]
    NoReachableCells,
    #[error("failure reading CSV file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing CSV file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure accessing file {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("failure decoding GeoJSON: {0}")]
    GeoJsonError(String),
    #[error("{0}")]
    InternalError(String),
}
