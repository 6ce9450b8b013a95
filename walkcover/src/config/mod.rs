use crate::model::error::AccessError;
use crate::model::network::BoundingBox;
use serde::{Deserialize, Serialize};

/// parameters for a coverage analysis run. dataset identifiers and
/// portal endpoints live with the download tooling, not here.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AccessConfiguration {
    /// pedestrian travel speed used to derive edge travel times
    pub walk_speed_mps: f64,
    /// default search radius for nearest-stop queries
    pub default_walk_radius_m: f64,
    /// coverage thresholds, in minutes of walking
    pub thresholds_min: Vec<u32>,
    /// minimum fuzzy-match score for a stop-to-school assignment, in [0,100]
    pub score_cutoff: u32,
    /// maximum number of candidate stops the placement heuristic may propose
    pub max_new_stops: usize,
    /// analysis extent in WGS84 (west, south, east, north)
    pub bbox: BoundingBox,
}

impl Default for AccessConfiguration {
    fn default() -> Self {
        Self {
            walk_speed_mps: 1.25,
            default_walk_radius_m: 900.0,
            thresholds_min: vec![10, 15],
            score_cutoff: 82,
            max_new_stops: 10,
            // ACT extent, approximate
            bbox: BoundingBox {
                west: 148.76,
                south: -35.92,
                east: 149.44,
                north: -35.05,
            },
        }
    }
}

impl TryFrom<&String> for AccessConfiguration {
    type Error = AccessError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| AccessError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            toml::from_str(&s)
                .map_err(|e| AccessError::ConfigurationError(format!("failure decoding {f}: {e}")))
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| AccessError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            serde_json::from_str(&s)
                .map_err(|e| AccessError::ConfigurationError(format!("failure decoding {f}: {e}")))
        } else {
            Err(AccessError::ConfigurationError(format!(
                "unknown configuration file type for {f}, expected .toml or .json"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AccessConfiguration;

    #[test]
    fn default_matches_documented_surface() {
        let c = AccessConfiguration::default();
        assert_eq!(c.walk_speed_mps, 1.25);
        assert_eq!(c.default_walk_radius_m, 900.0);
        assert_eq!(c.thresholds_min, vec![10, 15]);
        assert_eq!(c.score_cutoff, 82);
        assert_eq!(c.max_new_stops, 10);
    }

    #[test]
    fn deserialize_toml_overrides() {
        let toml_str = r#"
            walk_speed_mps = 1.4
            default_walk_radius_m = 800.0
            thresholds_min = [5, 10, 20]
            score_cutoff = 90
            max_new_stops = 3
            bbox = { west = 148.9, south = -35.5, east = 149.2, north = -35.2 }
        "#;
        let c: AccessConfiguration = toml::from_str(toml_str).expect("should parse");
        assert_eq!(c.thresholds_min, vec![5, 10, 20]);
        assert_eq!(c.max_new_stops, 3);
        assert_eq!(c.bbox.west, 148.9);
    }
}
