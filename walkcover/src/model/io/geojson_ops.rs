use crate::model::error::AccessError;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::map::Map;
use std::collections::HashMap;
use std::path::Path;

/// one GeoJSON point feature: stringified properties plus an optional
/// (longitude, latitude) position.
#[derive(Debug, Clone)]
pub struct PointFeature {
    pub properties: HashMap<String, String>,
    pub point: Option<(f64, f64)>,
}

/// reads a GeoJSON feature collection of point features. property keys are
/// lower-cased; non-string property values are stringified. non-point
/// geometries yield features with no position.
pub fn read_point_features(path: &str) -> Result<Vec<PointFeature>, AccessError> {
    let text = std::fs::read_to_string(Path::new(path)).map_err(|e| {
        AccessError::ConfigurationError(format!("missing or unreadable GeoJSON file {path}: {e}"))
    })?;
    let geojson: GeoJson = text
        .parse()
        .map_err(|e| AccessError::GeoJsonError(format!("{path}: {e}")))?;
    let collection = FeatureCollection::try_from(geojson)
        .map_err(|e| AccessError::GeoJsonError(format!("{path} is not a FeatureCollection: {e}")))?;

    let features = collection
        .features
        .into_iter()
        .map(|feature| {
            let mut properties: HashMap<String, String> = HashMap::new();
            if let Some(props) = feature.properties {
                for (key, value) in props.into_iter() {
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    properties.insert(key.to_lowercase(), text);
                }
            }
            let point = feature.geometry.and_then(|g| match g.value {
                Value::Point(position) => match position.as_slice() {
                    [x, y, ..] => Some((*x, *y)),
                    _ => None,
                },
                _ => None,
            });
            PointFeature { properties, point }
        })
        .collect();
    Ok(features)
}

/// writes (longitude, latitude, properties) triples as a GeoJSON point
/// feature collection.
pub fn write_point_features(
    path: &str,
    features: &[(f64, f64, Vec<(String, String)>)],
) -> Result<(), AccessError> {
    let features = features
        .iter()
        .map(|(x, y, props)| {
            let mut properties = Map::new();
            for (key, value) in props.iter() {
                properties.insert(key.clone(), serde_json::Value::String(value.clone()));
            }
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![*x, *y]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect::<Vec<_>>();
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let text = GeoJson::from(collection).to_string();
    std::fs::write(Path::new(path), text)
        .map_err(|e| AccessError::IoError(path.to_string(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_point_features() {
        let dir = std::env::temp_dir().join("walkcover_geojson_test");
        std::fs::create_dir_all(&dir).expect("tempdir");
        let path = dir.join("points.geojson");
        let path_str = path.to_string_lossy().to_string();

        let out = vec![(
            149.1,
            -35.3,
            vec![(String::from("stop_id"), String::from("s1"))],
        )];
        write_point_features(&path_str, &out).expect("write");

        let features = read_point_features(&path_str).expect("read");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].point, Some((149.1, -35.3)));
        assert_eq!(
            features[0].properties.get("stop_id"),
            Some(&String::from("s1"))
        );
    }

    #[test]
    fn property_keys_are_lowercased_and_values_stringified() {
        let dir = std::env::temp_dir().join("walkcover_geojson_test");
        std::fs::create_dir_all(&dir).expect("tempdir");
        let path = dir.join("props.geojson");
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"Stop_ID":42,"note":null},
             "geometry":{"type":"Point","coordinates":[149.0,-35.0]}}]}"#;
        std::fs::write(&path, text).expect("write fixture");

        let features =
            read_point_features(&path.to_string_lossy()).expect("read");
        assert_eq!(
            features[0].properties.get("stop_id"),
            Some(&String::from("42"))
        );
        assert_eq!(features[0].properties.get("note"), Some(&String::new()));
    }
}
