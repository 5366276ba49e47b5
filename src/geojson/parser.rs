//! Parser für GeoJSON-FeatureCollections (Regionen und Pfad-Bündel).
//!
//! Fehlerpolitik: einzelne fehlerhafte Features werden geloggt und
//! übersprungen; hart scheitert nur ein Container, der gar keine
//! FeatureCollection ist.

use anyhow::{bail, Context, Result};
use glam::DVec2;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{PathFeature, PathGeometry, Region, RegionGeometry};

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawGeometry,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

/// GeoJSON-Geometrie mit explizitem Kind-Diskriminator.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
}

/// GeoJSON-Position → Lon/Lat-Vektor. Höhenwerte werden verworfen,
/// zu kurze Positionen übersprungen.
fn position(raw: &[f64]) -> Option<DVec2> {
    if raw.len() < 2 {
        return None;
    }
    Some(DVec2::new(raw[0], raw[1]))
}

fn ring(raw: &[Vec<f64>]) -> Vec<DVec2> {
    raw.iter().filter_map(|p| position(p)).collect()
}

fn rings(raw: &[Vec<Vec<f64>>]) -> Vec<Vec<DVec2>> {
    raw.iter().map(|r| ring(r)).collect()
}

/// Liest eine FeatureCollection mit Regions-Polygonen.
///
/// Features ohne `id`-Property oder ohne Polygon-Geometrie werden mit
/// Diagnose übersprungen.
pub fn parse_region_collection(json: &str) -> Result<Vec<Region>> {
    let collection: RawFeatureCollection =
        serde_json::from_str(json).context("FeatureCollection nicht lesbar")?;
    if collection.kind != "FeatureCollection" {
        bail!(
            "Erwartete FeatureCollection, bekam '{}'",
            collection.kind
        );
    }

    let mut regions = Vec::new();
    for (index, value) in collection.features.into_iter().enumerate() {
        let feature: RawFeature = match serde_json::from_value(value) {
            Ok(feature) => feature,
            Err(err) => {
                log::warn!("Überspringe fehlerhaftes Regions-Feature #{index}: {err}");
                continue;
            }
        };

        let geometry = match feature.geometry {
            RawGeometry::Polygon { coordinates } => RegionGeometry::Polygon(rings(&coordinates)),
            RawGeometry::MultiPolygon { coordinates } => {
                RegionGeometry::MultiPolygon(coordinates.iter().map(|p| rings(p)).collect())
            }
            _ => {
                log::warn!("Überspringe Regions-Feature #{index}: keine Polygon-Geometrie");
                continue;
            }
        };

        let Some(id) = feature.properties.get("id").and_then(Value::as_str) else {
            log::warn!("Überspringe Regions-Feature #{index}: keine id-Property");
            continue;
        };

        let neighbours = feature
            .properties
            .get("neighbours")
            .and_then(Value::as_array)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        regions.push(Region {
            id: id.to_string(),
            geometry,
            hero_image: feature
                .properties
                .get("heroImage")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: feature
                .properties
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            neighbours,
        });
    }

    Ok(regions)
}

/// Liest eine FeatureCollection mit Linien-Features eines Pfad-Bündels.
pub fn parse_path_collection(json: &str) -> Result<Vec<PathFeature>> {
    let collection: RawFeatureCollection =
        serde_json::from_str(json).context("FeatureCollection nicht lesbar")?;
    if collection.kind != "FeatureCollection" {
        bail!(
            "Erwartete FeatureCollection, bekam '{}'",
            collection.kind
        );
    }

    let mut features = Vec::new();
    for (index, value) in collection.features.into_iter().enumerate() {
        let feature: RawFeature = match serde_json::from_value(value) {
            Ok(feature) => feature,
            Err(err) => {
                log::warn!("Überspringe fehlerhaftes Pfad-Feature #{index}: {err}");
                continue;
            }
        };

        let geometry = match feature.geometry {
            RawGeometry::LineString { coordinates } => PathGeometry::LineString(ring(&coordinates)),
            RawGeometry::MultiLineString { coordinates } => {
                PathGeometry::MultiLineString(rings(&coordinates))
            }
            _ => {
                log::warn!("Überspringe Pfad-Feature #{index}: keine Linien-Geometrie");
                continue;
            }
        };

        features.push(PathFeature {
            geometry,
            // Nicht-numerische Längen zählen als fehlend
            length: feature.properties.get("length").and_then(Value::as_f64),
            degree_length: feature
                .properties
                .get("degreeLength")
                .and_then(Value::as_f64),
        });
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION_JSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "id": "Orchard",
                    "heroImage": "/img/orchard.jpg",
                    "description": "Alte Obstbäume",
                    "neighbours": ["orchard_to_swanlake"]
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-79.27, 43.80], [-79.26, 43.80], [-79.26, 43.81], [-79.27, 43.80]]]
                }
            }
        ]
    }"#;

    #[test]
    fn test_region_collection_parsen() {
        let regions = parse_region_collection(REGION_JSON).expect("Parsen erwartet");
        assert_eq!(regions.len(), 1);

        let region = &regions[0];
        assert_eq!(region.id, "Orchard");
        assert_eq!(region.hero_image.as_deref(), Some("/img/orchard.jpg"));
        assert_eq!(region.description.as_deref(), Some("Alte Obstbäume"));
        assert_eq!(region.neighbours, vec!["orchard_to_swanlake"]);
        assert_eq!(region.geometry.outer_ring().len(), 4);
    }

    #[test]
    fn test_feature_ohne_id_wird_uebersprungen() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] }
                }
            ]
        }"#;
        let regions = parse_region_collection(json).expect("Parsen erwartet");
        assert!(regions.is_empty());
    }

    #[test]
    fn test_fehlerhaftes_feature_kippt_nicht_die_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                { "das": "ist kein Feature" },
                {
                    "type": "Feature",
                    "properties": { "id": "Gueltig" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] }
                }
            ]
        }"#;
        let regions = parse_region_collection(json).expect("Parsen erwartet");
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, "Gueltig");
    }

    #[test]
    fn test_falscher_containertyp_ist_harter_fehler() {
        let json = r#"{ "type": "Feature", "features": [] }"#;
        assert!(parse_region_collection(json).is_err());
        assert!(parse_path_collection(json).is_err());
    }

    #[test]
    fn test_pfad_collection_mit_laengen() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "length": 0.42, "degreeLength": 0.0038 },
                    "geometry": { "type": "LineString", "coordinates": [[-79.27, 43.80], [-79.26, 43.81]] }
                },
                {
                    "type": "Feature",
                    "properties": { "length": "keine Zahl" },
                    "geometry": { "type": "MultiLineString", "coordinates": [[[-79.27, 43.80], [-79.26, 43.81]]] }
                }
            ]
        }"#;
        let features = parse_path_collection(json).expect("Parsen erwartet");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].length, Some(0.42));
        assert_eq!(features[0].degree_length, Some(0.0038));
        assert_eq!(features[1].length, None);
    }

    #[test]
    fn test_hoehenwerte_werden_verworfen() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "id": "Dreid" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0, 12.0], [1.0, 0.0, 12.0], [1.0, 1.0, 12.0], [0.0, 0.0, 12.0]]] }
                }
            ]
        }"#;
        let regions = parse_region_collection(json).expect("Parsen erwartet");
        assert_eq!(regions[0].geometry.outer_ring().len(), 4);
    }
}
