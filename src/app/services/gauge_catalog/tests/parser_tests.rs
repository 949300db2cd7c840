//! Tests for feature-collection parsing

use super::{esri_collection, geojson_collection};
use crate::Error;
use crate::app::models::Gauge;
use crate::app::services::gauge_catalog::parser::{parse_feature, parse_feature_collection};
use serde_json::{Map, Value, json};

#[test]
fn test_single_feature_is_title_cased() {
    let json = esri_collection(&[(json!("2316200"), "AMU DARYA", "kerki")]);

    let catalog = parse_feature_collection(&json).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.gauges()[0], Gauge::new(2316200, "Amu Darya", "Kerki"));
}

#[test]
fn test_features_keep_document_order() {
    let json = esri_collection(&[
        (json!(6335020), "RHINE RIVER", "REES"),
        (json!(2316200), "AMU DARYA", "KERKI"),
        (json!(6142200), "DANUBE RIVER", "ORSOVA"),
    ]);

    let catalog = parse_feature_collection(&json).unwrap();
    let grid_numbers: Vec<i64> = catalog.iter().map(|g| g.grid_number).collect();
    assert_eq!(grid_numbers, vec![6335020, 2316200, 6142200]);
    assert_eq!(catalog.gauges()[2].river, "Danube River");
}

#[test]
fn test_duplicate_grid_numbers_are_kept() {
    let json = esri_collection(&[
        (json!(1), "A", "X"),
        (json!(1), "B", "Y"),
    ]);

    let catalog = parse_feature_collection(&json).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_geojson_properties_layout() {
    let json = geojson_collection(&[(json!(2316200), "AMU DARYA", "kerki")]);

    let catalog = parse_feature_collection(&json).unwrap();
    assert_eq!(catalog.gauges()[0].station, "Kerki");
}

#[test]
fn test_empty_feature_list() {
    let catalog = parse_feature_collection(r#"{"features": []}"#).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_non_numeric_grid_number_fails_whole_catalog() {
    let json = esri_collection(&[
        (json!(2316200), "AMU DARYA", "KERKI"),
        (json!("n/a"), "RHINE", "REES"),
    ]);

    let err = parse_feature_collection(&json).unwrap_err();
    match err {
        Error::GridNumber { index, value } => {
            assert_eq!(index, 1);
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_features_key() {
    let err = parse_feature_collection(r#"{"type": "FeatureCollection"}"#).unwrap_err();
    assert!(matches!(err, Error::CatalogFormat { .. }));
}

#[test]
fn test_malformed_json() {
    let err = parse_feature_collection("{ not json").unwrap_err();
    assert!(matches!(err, Error::CatalogFormat { .. }));
}

#[test]
fn test_feature_missing_attribute() {
    let mut attrs = Map::new();
    attrs.insert("grdc_no".to_string(), json!(1));
    attrs.insert("river".to_string(), json!("ELBE"));

    let err = parse_feature(4, &attrs).unwrap_err();
    assert!(err.to_string().contains("station"));
    assert!(err.to_string().contains("Feature 4"));
}

#[test]
fn test_feature_non_text_name() {
    let mut attrs = Map::new();
    attrs.insert("grdc_no".to_string(), json!(1));
    attrs.insert("river".to_string(), Value::Null);
    attrs.insert("station".to_string(), json!("DRESDEN"));

    assert!(matches!(
        parse_feature(0, &attrs),
        Err(Error::CatalogFormat { .. })
    ));
}
