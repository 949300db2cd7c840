//! Tests for building catalogs from text and files

use super::{esri_collection, write_collection};
use crate::Error;
use crate::app::services::gauge_catalog::GaugeCatalogBuilder;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_from_path() {
    let temp_dir = TempDir::new().unwrap();
    let content = esri_collection(&[
        (json!(2316200), "AMU DARYA", "KERKI"),
        (json!(6335020), "RHINE RIVER", "REES"),
    ]);
    let path = write_collection(temp_dir.path(), "stationbasins.geojson", &content).unwrap();

    let catalog = GaugeCatalogBuilder::from_path(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find(6335020).unwrap().river, "Rhine River");
}

#[test]
fn test_from_path_missing_file() {
    let result = GaugeCatalogBuilder::from_path(Path::new("/nonexistent/stations.geojson"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_parse_str_matches_from_path() {
    let temp_dir = TempDir::new().unwrap();
    let content = esri_collection(&[(json!("42"), "ODER", "HOHENSAATEN-FINOW")]);
    let path = write_collection(temp_dir.path(), "gauges.json", &content).unwrap();

    let from_text = GaugeCatalogBuilder::parse_str(&content).unwrap();
    let from_file = GaugeCatalogBuilder::from_path(&path).unwrap();
    assert_eq!(from_text, from_file);
    assert_eq!(from_text.gauges()[0].station, "Hohensaaten-Finow");
}
