//! Shared test utilities and fixtures for gauge catalog tests

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub mod builder_tests;
pub mod parser_tests;

/// Build an ESRI-style feature collection from `(grdc_no, river, station)` rows
pub fn esri_collection(rows: &[(Value, &str, &str)]) -> String {
    let features: Vec<Value> = rows
        .iter()
        .map(|(grid, river, station)| {
            json!({
                "attributes": {
                    "grdc_no": grid,
                    "river": river,
                    "station": station,
                    "area": 1234.5
                },
                "geometry": { "x": 65.2, "y": 37.8 }
            })
        })
        .collect();

    json!({
        "displayFieldName": "station",
        "features": features
    })
    .to_string()
}

/// Build a GeoJSON feature collection from `(grdc_no, river, station)` rows
pub fn geojson_collection(rows: &[(Value, &str, &str)]) -> String {
    let features: Vec<Value> = rows
        .iter()
        .map(|(grid, river, station)| {
            json!({
                "type": "Feature",
                "properties": {
                    "grdc_no": grid,
                    "river": river,
                    "station": station
                },
                "geometry": { "type": "Point", "coordinates": [65.2, 37.8] }
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features
    })
    .to_string()
}

/// Write a feature collection file and return its path
pub fn write_collection(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, content)?;
    Ok(path)
}
