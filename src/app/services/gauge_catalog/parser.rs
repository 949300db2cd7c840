//! Feature-collection parsing
//!
//! This module handles the two attribute layouts gauge catalogs come in:
//! - ESRI JSON, where each feature carries an `attributes` mapping
//! - GeoJSON, where the same mapping is called `properties`

use crate::app::models::{Gauge, GaugeCatalog};
use crate::app::services::field_parsers::{parse_grid_number, title_case};
use crate::constants::attributes;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(alias = "properties")]
    attributes: Map<String, Value>,
}

/// Parse a feature-collection document into a gauge catalog
///
/// Any malformed feature fails the whole document; no partial catalog is
/// returned.
pub fn parse_feature_collection(json: &str) -> Result<GaugeCatalog> {
    let collection: FeatureCollection = serde_json::from_str(json).map_err(|e| {
        Error::catalog_format(format!("Feature collection deserialization failed: {}", e))
    })?;

    let gauges = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, &feature.attributes))
        .collect::<Result<Vec<Gauge>>>()?;

    Ok(GaugeCatalog::new(gauges))
}

/// Parse the attribute mapping of the feature at `index`
pub fn parse_feature(index: usize, attrs: &Map<String, Value>) -> Result<Gauge> {
    let grid_value = attrs.get(attributes::GRID_NUMBER).ok_or_else(|| {
        Error::catalog_format(format!(
            "Feature {} has no '{}' attribute",
            index,
            attributes::GRID_NUMBER
        ))
    })?;
    let grid_number = parse_grid_number(index, grid_value)?;

    let river = required_text(index, attrs, attributes::RIVER)?;
    let station = required_text(index, attrs, attributes::STATION)?;

    Ok(Gauge::new(grid_number, title_case(river), title_case(station)))
}

fn required_text<'a>(index: usize, attrs: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    attrs.get(key).and_then(Value::as_str).ok_or_else(|| {
        Error::catalog_format(format!(
            "Feature {} has no text '{}' attribute",
            index, key
        ))
    })
}
