//! Shared test utilities and fixtures for series store tests

use crate::app::services::gauge_catalog::tests::esri_collection;
use crate::app::services::gauge_catalog::GaugeCatalogBuilder;
use crate::app::services::series_store::DischargeSeriesStore;
use crate::app::services::waterml_parser::tests::{
    kerki_document, point, waterml_document, write_document,
};
use serde_json::json;
use std::path::{Path, PathBuf};

pub mod snapshot_tests;

/// Catalog with the Kerki and Rees gauges
pub fn two_gauge_catalog() -> String {
    esri_collection(&[
        (json!(2316200), "AMU DARYA", "KERKI"),
        (json!(6335020), "RHINE RIVER", "REES"),
    ])
}

/// Three-point Rees document
pub fn rees_document() -> String {
    waterml_document(
        "6335020",
        "REES",
        &[
            point("2000-11-01T00:00:00+01:00", Some("1750")),
            point("2000-12-01T00:00:00+01:00", Some("1980.25")),
            point("2001-01-01T00:00:00+01:00", None),
        ],
    )
}

/// Document that parses as XML but lacks the observation member
pub fn broken_document() -> String {
    r#"<wml2:Collection xmlns:wml2="http://www.opengis.net/waterml/2.0"/>"#.to_string()
}

/// Write `(filename, content)` documents into `dir`
pub fn write_documents(dir: &Path, documents: &[(&str, String)]) -> Vec<PathBuf> {
    documents
        .iter()
        .map(|(name, content)| write_document(dir, name, content).unwrap())
        .collect()
}

/// Store holding the catalog and both the Kerki and Rees series
pub fn populated_store() -> DischargeSeriesStore {
    let mut store = DischargeSeriesStore::new();
    store.set_catalog(GaugeCatalogBuilder::parse_str(&two_gauge_catalog()).unwrap());
    store.parse_document_str(&kerki_document()).unwrap();
    store.parse_document_str(&rees_document()).unwrap();
    store
}
