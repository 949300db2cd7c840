//! Gauge catalog builder
//!
//! This module builds the ordered gauge table from a feature-collection
//! document. Grid numbers are parsed as integers and river/station names are
//! normalized to title case on ingestion.

use crate::app::models::GaugeCatalog;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::parse_feature_collection;

/// Builds a [`GaugeCatalog`] from a feature-collection document
#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeCatalogBuilder;

impl GaugeCatalogBuilder {
    /// Build a catalog from feature-collection JSON text
    pub fn parse_str(json: &str) -> Result<GaugeCatalog> {
        let catalog = parse_feature_collection(json)?;
        debug!("Parsed {} gauges from feature collection", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from a feature-collection file
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::CatalogFormat` for malformed JSON or missing attributes
    /// * Returns `Error::GridNumber` if a grid number is not an integer
    pub fn from_path(path: &Path) -> Result<GaugeCatalog> {
        info!("Building gauge catalog from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read feature collection {}", path.display()), e)
        })?;

        let catalog = Self::parse_str(&content)?;
        info!("Gauge catalog built: {} gauges", catalog.len());
        Ok(catalog)
    }
}
