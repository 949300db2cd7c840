//! Discharge series store with catalog, lookup, export and snapshots
//!
//! The store owns the optional gauge catalog and every parsed discharge
//! series, keyed by the gauge reference found in each time-series document.
//! Catalog grid numbers and series references are different identifier
//! representations; [`DischargeSeriesStore::series_for_gauge`] and
//! [`DischargeSeriesStore::gauge_for_reference`] bridge them explicitly.

use crate::app::models::{DischargeSeries, Gauge, GaugeCatalog};
use crate::app::services::field_parsers::grid_number_from_reference;
use crate::app::services::gauge_catalog::GaugeCatalogBuilder;
use crate::app::services::waterml_parser::WatermlParser;
use crate::config::ConverterConfig;
use crate::Result;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub mod export;
pub mod loader;
pub mod report;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use export::ExportOutcome;
pub use report::{BatchFailure, BatchReport};

/// Store of monthly discharge series keyed by gauge reference
#[derive(Debug, Clone)]
pub struct DischargeSeriesStore {
    /// Gauge catalog, once built
    pub(crate) catalog: Option<GaugeCatalog>,

    /// Series indexed by gauge reference
    pub(crate) series: BTreeMap<String, DischargeSeries>,

    /// Configuration supplied at construction
    pub(crate) config: ConverterConfig,

    /// Parser bound to the configured namespaces
    pub(crate) parser: WatermlParser,
}

impl DischargeSeriesStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: ConverterConfig) -> Self {
        let parser = WatermlParser::new(config.namespaces.clone());
        Self {
            catalog: None,
            series: BTreeMap::new(),
            config,
            parser,
        }
    }

    /// Configuration this store was constructed with
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The gauge catalog, if one has been built
    pub fn catalog(&self) -> Option<&GaugeCatalog> {
        self.catalog.as_ref()
    }

    /// Replace the gauge catalog
    pub fn set_catalog(&mut self, catalog: GaugeCatalog) {
        self.catalog = Some(catalog);
    }

    /// Build the gauge catalog from a feature-collection file and keep it
    ///
    /// On failure the previous catalog, if any, is left untouched.
    pub fn build_catalog_from_path(&mut self, path: &Path) -> Result<&GaugeCatalog> {
        let catalog = GaugeCatalogBuilder::from_path(path)?;
        Ok(self.catalog.insert(catalog))
    }

    /// Series stored under `reference`
    pub fn get_series(&self, reference: &str) -> Option<&DischargeSeries> {
        self.series.get(reference)
    }

    /// Series for a catalog gauge
    ///
    /// Tries the grid number as a reference first, then any reference whose
    /// trailing number equals the grid number.
    pub fn series_for_gauge(&self, gauge: &Gauge) -> Option<&DischargeSeries> {
        self.series.get(&gauge.grid_number.to_string()).or_else(|| {
            self.series
                .iter()
                .find(|(reference, _)| {
                    grid_number_from_reference(reference) == Some(gauge.grid_number)
                })
                .map(|(_, series)| series)
        })
    }

    /// Catalog gauge a series reference points at
    pub fn gauge_for_reference(&self, reference: &str) -> Option<&Gauge> {
        let grid_number = grid_number_from_reference(reference)?;
        self.catalog.as_ref()?.find(grid_number)
    }

    /// Whether a series is stored under `reference`
    pub fn contains(&self, reference: &str) -> bool {
        self.series.contains_key(reference)
    }

    /// Stored references in ascending order
    pub fn gauge_ids(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Iterate `(reference, series)` pairs in ascending reference order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DischargeSeries)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored series
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series is stored
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total records across all series
    pub fn record_count(&self) -> usize {
        self.series.values().map(DischargeSeries::len).sum()
    }

    /// Store `series` under `reference`, replacing any previous series
    pub fn insert(
        &mut self,
        reference: impl Into<String>,
        series: DischargeSeries,
    ) -> &DischargeSeries {
        let reference = reference.into();
        if self.series.contains_key(&reference) {
            debug!("Replacing series for gauge {}", reference);
        }

        match self.series.entry(reference) {
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                entry.insert(series);
                entry.into_mut()
            }
            std::collections::btree_map::Entry::Vacant(entry) => entry.insert(series),
        }
    }
}

impl Default for DischargeSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Stores are equal when their catalogs and series are equal
impl PartialEq for DischargeSeriesStore {
    fn eq(&self, other: &Self) -> bool {
        self.catalog == other.catalog && self.series == other.series
    }
}
