//! Data models for GRDC conversion
//!
//! This module contains the core data structures for representing river gauges
//! and their monthly discharge histories, plus their tabular (DataFrame) views.

use crate::constants::{gauge_columns, series_columns};
use crate::{Error, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Gauge Catalog
// =============================================================================

/// A river gauge as listed in the feature-collection catalog
///
/// River and station names are stored title-cased; the original casing of the
/// source document is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    /// GRDC grid number identifying the gauge
    pub grid_number: i64,

    /// River name (e.g., "Amu Darya")
    pub river: String,

    /// Station name (e.g., "Kerki")
    pub station: String,
}

impl Gauge {
    /// Create a new gauge
    pub fn new(grid_number: i64, river: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            grid_number,
            river: river.into(),
            station: station.into(),
        }
    }
}

/// Ordered table of gauges in source document order
///
/// Grid numbers are expected to be unique but this is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaugeCatalog {
    gauges: Vec<Gauge>,
}

impl GaugeCatalog {
    /// Create a catalog from gauges in document order
    pub fn new(gauges: Vec<Gauge>) -> Self {
        Self { gauges }
    }

    /// All gauges in document order
    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }

    /// Iterate gauges in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Gauge> {
        self.gauges.iter()
    }

    /// Number of gauges (table rows)
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    /// Whether the catalog has no gauges
    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// First gauge carrying `grid_number`
    pub fn find(&self, grid_number: i64) -> Option<&Gauge> {
        self.gauges.iter().find(|g| g.grid_number == grid_number)
    }

    /// Tabular view with columns `GridNo`, `River`, `Station`
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let grid_numbers: Vec<i64> = self.gauges.iter().map(|g| g.grid_number).collect();
        let rivers: Vec<&str> = self.gauges.iter().map(|g| g.river.as_str()).collect();
        let stations: Vec<&str> = self.gauges.iter().map(|g| g.station.as_str()).collect();

        df!(
            gauge_columns::GRID_NUMBER => grid_numbers,
            gauge_columns::RIVER => rivers,
            gauge_columns::STATION => stations,
        )
        .map_err(|e| Error::table("Failed to build gauge table", e))
    }
}

impl<'a> IntoIterator for &'a GaugeCatalog {
    type Item = &'a Gauge;
    type IntoIter = std::slice::Iter<'a, Gauge>;

    fn into_iter(self) -> Self::IntoIter {
        self.gauges.iter()
    }
}

// =============================================================================
// Discharge Series
// =============================================================================

/// One monthly discharge measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DischargeRecord {
    /// Calendar year
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,

    /// Discharge in m³/s; `None` when the source value is missing
    pub discharge: Option<f64>,
}

impl DischargeRecord {
    /// Create a new record
    pub fn new(year: i32, month: u32, discharge: Option<f64>) -> Self {
        Self {
            year,
            month,
            discharge,
        }
    }

    /// Whether the source value was missing
    pub fn is_missing(&self) -> bool {
        self.discharge.is_none()
    }

    /// Discharge with the missing sentinel expressed as NaN
    pub fn discharge_or_nan(&self) -> f64 {
        self.discharge.unwrap_or(f64::NAN)
    }
}

/// A gauge's monthly discharge history in document point order
///
/// Chronological ordering is expected but not verified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DischargeSeries {
    records: Vec<DischargeRecord>,
}

impl DischargeSeries {
    /// Create a series from records in document order
    pub fn new(records: Vec<DischargeRecord>) -> Self {
        Self { records }
    }

    /// All records in document order
    pub fn records(&self) -> &[DischargeRecord] {
        &self.records
    }

    /// Iterate records in document order
    pub fn iter(&self) -> std::slice::Iter<'_, DischargeRecord> {
        self.records.iter()
    }

    /// Number of records (table rows)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records whose value was missing in the source
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }

    /// First and last `(year, month)` in document order
    pub fn span(&self) -> Option<((i32, u32), (i32, u32))> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some(((first.year, first.month), (last.year, last.month)))
    }

    /// Tabular view with columns `Year`, `Month`, `Discharge` (nullable)
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        let months: Vec<i32> = self.records.iter().map(|r| r.month as i32).collect();
        let discharges: Vec<Option<f64>> = self.records.iter().map(|r| r.discharge).collect();

        df!(
            series_columns::YEAR => years,
            series_columns::MONTH => months,
            series_columns::DISCHARGE => discharges,
        )
        .map_err(|e| Error::table("Failed to build discharge table", e))
    }
}

impl<'a> IntoIterator for &'a DischargeSeries {
    type Item = &'a DischargeRecord;
    type IntoIter = std::slice::Iter<'a, DischargeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<DischargeRecord> for DischargeSeries {
    fn from_iter<I: IntoIterator<Item = DischargeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> DischargeSeries {
        DischargeSeries::new(vec![
            DischargeRecord::new(1995, 3, Some(120.5)),
            DischargeRecord::new(1995, 4, None),
            DischargeRecord::new(1995, 5, Some(98.0)),
        ])
    }

    #[test]
    fn test_gauge_catalog_lookup() {
        let catalog = GaugeCatalog::new(vec![
            Gauge::new(2316200, "Amu Darya", "Kerki"),
            Gauge::new(6335020, "Rhine River", "Rees"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(6335020).unwrap().station, "Rees");
        assert!(catalog.find(1).is_none());
    }

    #[test]
    fn test_gauge_catalog_dataframe() {
        let catalog = GaugeCatalog::new(vec![
            Gauge::new(2316200, "Amu Darya", "Kerki"),
            Gauge::new(6335020, "Rhine River", "Rees"),
        ]);

        let df = catalog.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 3));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["GridNo", "River", "Station"]);
        let grid = df.column("GridNo").unwrap().i64().unwrap();
        assert_eq!(grid.get(0), Some(2316200));
        let river = df.column("River").unwrap().str().unwrap();
        assert_eq!(river.get(1), Some("Rhine River"));
    }

    #[test]
    fn test_empty_catalog_dataframe() {
        let df = GaugeCatalog::default().to_dataframe().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_discharge_record_missing_sentinel() {
        let present = DischargeRecord::new(2000, 1, Some(12.0));
        let missing = DischargeRecord::new(2000, 2, None);

        assert!(!present.is_missing());
        assert_eq!(present.discharge_or_nan(), 12.0);
        assert!(missing.is_missing());
        assert!(missing.discharge_or_nan().is_nan());
    }

    #[test]
    fn test_series_summary_helpers() {
        let series = sample_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.missing_count(), 1);
        assert_eq!(series.span(), Some(((1995, 3), (1995, 5))));
        assert_eq!(DischargeSeries::default().span(), None);
    }

    #[test]
    fn test_series_dataframe_keeps_missing_as_null() {
        let df = sample_series().to_dataframe().unwrap();
        assert_eq!(df.shape(), (3, 3));

        let discharge = df.column("Discharge").unwrap().f64().unwrap();
        assert_eq!(discharge.get(0), Some(120.5));
        assert_eq!(discharge.get(1), None);
        assert_eq!(discharge.null_count(), 1);

        let month = df.column("Month").unwrap().i32().unwrap();
        assert_eq!(month.get(2), Some(5));
    }

    #[test]
    fn test_series_serde_round_trip() {
        let series = sample_series();
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.contains("null"));

        let restored: DischargeSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, series);
    }
}
