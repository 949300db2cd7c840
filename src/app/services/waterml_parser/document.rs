//! Parsed time-series document structure

use crate::app::models::DischargeSeries;

/// Result of parsing one WaterML time-series document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Gauge reference, verbatim from the feature-of-interest `xlink:href`
    pub reference: String,

    /// Display title from `xlink:title`, title-cased (empty when absent)
    pub title: String,

    /// Monthly discharge series in point order
    pub series: DischargeSeries,
}

impl ParsedDocument {
    /// Number of points parsed
    pub fn record_count(&self) -> usize {
        self.series.len()
    }
}
