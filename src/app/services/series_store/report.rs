//! Batch parsing statistics
//!
//! This module defines the report returned when a list or directory of
//! time-series documents is parsed into the store.

use std::path::PathBuf;
use std::time::Duration;

/// One document that failed during a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Document path
    pub path: PathBuf,

    /// Error message
    pub message: String,
}

/// Statistics about a batch parsing run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Number of documents considered
    pub files_discovered: usize,

    /// Number of documents parsed and stored
    pub documents_parsed: usize,

    /// Total records across the stored series
    pub records_loaded: usize,

    /// Documents that failed, in processing order
    pub failures: Vec<BatchFailure>,

    /// Time taken by the batch
    pub duration: Duration,
}

impl BatchReport {
    /// Create an empty report for `files_discovered` documents
    pub fn new(files_discovered: usize) -> Self {
        Self {
            files_discovered,
            ..Default::default()
        }
    }

    /// Check if any document failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Percentage of discovered documents that were stored
    pub fn success_rate(&self) -> f64 {
        if self.files_discovered == 0 {
            0.0
        } else {
            (self.documents_parsed as f64 / self.files_discovered as f64) * 100.0
        }
    }

    /// Get a summary string of the batch
    pub fn summary(&self) -> String {
        format!(
            "Parsed {}/{} documents ({} records, {} failed) in {:.2}s",
            self.documents_parsed,
            self.files_discovered,
            self.records_loaded,
            self.failures.len(),
            self.duration.as_secs_f64()
        )
    }
}
