//! GRDC Converter Library
//!
//! A Rust library for converting river gauge metadata and monthly discharge
//! records published by the BfG / GRDC from their interchange formats into
//! typed in-memory tables.
//!
//! This library provides tools for:
//! - Building a gauge catalog from a feature-collection JSON document
//! - Parsing WaterML 2.0 time-series documents into monthly discharge series
//! - Looking up series by gauge reference and exporting tables to CSV
//! - Saving and restoring the whole store as a versioned binary snapshot

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_parsers;
        pub mod gauge_catalog;
        pub mod series_store;
        pub mod waterml_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DischargeRecord, DischargeSeries, Gauge, GaugeCatalog};
pub use app::services::gauge_catalog::GaugeCatalogBuilder;
pub use app::services::series_store::{BatchReport, DischargeSeriesStore, ExportOutcome};
pub use config::{BatchPolicy, ConverterConfig};

use std::path::PathBuf;

/// Result type alias for the GRDC converter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog, time-series and snapshot operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Feature collection could not be read
    #[error("Catalog format error: {message}")]
    CatalogFormat { message: String },

    /// Grid number attribute is not an integer
    #[error("Invalid grid number '{value}' in feature {index}")]
    GridNumber { index: usize, value: String },

    /// XML is not well-formed
    #[error("XML parsing error: {message}")]
    XmlParsing { message: String },

    /// A required element or attribute is missing from a time-series document
    #[error("Missing required '{element}' in time-series document{}", path_suffix(.path))]
    DocumentStructure {
        element: String,
        path: Option<PathBuf>,
    },

    /// A time-series point does not hold exactly one time/value pair
    #[error("Malformed point {index}: {message}")]
    MalformedPoint { index: usize, message: String },

    /// Date/time parsing error
    #[error("Invalid point date '{value}'")]
    DateParsing {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Discharge value is not a finite decimal
    #[error("Invalid discharge value '{value}': {message}")]
    ValueParsing { value: String, message: String },

    /// DataFrame construction or CSV serialization failed
    #[error("Table error: {message}")]
    Table {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Snapshot file is not a snapshot or its payload is corrupt
    #[error("Snapshot format error: {message}")]
    SnapshotFormat { message: String },

    /// Snapshot was written by an unsupported format version
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersion { found: u16, expected: u16 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Batch parsing stopped at the first failing document
    #[error("Batch aborted at {}: {source}", .path.display())]
    BatchAborted {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a catalog format error
    pub fn catalog_format(message: impl Into<String>) -> Self {
        Self::CatalogFormat {
            message: message.into(),
        }
    }

    /// Create a grid number error for the feature at `index`
    pub fn grid_number(index: usize, value: impl Into<String>) -> Self {
        Self::GridNumber {
            index,
            value: value.into(),
        }
    }

    /// Create an XML parsing error
    pub fn xml_parsing(message: impl Into<String>) -> Self {
        Self::XmlParsing {
            message: message.into(),
        }
    }

    /// Create a missing element error
    pub fn document_structure(element: impl Into<String>) -> Self {
        Self::DocumentStructure {
            element: element.into(),
            path: None,
        }
    }

    /// Create a malformed point error
    pub fn malformed_point(index: usize, message: impl Into<String>) -> Self {
        Self::MalformedPoint {
            index,
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            value: value.into(),
            source,
        }
    }

    /// Create a discharge value parsing error
    pub fn value_parsing(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValueParsing {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a table error with context
    pub fn table(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Table {
            message: message.into(),
            source,
        }
    }

    /// Create a snapshot format error
    pub fn snapshot_format(message: impl Into<String>) -> Self {
        Self::SnapshotFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap the first failure of an aborted batch
    pub fn batch_aborted(path: impl Into<PathBuf>, source: Error) -> Self {
        Self::BatchAborted {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Attach the document path to a structural error
    pub fn with_path(self, document: &std::path::Path) -> Self {
        match self {
            Self::DocumentStructure { element, path: None } => Self::DocumentStructure {
                element,
                path: Some(document.to_path_buf()),
            },
            other => other,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Table {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(error: roxmltree::Error) -> Self {
        Self::XmlParsing {
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        let message = format!("Directory traversal failed: {}", error);
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other(message.clone()));
        Self::Io { message, source }
    }
}
