//! Configuration management and validation.
//!
//! Provides the immutable configuration a store is constructed with: XML
//! namespaces, the time-series file extension, CSV separator and the batch
//! failure policy. Configuration can be loaded from a TOML file; values not
//! present in the file keep their defaults.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_CSV_SEPARATOR, DEFAULT_SERIES_EXTENSION, OM_NAMESPACE,
    WML2_NAMESPACE, XLINK_NAMESPACE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Namespace URIs used to resolve WaterML element and attribute names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    /// WaterML 2.0 namespace (`wml2:` prefix)
    pub wml2: String,

    /// Observations & Measurements namespace (`om:` prefix)
    pub om: String,

    /// XLink namespace (`xlink:` prefix)
    pub xlink: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            wml2: WML2_NAMESPACE.to_string(),
            om: OM_NAMESPACE.to_string(),
            xlink: XLINK_NAMESPACE.to_string(),
        }
    }
}

/// What batch parsing does when one document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Record the failure in the batch report and keep going
    #[default]
    ContinueOnError,
    /// Return the first failure; documents parsed before it stay stored
    AbortOnFirstError,
}

/// Converter configuration supplied at store construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// XML namespaces of time-series documents
    pub namespaces: Namespaces,

    /// Extension (without dot) of time-series documents in a directory scan
    pub series_extension: String,

    /// CSV field separator, a single ASCII character
    pub csv_separator: char,

    /// Failure policy for batch parsing
    pub batch_policy: BatchPolicy,

    /// Show a progress bar during batch parsing
    pub show_progress: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            namespaces: Namespaces::default(),
            series_extension: DEFAULT_SERIES_EXTENSION.to_string(),
            csv_separator: DEFAULT_CSV_SEPARATOR as char,
            batch_policy: BatchPolicy::default(),
            show_progress: false,
        }
    }
}

impl ConverterConfig {
    /// Set the CSV separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.csv_separator = separator;
        self
    }

    /// Set the batch failure policy
    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    /// Set the time-series file extension (a leading dot is ignored)
    pub fn with_series_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.series_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the XML namespaces
    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Enable the batch progress bar
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// The CSV separator as the byte written between fields
    pub fn separator_byte(&self) -> Result<u8> {
        separator_byte(self.csv_separator)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.separator_byte()?;

        if self.series_extension.is_empty() {
            return Err(Error::configuration(
                "Time-series file extension cannot be empty",
            ));
        }

        for (prefix, uri) in [
            ("wml2", &self.namespaces.wml2),
            ("om", &self.namespaces.om),
            ("xlink", &self.namespaces.xlink),
        ] {
            if uri.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Namespace URI for '{}' cannot be empty",
                    prefix
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location (`<config dir>/grdc-converter/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else fall back to defaults
    pub fn load_layered(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Ok(default_path) if default_path.exists() => Self::from_file(&default_path),
            _ => Ok(Self::default()),
        }
    }
}

/// Convert a separator character into the single byte a CSV writer expects
pub fn separator_byte(separator: char) -> Result<u8> {
    if separator.is_ascii() && separator != '"' && separator != '\n' && separator != '\r' {
        Ok(separator as u8)
    } else {
        Err(Error::configuration(format!(
            "CSV separator must be a single ASCII character other than quote or newline, got {:?}",
            separator
        )))
    }
}
