//! Command-line argument definitions for the GRDC converter
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::BatchPolicy;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GRDC converter
///
/// Converts GRDC gauge catalogs and WaterML 2.0 monthly discharge documents
/// into typed tables, snapshots and CSV files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "grdc-converter",
    version,
    about = "Convert GRDC gauge metadata and WaterML discharge series into tables",
    long_about = "Builds a gauge catalog from a GRDC feature-collection JSON file, parses \
                  WaterML 2.0 monthly discharge documents into per-gauge series, and saves \
                  the result as a compressed snapshot that can be inspected or exported to CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file for namespaces, file extension, separator and
    /// batch policy. If not specified, looks for
    /// `<config dir>/grdc-converter/config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Build the gauge catalog from a feature-collection file
    Catalog(CatalogArgs),
    /// Parse a directory of WaterML documents into a snapshot
    Convert(ConvertArgs),
    /// Summarize a snapshot or print one series
    Show(ShowArgs),
    /// Export one series or the gauge catalog from a snapshot to CSV
    Export(ExportArgs),
}

/// Arguments for the catalog command
#[derive(Debug, Clone, ClapArgs)]
pub struct CatalogArgs {
    /// Feature-collection JSON file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Write the catalog as CSV instead of printing it
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// CSV field separator
    #[arg(short = 's', long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,
}

/// Arguments for the convert command
#[derive(Debug, Clone, ClapArgs)]
pub struct ConvertArgs {
    /// Directory holding WaterML documents
    ///
    /// Only files directly inside the directory are considered.
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input: PathBuf,

    /// Feature-collection JSON file to build the gauge catalog from
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Snapshot file to write
    #[arg(short = 's', long = "snapshot", value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Also export every series as `<reference>.csv` into this directory
    #[arg(long = "csv-dir", value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// CSV field separator for `--csv-dir`
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,

    /// Stop at the first document that fails to parse
    #[arg(long = "fail-fast", help = "Stop at the first document that fails to parse")]
    pub fail_fast: bool,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Disable the progress bar")]
    pub no_progress: bool,
}

/// Arguments for the show command
#[derive(Debug, Clone, ClapArgs)]
pub struct ShowArgs {
    /// Snapshot file to read
    #[arg(short = 's', long = "snapshot", value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Gauge reference of the series to print
    #[arg(long = "id", value_name = "REF")]
    pub id: Option<String>,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, ClapArgs)]
pub struct ExportArgs {
    /// Snapshot file to read
    #[arg(short = 's', long = "snapshot", value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Gauge reference of the series to export
    #[arg(long = "id", value_name = "REF", conflicts_with = "gauges")]
    pub id: Option<String>,

    /// Export the gauge catalog instead of a series
    #[arg(long = "gauges")]
    pub gauges: bool,

    /// CSV file to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// CSV field separator
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Tracing level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl CatalogArgs {
    /// Validate the catalog command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Catalog file does not exist: {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input.display()
            )));
        }

        if let Some(catalog) = &self.catalog {
            if !catalog.is_file() {
                return Err(Error::configuration(format!(
                    "Catalog file does not exist: {}",
                    catalog.display()
                )));
            }
        }

        Ok(())
    }

    /// Batch policy selected by `--fail-fast`, if any
    pub fn batch_policy(&self) -> Option<BatchPolicy> {
        self.fail_fast.then_some(BatchPolicy::AbortOnFirstError)
    }

    /// Whether to draw the progress bar
    pub fn show_progress(&self, quiet: bool) -> bool {
        !self.no_progress && !quiet
    }
}

impl ExportArgs {
    /// Validate the export command arguments
    pub fn validate(&self) -> Result<()> {
        match (&self.id, self.gauges) {
            (None, false) => Err(Error::configuration(
                "Either --id <REF> or --gauges is required",
            )),
            _ => Ok(()),
        }
    }
}

/// Separator to use: the flag if given, else the configured one
pub fn resolve_separator(flag: Option<char>, configured: char) -> char {
    flag.unwrap_or(configured)
}
