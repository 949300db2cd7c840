//! CSV export of the gauge catalog and discharge series
//!
//! Both exports share one miss policy: when there is nothing to export (no
//! catalog built, unknown reference) they return [`ExportOutcome::NotFound`]
//! and leave the file system untouched. Errors are reserved for I/O and
//! table serialization failures.

use super::DischargeSeriesStore;
use crate::config::separator_byte;
use crate::constants::INDEX_COLUMN;
use crate::{Error, Result};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Result of an export request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written with `rows` data rows
    Written { rows: usize },
    /// Nothing to export; no file was written
    NotFound,
}

impl ExportOutcome {
    /// Whether a file was written
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

impl DischargeSeriesStore {
    /// Export the gauge catalog as CSV
    ///
    /// Returns [`ExportOutcome::NotFound`] when no catalog has been built.
    pub fn export_gauges_to_csv(&self, path: &Path, separator: char) -> Result<ExportOutcome> {
        let separator = separator_byte(separator)?;

        let Some(catalog) = &self.catalog else {
            debug!("No gauge catalog built, skipping export to {}", path.display());
            return Ok(ExportOutcome::NotFound);
        };

        let rows = write_table_csv(catalog.to_dataframe()?, path, separator)?;
        info!("Exported {} gauges to {}", rows, path.display());
        Ok(ExportOutcome::Written { rows })
    }

    /// Export the series stored under `reference` as CSV
    ///
    /// Returns [`ExportOutcome::NotFound`] when the reference is unknown.
    pub fn export_series_to_csv(
        &self,
        reference: &str,
        path: &Path,
        separator: char,
    ) -> Result<ExportOutcome> {
        let separator = separator_byte(separator)?;

        let Some(series) = self.series.get(reference) else {
            debug!("No series for gauge {}, skipping export", reference);
            return Ok(ExportOutcome::NotFound);
        };

        let rows = write_table_csv(series.to_dataframe()?, path, separator)?;
        info!(
            "Exported {} records for gauge {} to {}",
            rows,
            reference,
            path.display()
        );
        Ok(ExportOutcome::Written { rows })
    }

    /// Export every stored series as `<reference>.csv` into `dir`
    ///
    /// References are reduced to file-name-safe names; when two references
    /// reduce to the same name, later ones get a `_2`, `_3`, ... suffix.
    /// Returns the number of files written.
    pub fn export_all_series_to_csv(&self, dir: &Path, separator: char) -> Result<usize> {
        let separator = separator_byte(separator)?;

        std::fs::create_dir_all(dir).map_err(|e| {
            Error::io(format!("Failed to create export directory {}", dir.display()), e)
        })?;

        let mut used_stems = HashSet::new();
        let mut written = 0;
        for (reference, series) in &self.series {
            let stem = unique_stem(file_stem_for(reference), &mut used_stems);
            let path = dir.join(format!("{}.csv", stem));
            write_table_csv(series.to_dataframe()?, &path, separator)?;
            written += 1;
        }

        info!("Exported {} series to {}", written, dir.display());
        Ok(written)
    }
}

/// Write a table as CSV with a leading unnamed row-index column
///
/// Missing values are written as empty fields.
pub fn write_csv<W: Write>(df: DataFrame, writer: &mut W, separator: u8) -> Result<()> {
    let separator_str = char::from(separator).to_string();
    let header: Vec<&str> = std::iter::once(INDEX_COLUMN)
        .chain(df.get_column_names().into_iter().map(|name| name.as_str()))
        .collect();
    writeln!(writer, "{}", header.join(&separator_str))
        .map_err(|e| Error::io("Failed to write CSV header", e))?;

    let mut indexed = df
        .with_row_index(INDEX_COLUMN.into(), None)
        .map_err(|e| Error::table("Failed to add row index", e))?;

    CsvWriter::new(writer)
        .include_header(false)
        .with_separator(separator)
        .finish(&mut indexed)
        .map_err(|e| Error::table("Failed to write CSV", e))
}

fn write_table_csv(df: DataFrame, path: &Path, separator: u8) -> Result<usize> {
    let rows = df.height();
    let mut file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    write_csv(df, &mut file, separator)?;
    Ok(rows)
}

/// `stem`, or `stem_<n>` for the smallest `n >= 2` not yet in `used`
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    let mut candidate = stem.clone();
    let mut suffix = 2;
    while used.contains(&candidate) {
        candidate = format!("{}_{}", stem, suffix);
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Reduce a gauge reference to a file-name-safe stem
pub fn file_stem_for(reference: &str) -> String {
    let stem: String = reference
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');

    if stem.is_empty() {
        "gauge".to_string()
    } else {
        stem.to_string()
    }
}
