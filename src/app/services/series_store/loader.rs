//! Time-series document loading and file discovery
//!
//! This module parses single WaterML documents into the store and runs
//! batches over explicit path lists or a non-recursive directory scan.

use super::DischargeSeriesStore;
use super::report::{BatchFailure, BatchReport};
use crate::app::models::DischargeSeries;
use crate::config::BatchPolicy;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

impl DischargeSeriesStore {
    /// Parse one time-series document and store its series
    ///
    /// The series replaces any series already stored under the document's
    /// gauge reference. On any error nothing is stored.
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::XmlParsing` or `Error::DocumentStructure` for malformed documents
    /// * Returns `Error::MalformedPoint`, `Error::DateParsing` or `Error::ValueParsing`
    ///   for a bad point
    pub fn parse_document(&mut self, path: &Path) -> Result<&DischargeSeries> {
        let parsed = self.parser.parse_file(path)?;
        Ok(self.insert(parsed.reference, parsed.series))
    }

    /// Parse time-series document text and store its series
    pub fn parse_document_str(&mut self, xml: &str) -> Result<&DischargeSeries> {
        let parsed = self.parser.parse_str(xml)?;
        Ok(self.insert(parsed.reference, parsed.series))
    }

    /// Parse documents in the listed order
    ///
    /// With [`BatchPolicy::ContinueOnError`] failures are collected in the
    /// report; with [`BatchPolicy::AbortOnFirstError`] the first failure is
    /// returned and documents parsed before it stay stored.
    pub fn parse_documents(&mut self, paths: &[PathBuf]) -> Result<BatchReport> {
        let start_time = Instant::now();
        let mut report = BatchReport::new(paths.len());

        let progress_bar = if self.config.show_progress {
            let pb = ProgressBar::new(paths.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.set_message("Parsing time-series documents...");
            Some(pb)
        } else {
            None
        };

        for (index, path) in paths.iter().enumerate() {
            if let Some(pb) = &progress_bar {
                pb.set_position(index as u64);
                pb.set_message(format!(
                    "Parsing {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }

            match self.parse_document(path).map(|series| series.len()) {
                Ok(records) => {
                    report.documents_parsed += 1;
                    report.records_loaded += records;
                }
                Err(e) => match self.config.batch_policy {
                    BatchPolicy::ContinueOnError => {
                        warn!("Failed to parse {}: {}", path.display(), e);
                        report.failures.push(BatchFailure {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                    }
                    BatchPolicy::AbortOnFirstError => {
                        if let Some(pb) = &progress_bar {
                            pb.abandon_with_message("Batch aborted");
                        }
                        return Err(Error::batch_aborted(path.clone(), e));
                    }
                },
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Time-series parsing complete");
        }

        report.duration = start_time.elapsed();
        info!("{}", report.summary());

        Ok(report)
    }

    /// Discover and parse every time-series document in `dir`
    ///
    /// Entries that cannot be read during the scan (such as dangling links)
    /// are handled by the batch policy like documents that fail to parse.
    pub fn parse_directory(&mut self, dir: &Path) -> Result<BatchReport> {
        info!("Loading time-series documents from {}", dir.display());

        let (files, scan_failures) = self.scan_series_files(dir)?;
        info!(
            "Found {} .{} files to process",
            files.len(),
            self.config.series_extension
        );

        let mut report = self.parse_documents(&files)?;
        if !scan_failures.is_empty() {
            report.files_discovered += scan_failures.len();
            report.failures.splice(0..0, scan_failures);
        }

        Ok(report)
    }

    /// Time-series documents directly inside `dir`, sorted by file name
    ///
    /// The scan is not recursive; a file matches when its extension equals the
    /// configured extension, compared ASCII case-insensitively. Unreadable
    /// entries are skipped under [`BatchPolicy::ContinueOnError`].
    pub fn discover_series_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.scan_series_files(dir).map(|(files, _)| files)
    }

    fn scan_series_files(&self, dir: &Path) -> Result<(Vec<PathBuf>, Vec<BatchFailure>)> {
        if !dir.is_dir() {
            return Err(Error::io(
                format!("Time-series directory not found: {}", dir.display()),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let Some(path) = e.path().map(Path::to_path_buf) else {
                        return Err(e.into());
                    };
                    if e.depth() == 0 {
                        return Err(e.into());
                    }
                    if !has_extension(&path, &self.config.series_extension) {
                        debug!("Skipping unreadable entry {}: {}", path.display(), e);
                        continue;
                    }
                    match self.config.batch_policy {
                        BatchPolicy::ContinueOnError => {
                            warn!("Skipping unreadable entry {}: {}", path.display(), e);
                            failures.push(BatchFailure {
                                path,
                                message: e.to_string(),
                            });
                            continue;
                        }
                        BatchPolicy::AbortOnFirstError => {
                            return Err(Error::batch_aborted(path, e.into()));
                        }
                    }
                }
            };

            if entry.file_type().is_file()
                && has_extension(entry.path(), &self.config.series_extension)
            {
                files.push(entry.into_path());
            } else {
                debug!("Skipping {}", entry.path().display());
            }
        }

        Ok((files, failures))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
