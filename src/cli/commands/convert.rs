//! Convert command: parse a directory of documents into a snapshot

use super::shared::format_size;
use crate::DischargeSeriesStore;
use crate::cli::args::{ConvertArgs, resolve_separator};
use crate::config::ConverterConfig;
use anyhow::{Context, Result};
use colored::*;
use tracing::{info, warn};

/// Run the convert command
pub fn run_convert(args: ConvertArgs, mut config: ConverterConfig, quiet: bool) -> Result<()> {
    args.validate()?;

    if let Some(policy) = args.batch_policy() {
        config = config.with_batch_policy(policy);
    }
    config.show_progress = args.show_progress(quiet);
    let separator = resolve_separator(args.separator, config.csv_separator);

    let mut store = DischargeSeriesStore::with_config(config);

    if let Some(catalog_path) = &args.catalog {
        let catalog = store
            .build_catalog_from_path(catalog_path)
            .with_context(|| format!("Failed to build catalog from {}", catalog_path.display()))?;
        info!("Built catalog with {} gauges", catalog.len());
    }

    let report = store
        .parse_directory(&args.input)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if let Some(catalog) = store.catalog() {
        let unmatched = store
            .gauge_ids()
            .filter(|reference| store.gauge_for_reference(reference).is_none())
            .count();
        if unmatched > 0 {
            warn!(
                "{} of {} series have no gauge in the catalog ({} gauges)",
                unmatched,
                store.len(),
                catalog.len()
            );
        }
    }

    store
        .save(&args.snapshot)
        .with_context(|| format!("Failed to save snapshot {}", args.snapshot.display()))?;

    if let Some(csv_dir) = &args.csv_dir {
        let written = store
            .export_all_series_to_csv(csv_dir, separator)
            .with_context(|| format!("Failed to export series to {}", csv_dir.display()))?;
        info!("Wrote {} CSV files to {}", written, csv_dir.display());
    }

    if !quiet {
        let size = std::fs::metadata(&args.snapshot)
            .map(|m| m.len())
            .unwrap_or_default();

        println!("{}", "Conversion complete".bright_green().bold());
        println!("  {}", report.summary());
        println!(
            "  Snapshot: {} ({})",
            args.snapshot.display().to_string().bright_cyan(),
            format_size(size)
        );
        for failure in &report.failures {
            println!(
                "  {} {}: {}",
                "failed".bright_red(),
                failure.path.display(),
                failure.message
            );
        }
    }

    Ok(())
}
