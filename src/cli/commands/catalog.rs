//! Catalog command: build the gauge catalog and print or export it

use crate::app::services::gauge_catalog::GaugeCatalogBuilder;
use crate::app::services::series_store::export::write_csv;
use crate::cli::args::{CatalogArgs, resolve_separator};
use crate::config::{ConverterConfig, separator_byte};
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use tracing::info;

/// Run the catalog command
pub fn run_catalog(args: CatalogArgs, config: &ConverterConfig) -> Result<()> {
    args.validate()?;

    let catalog = GaugeCatalogBuilder::from_path(&args.input)
        .with_context(|| format!("Failed to build catalog from {}", args.input.display()))?;
    info!("Built catalog with {} gauges", catalog.len());

    let separator = separator_byte(resolve_separator(args.separator, config.csv_separator))?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(catalog.to_dataframe()?, &mut file, separator)?;
            println!(
                "{} {} gauges to {}",
                "Exported".bright_green().bold(),
                catalog.len(),
                path.display()
            );
        }
        None => {
            println!(
                "{} ({} gauges)",
                "Gauge catalog".bright_green().bold(),
                catalog.len()
            );
            for gauge in &catalog {
                println!(
                    "  {}  {} {}",
                    gauge.grid_number.to_string().bright_yellow(),
                    gauge.station.bright_cyan(),
                    format!("({})", gauge.river).bright_black()
                );
            }
        }
    }

    Ok(())
}
