//! Export command: write one series or the catalog from a snapshot to CSV

use super::shared::open_snapshot;
use crate::ExportOutcome;
use crate::cli::args::{ExportArgs, resolve_separator};
use crate::config::ConverterConfig;
use anyhow::Result;
use colored::*;

/// Run the export command
pub fn run_export(args: ExportArgs, config: ConverterConfig) -> Result<()> {
    args.validate()?;

    let separator = resolve_separator(args.separator, config.csv_separator);
    let store = open_snapshot(&args.snapshot, config)?;

    let (what, outcome) = match &args.id {
        Some(id) => (
            format!("series {}", id),
            store.export_series_to_csv(id, &args.output, separator)?,
        ),
        None => (
            "gauge catalog".to_string(),
            store.export_gauges_to_csv(&args.output, separator)?,
        ),
    };

    match outcome {
        ExportOutcome::Written { rows } => {
            println!(
                "{} {} ({} rows) to {}",
                "Exported".bright_green().bold(),
                what,
                rows,
                args.output.display()
            );
            Ok(())
        }
        ExportOutcome::NotFound => {
            anyhow::bail!("No {} in snapshot {}", what, args.snapshot.display())
        }
    }
}
