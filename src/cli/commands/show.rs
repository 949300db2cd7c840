//! Show command: summarize a snapshot or print one series

use super::shared::{format_discharge, open_snapshot};
use crate::DischargeSeriesStore;
use crate::app::models::DischargeSeries;
use crate::app::services::series_store::export::write_csv;
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::ConverterConfig;
use anyhow::{Context, Result};
use colored::*;
use serde_json::json;

/// Run the show command
pub fn run_show(args: ShowArgs, config: ConverterConfig) -> Result<()> {
    let separator = config.separator_byte()?;
    let store = open_snapshot(&args.snapshot, config)?;

    match &args.id {
        Some(id) => {
            let series = store
                .get_series(id)
                .with_context(|| format!("No series for gauge {}", id))?;
            match args.output_format {
                OutputFormat::Human => print_series_human(&store, id, series),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(series)?);
                }
                OutputFormat::Csv => {
                    write_csv(series.to_dataframe()?, &mut std::io::stdout().lock(), separator)?;
                }
            }
        }
        None => match args.output_format {
            OutputFormat::Human => print_summary_human(&args, &store),
            OutputFormat::Json => print_summary_json(&store)?,
            OutputFormat::Csv => print_summary_csv(&store),
        },
    }

    Ok(())
}

fn print_series_human(store: &DischargeSeriesStore, id: &str, series: &DischargeSeries) {
    let heading = match store.gauge_for_reference(id) {
        Some(gauge) => format!("{} ({}, {})", id, gauge.station, gauge.river),
        None => id.to_string(),
    };
    println!("{}", heading.bright_green().bold());
    println!(
        "  {} records, {} missing",
        series.len(),
        series.missing_count()
    );

    for record in series {
        let value = format_discharge(record.discharge);
        let value = if record.is_missing() {
            value.bright_black()
        } else {
            value.normal()
        };
        println!("  {:04}-{:02}  {}", record.year, record.month, value);
    }
}

fn print_summary_human(args: &ShowArgs, store: &DischargeSeriesStore) {
    println!(
        "{} {}",
        "Snapshot".bright_green().bold(),
        args.snapshot.display()
    );
    match store.catalog() {
        Some(catalog) => println!("  Catalog: {} gauges", catalog.len()),
        None => println!("  Catalog: {}", "not built".bright_black()),
    }
    println!(
        "  Series: {} ({} records)",
        store.len(),
        store.record_count()
    );
    println!();

    for (reference, series) in store.iter() {
        let span = match series.span() {
            Some(((y0, m0), (y1, m1))) => format!("{:04}-{:02}..{:04}-{:02}", y0, m0, y1, m1),
            None => "empty".to_string(),
        };
        let station = store
            .gauge_for_reference(reference)
            .map(|gauge| gauge.station.clone())
            .unwrap_or_default();
        println!(
            "  {}  {:>5} records  {}  {}",
            reference.bright_yellow(),
            series.len(),
            span,
            station.bright_cyan()
        );
    }
}

fn print_summary_json(store: &DischargeSeriesStore) -> Result<()> {
    let series: Vec<_> = store
        .iter()
        .map(|(reference, series)| {
            let gauge = store.gauge_for_reference(reference);
            json!({
                "reference": reference,
                "records": series.len(),
                "missing": series.missing_count(),
                "river": gauge.map(|g| g.river.as_str()),
                "station": gauge.map(|g| g.station.as_str()),
            })
        })
        .collect();

    let report = json!({
        "gauges": store.catalog().map(|c| c.len()),
        "series_count": store.len(),
        "record_count": store.record_count(),
        "series": series,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_summary_csv(store: &DischargeSeriesStore) {
    println!("reference,records,missing,river,station");
    for (reference, series) in store.iter() {
        let (river, station) = store
            .gauge_for_reference(reference)
            .map(|g| (csv_escape(&g.river), csv_escape(&g.station)))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{}",
            csv_escape(reference),
            series.len(),
            series.missing_count(),
            river,
            station
        );
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
