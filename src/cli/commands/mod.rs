//! Command implementations for the GRDC converter CLI
//!
//! Each subcommand lives in its own module:
//! - `catalog`: build and print or export the gauge catalog
//! - `convert`: parse a directory of documents into a snapshot
//! - `show`: summarize a snapshot or print one series
//! - `export`: write one series or the catalog from a snapshot to CSV

pub mod catalog;
pub mod convert;
pub mod export;
pub mod show;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tracing::debug;

/// Main command runner
///
/// Sets up logging, loads the layered configuration and dispatches to the
/// selected subcommand.
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args);
    let config = shared::load_configuration(&args)?;
    debug!("Effective configuration: {:?}", config);

    let Some(command) = args.command else {
        anyhow::bail!("No command given. Run with --help to see available commands.");
    };

    match command {
        Commands::Catalog(catalog_args) => catalog::run_catalog(catalog_args, &config),
        Commands::Convert(convert_args) => convert::run_convert(convert_args, config, args.quiet),
        Commands::Show(show_args) => show::run_show(show_args, config),
        Commands::Export(export_args) => export::run_export(export_args, config),
    }
}
