use clap::Parser;
use grdc_converter::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("GRDC Converter - river gauge metadata and discharge series");
    println!("==========================================================");
    println!();
    println!("Convert GRDC gauge catalogs and WaterML 2.0 monthly discharge documents");
    println!("into typed tables, compressed snapshots and CSV files.");
    println!();
    println!("USAGE:");
    println!("    grdc-converter <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    catalog     Build the gauge catalog from a feature-collection file");
    println!("    convert     Parse a directory of WaterML documents into a snapshot");
    println!("    show        Summarize a snapshot or print one series");
    println!("    export      Export one series or the gauge catalog to CSV");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -c, --config     Path to configuration file (TOML format)");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a directory of monthly discharge documents:");
    println!("    grdc-converter convert --input ./wml --catalog stationbasins.geojson \\");
    println!("                           --snapshot grdc.snap");
    println!();
    println!("    # Print one series as CSV:");
    println!("    grdc-converter show --snapshot grdc.snap --id 2316200 --format csv");
    println!();
    println!("    # Export the gauge catalog:");
    println!("    grdc-converter export --snapshot grdc.snap --gauges --output gauges.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    grdc-converter <COMMAND> --help");
}
