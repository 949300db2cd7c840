//! Shared components for CLI commands

use crate::cli::args::Args;
use crate::config::ConverterConfig;
use crate::DischargeSeriesStore;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Set up structured logging based on CLI arguments
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grdc_converter={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration from `--config`, the default location, or defaults
pub fn load_configuration(args: &Args) -> Result<ConverterConfig> {
    let config = ConverterConfig::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    Ok(config)
}

/// Restore a snapshot, reporting why it could not be read
pub fn open_snapshot(path: &Path, config: ConverterConfig) -> Result<DischargeSeriesStore> {
    DischargeSeriesStore::try_load(path, config)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Format an optional discharge for display; missing values show as `NaN`
pub fn format_discharge(discharge: Option<f64>) -> String {
    match discharge {
        Some(value) => format!("{}", value),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_discharge() {
        assert_eq!(format_discharge(Some(120.5)), "120.5");
        assert_eq!(format_discharge(None), "NaN");
    }
}
