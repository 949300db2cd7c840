//! Tests for snapshot save and load

use super::populated_store;
use crate::Error;
use crate::app::services::series_store::DischargeSeriesStore;
use crate::config::ConverterConfig;
use crate::constants::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_round_trip_preserves_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");
    let store = populated_store();

    store.save(&path).unwrap();
    let restored = DischargeSeriesStore::try_load(&path, ConverterConfig::default()).unwrap();

    assert_eq!(restored, store);
    let kerki = restored.get_series("2316200").unwrap();
    assert_eq!(kerki.records()[0].discharge, Some(120.5));
    assert!(kerki.records()[1].is_missing());
}

#[test]
fn test_round_trip_without_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.grdc");

    DischargeSeriesStore::new().save(&path).unwrap();
    let restored = DischargeSeriesStore::load(&path, ConverterConfig::default()).unwrap();
    assert!(restored.catalog().is_none());
    assert!(restored.is_empty());
}

#[test]
fn test_save_overwrites_existing_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");

    populated_store().save(&path).unwrap();
    DischargeSeriesStore::new().save(&path).unwrap();

    let restored = DischargeSeriesStore::try_load(&path, ConverterConfig::default()).unwrap();
    assert!(restored.is_empty());
}

#[test]
fn test_snapshot_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");
    populated_store().save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(SNAPSHOT_MAGIC));
    assert_eq!(&bytes[8..10], &SNAPSHOT_VERSION.to_le_bytes());
}

#[test]
fn test_load_missing_file() {
    let path = std::path::Path::new("/nonexistent/store.grdc");
    assert!(DischargeSeriesStore::load(path, ConverterConfig::default()).is_none());
    assert!(matches!(
        DischargeSeriesStore::try_load(path, ConverterConfig::default()),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_load_rejects_foreign_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("not-a-snapshot");
    fs::write(&path, b"{\"series\": {}}").unwrap();

    let result = DischargeSeriesStore::try_load(&path, ConverterConfig::default());
    assert!(matches!(result, Err(Error::SnapshotFormat { .. })));
    assert!(DischargeSeriesStore::load(&path, ConverterConfig::default()).is_none());
}

#[test]
fn test_load_rejects_truncated_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short.grdc");
    fs::write(&path, b"GRDCSN").unwrap();

    let result = DischargeSeriesStore::try_load(&path, ConverterConfig::default());
    assert!(matches!(result, Err(Error::SnapshotFormat { .. })));
}

#[test]
fn test_load_rejects_other_version() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");
    populated_store().save(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[8..10].copy_from_slice(&99u16.to_le_bytes());
    fs::write(&path, &bytes).unwrap();

    match DischargeSeriesStore::try_load(&path, ConverterConfig::default()) {
        Err(Error::SnapshotVersion { found, expected }) => {
            assert_eq!(found, 99);
            assert_eq!(expected, SNAPSHOT_VERSION);
        }
        other => panic!("expected version error, got {other:?}"),
    }
}

#[test]
fn test_load_rejects_corrupt_payload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");
    let mut bytes = SNAPSHOT_MAGIC.to_vec();
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(b"not gzip at all");
    fs::write(&path, &bytes).unwrap();

    let result = DischargeSeriesStore::try_load(&path, ConverterConfig::default());
    assert!(matches!(result, Err(Error::SnapshotFormat { .. })));
}

#[test]
fn test_loaded_store_uses_supplied_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.grdc");
    populated_store().save(&path).unwrap();

    let config = ConverterConfig::default().with_separator(';');
    let restored = DischargeSeriesStore::try_load(&path, config).unwrap();
    assert_eq!(restored.config().csv_separator, ';');
}
