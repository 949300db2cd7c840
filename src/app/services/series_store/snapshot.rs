//! Versioned binary snapshots of the store
//!
//! Layout: the 8-byte magic `GRDCSNAP`, a little-endian `u16` format version,
//! then a gzip-compressed JSON payload holding the catalog and every series.
//! Only the catalog and series are persisted; configuration is supplied again
//! when a snapshot is loaded.

use super::DischargeSeriesStore;
use crate::app::models::{DischargeSeries, GaugeCatalog};
use crate::config::ConverterConfig;
use crate::constants::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use crate::{Error, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + std::mem::size_of::<u16>();

#[derive(Serialize)]
struct SnapshotRef<'a> {
    catalog: Option<&'a GaugeCatalog>,
    series: &'a BTreeMap<String, DischargeSeries>,
}

#[derive(Deserialize)]
struct SnapshotPayload {
    catalog: Option<GaugeCatalog>,
    series: BTreeMap<String, DischargeSeries>,
}

impl DischargeSeriesStore {
    /// Write the store to `path`
    ///
    /// The snapshot is written to a temporary file next to `path` and renamed
    /// into place, so an existing snapshot is never left half-written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_snapshot()?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| {
            Error::io(format!("Failed to create temporary file in {}", parent.display()), e)
        })?;
        temp.write_all(&bytes).map_err(|e| Error::io("Failed to write snapshot", e))?;
        temp.persist(path).map_err(|e| {
            Error::io(format!("Failed to persist snapshot {}", path.display()), e.error)
        })?;

        info!(
            "Saved snapshot with {} series to {} ({} bytes)",
            self.series.len(),
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    /// Restore a store from `path`, or `None` if it cannot be read
    ///
    /// Failures are logged; use [`DischargeSeriesStore::try_load`] to inspect
    /// the error.
    pub fn load(path: &Path, config: ConverterConfig) -> Option<Self> {
        match Self::try_load(path, config) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Could not load snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Restore a store from `path`
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::SnapshotFormat` if the file is not a snapshot or its payload is corrupt
    /// * Returns `Error::SnapshotVersion` for an unsupported format version
    pub fn try_load(path: &Path, config: ConverterConfig) -> Result<Self> {
        let bytes = fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read snapshot {}", path.display()), e))?;

        let payload = decode_snapshot(&bytes)?;

        let mut store = Self::with_config(config);
        store.catalog = payload.catalog;
        store.series = payload.series;

        debug!(
            "Loaded snapshot {} with {} series",
            path.display(),
            store.series.len()
        );
        Ok(store)
    }

    fn encode_snapshot(&self) -> Result<Vec<u8>> {
        let payload = SnapshotRef {
            catalog: self.catalog.as_ref(),
            series: &self.series,
        };

        let mut bytes = Vec::with_capacity(HEADER_LEN);
        bytes.extend_from_slice(SNAPSHOT_MAGIC);
        bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());

        let mut encoder = GzEncoder::new(bytes, Compression::default());
        serde_json::to_writer(&mut encoder, &payload)
            .map_err(|e| Error::snapshot_format(format!("Failed to encode payload: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| Error::io("Failed to compress snapshot", e))
    }
}

fn decode_snapshot(bytes: &[u8]) -> Result<SnapshotPayload> {
    if bytes.len() < HEADER_LEN || !bytes.starts_with(SNAPSHOT_MAGIC) {
        return Err(Error::snapshot_format("missing snapshot header"));
    }

    let version = u16::from_le_bytes([
        bytes[SNAPSHOT_MAGIC.len()],
        bytes[SNAPSHOT_MAGIC.len() + 1],
    ]);
    if version != SNAPSHOT_VERSION {
        return Err(Error::SnapshotVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let mut json = Vec::new();
    GzDecoder::new(&bytes[HEADER_LEN..])
        .read_to_end(&mut json)
        .map_err(|e| Error::snapshot_format(format!("corrupt payload: {}", e)))?;

    serde_json::from_slice(&json)
        .map_err(|e| Error::snapshot_format(format!("invalid payload: {}", e)))
}
