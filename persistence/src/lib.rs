//! # REMS Persistence
//!
//! Durable snapshot storage for the REMS domain ledger.
//!
//! The ledger treats storage as an opaque collaborator behind the
//! [`SnapshotStore`] trait (defined in `rems-core`); this crate provides
//! the production implementation, [`JsonSnapshotStore`], which keeps the
//! whole office state in a single JSON file. The dataset of a one-office
//! tool is small enough that rewriting the full file on every mutation is
//! the simplest durable design.
//!
//! Writes go to a temporary sibling file first and are renamed into
//! place, so a crash mid-save never leaves a truncated snapshot behind.

use rems_core::snapshot::{Snapshot, SnapshotError, SnapshotFuture, SnapshotStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a single JSON file.
///
/// `load` returns `Ok(None)` when the file does not exist yet, which the
/// runtime treats as a fresh office.
#[derive(Clone, Debug)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Creates a store writing to the given file path
    ///
    /// The parent directory must exist; the file itself need not.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary sibling used for atomic replacement
    fn staging_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> SnapshotFuture<'_, Option<Snapshot>> {
        Box::pin(async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %self.path.display(), "no snapshot file yet");
                    return Ok(None);
                }
                Err(e) => return Err(SnapshotError::Storage(e.to_string())),
            };

            let snapshot: Snapshot = serde_json::from_slice(&bytes)
                .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
            tracing::debug!(path = %self.path.display(), "snapshot loaded");
            Ok(Some(snapshot))
        })
    }

    fn save(&self, snapshot: Snapshot) -> SnapshotFuture<'_, ()> {
        Box::pin(async move {
            let bytes = serde_json::to_vec_pretty(&snapshot)
                .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

            let staging = self.staging_path();
            tokio::fs::write(&staging, &bytes)
                .await
                .map_err(|e| SnapshotError::Storage(e.to_string()))?;
            tokio::fs::rename(&staging, &self.path)
                .await
                .map_err(|e| SnapshotError::Storage(e.to_string()))?;

            tracing::debug!(
                path = %self.path.display(),
                bytes = bytes.len(),
                "snapshot saved"
            );
            Ok(())
        })
    }
}
