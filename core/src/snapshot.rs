//! Snapshot type and the persistence abstraction.
//!
//! A [`Snapshot`] is the complete serialized state of the office:
//! inventory, clients, bookings, transactions, documents, plus the
//! company details and user accounts the surrounding UI owns. The ledger
//! produces and consumes whole snapshots; no partial update is defined.
//!
//! The [`SnapshotStore`] trait is the boundary to the durable store. The
//! production implementation lives in `rems-persistence`
//! (`JsonSnapshotStore`); `rems-testing` provides an in-memory one for
//! fast, deterministic tests.

use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Format version written into every snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// The complete serialized state of all entities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,
    /// The full entity graph
    pub ledger: Ledger,
}

impl Snapshot {
    /// Wraps a ledger into a current-version snapshot
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ledger,
        }
    }
}

impl Ledger {
    /// Produces a snapshot of the current state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.clone())
    }

    /// Rebuilds a ledger from a snapshot
    #[must_use]
    pub fn restore(snapshot: Snapshot) -> Self {
        snapshot.ledger
    }
}

/// Errors that can occur while loading or saving snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Underlying storage failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Snapshot could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Boxed future alias for [`SnapshotStore`] methods
pub type SnapshotFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, SnapshotError>> + Send + 'a>>;

/// Durable storage for snapshots.
///
/// The store is deliberately opaque: it takes and returns whole
/// snapshots and nothing else. Saving after every mutation is the
/// caller's job (see `LedgerStore` in `rems-runtime`); the ledger itself
/// never talks to storage.
///
/// Methods return explicit `Pin<Box<dyn Future>>` instead of `async fn`
/// so the trait stays object-safe (`Arc<dyn SnapshotStore>`).
pub trait SnapshotStore: Send + Sync {
    /// Loads the most recent snapshot, or `None` if nothing was ever
    /// saved.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the store is unreadable or holds a
    /// corrupt snapshot.
    fn load(&self) -> SnapshotFuture<'_, Option<Snapshot>>;

    /// Durably stores a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the snapshot could not be written.
    fn save(&self, snapshot: Snapshot) -> SnapshotFuture<'_, ()>;
}
