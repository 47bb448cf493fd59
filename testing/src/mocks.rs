//! Mock implementations of environment and persistence traits.

use chrono::{DateTime, TimeZone, Utc};
use rems_core::environment::Clock;
use rems_core::snapshot::{Snapshot, SnapshotError, SnapshotFuture, SnapshotStore};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making booking dates and schedules
/// reproducible.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// Creates a clock pinned to midnight UTC of the given date
    ///
    /// # Panics
    ///
    /// Panics if the date is invalid (test-only convenience).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self::new(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// In-memory snapshot store that records every save
///
/// Useful for asserting that the runtime persists after each mutation
/// without touching the filesystem. Can be switched into a failing mode
/// to exercise the fire-and-forget save path.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    current: Mutex<Option<Snapshot>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemorySnapshotStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a snapshot, as if a previous
    /// session had saved it
    #[must_use]
    pub fn seeded(snapshot: Snapshot) -> Self {
        Self {
            current: Mutex::new(Some(snapshot)),
            save_count: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Number of completed saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// The most recently saved snapshot, if any
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only convenience).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn last_saved(&self) -> Option<Snapshot> {
        self.current.lock().unwrap().clone()
    }

    /// Makes every subsequent `save` fail with a storage error
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> SnapshotFuture<'_, Option<Snapshot>> {
        Box::pin(async move {
            let guard = self
                .current
                .lock()
                .map_err(|e| SnapshotError::Storage(e.to_string()))?;
            Ok(guard.clone())
        })
    }

    fn save(&self, snapshot: Snapshot) -> SnapshotFuture<'_, ()> {
        Box::pin(async move {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(SnapshotError::Storage("simulated save failure".to_string()));
            }
            let mut guard = self
                .current
                .lock()
                .map_err(|e| SnapshotError::Storage(e.to_string()))?;
            *guard = Some(snapshot);
            self.save_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
