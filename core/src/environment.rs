//! Injected dependencies for ledger operations.
//!
//! The only external dependency the domain core has is time. Abstracting
//! it behind [`Clock`] keeps booking dates and schedules deterministic
//! under test.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Environment dependencies for the ledger
#[derive(Clone)]
pub struct LedgerEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
}

impl LedgerEnvironment {
    /// Creates a new `LedgerEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Current time according to the injected clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl Default for LedgerEnvironment {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for LedgerEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerEnvironment").finish_non_exhaustive()
    }
}
