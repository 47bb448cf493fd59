//! # REMS Testing
//!
//! Testing utilities for the REMS ledger:
//!
//! - Mock implementations of the environment and persistence traits
//!   ([`mocks::FixedClock`], [`mocks::InMemorySnapshotStore`])
//! - Fixture builders for a pre-populated ledger ([`fixtures`])
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rems_core::environment::LedgerEnvironment;
//! use rems_testing::mocks::FixedClock;
//!
//! let clock = FixedClock::at(2024, 1, 15);
//! let env = LedgerEnvironment::new(Arc::new(clock));
//! assert_eq!(env.now().to_rfc3339(), "2024-01-15T00:00:00+00:00");
//! ```

/// Fixture builders for tests
pub mod fixtures;
/// Mock implementations for testing
pub mod mocks;
