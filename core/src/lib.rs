//! # REMS Core
//!
//! Domain ledger for a single-tenant real-estate sales office: projects,
//! blocks and plots; clients; bookings with installment payment plans;
//! and supporting documents.
//!
//! ## Core Concepts
//!
//! - **[`Ledger`]**: the single aggregate owning the whole entity graph;
//!   every operation mutates it synchronously and returns a result
//! - **Installment schedule**: a pure function reconciling cumulative
//!   payments against a theoretical due schedule ([`schedule`])
//! - **[`Snapshot`]**: the complete serialized state, handed to a
//!   [`SnapshotStore`] after each mutation by the runtime store
//! - **[`Clock`]**: injected time, so booking dates and schedules are
//!   deterministic under test
//!
//! ## Architecture Principles
//!
//! - One aggregate, one mutation boundary: fields are private, invariants
//!   (referential integrity, cascade closure, cnic uniqueness) are
//!   enforced centrally
//! - Expected failures are error values ([`LedgerError`]), never panics
//! - Storage is an opaque collaborator behind a trait; the domain core
//!   has no I/O
//!
//! ## Example
//!
//! ```
//! use rems_core::environment::LedgerEnvironment;
//! use rems_core::ledger::Ledger;
//! use rems_core::types::{NewBlock, NewBooking, NewClient};
//!
//! # fn main() -> Result<(), rems_core::error::LedgerError> {
//! let env = LedgerEnvironment::default();
//! let mut ledger = Ledger::new();
//!
//! let project = ledger.create_project(&env, "Green Valley");
//! let block = ledger.create_block(project.id, NewBlock {
//!     name: "A".to_string(),
//!     plot_prefix: "P".to_string(),
//!     plot_count: 3,
//!     plot_size: "5 Marla".to_string(),
//!     price: 500_000.0,
//! })?;
//!
//! let client = ledger.add_client(NewClient {
//!     name: "Ali Raza".to_string(),
//!     cnic: "35202-1234567-1".to_string(),
//!     phone: "0300-1234567".to_string(),
//!     address: "Lahore".to_string(),
//! });
//!
//! let booking = ledger.create_booking(&env, NewBooking {
//!     client_id: client.id,
//!     plot_id: block.plots[0].id,
//!     total_amount: 500_000.0,
//!     advance_amount: 100_000.0,
//!     months: 10,
//!     payment_method: None,
//! })?;
//!
//! assert_eq!(ledger.outstanding_balance(booking.id)?, 400_000.0);
//! # Ok(())
//! # }
//! ```

/// Booking ledger operations (booking creation, payments, transfers)
pub mod bookings;
/// Client registry operations
pub mod clients;
/// Document store operations
pub mod documents;
/// Injected dependencies (the `Clock` trait)
pub mod environment;
/// Error types for ledger operations
pub mod error;
/// Inventory operations (projects, blocks, plots)
pub mod inventory;
/// The ledger aggregate
pub mod ledger;
/// Installment schedule computation
pub mod schedule;
/// Snapshot type and the persistence abstraction
pub mod snapshot;
/// Domain entity types
pub mod types;

pub use environment::{Clock, LedgerEnvironment, SystemClock};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use schedule::{RowLabel, ScheduleRow};
pub use snapshot::{Snapshot, SnapshotError, SnapshotStore};
