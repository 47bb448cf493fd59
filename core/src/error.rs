//! Error types for ledger operations.
//!
//! Everything here is recoverable: operations return these as values so
//! the caller can display a message and continue. Broken internal
//! invariants (e.g. a booking pointing at a plot that no longer exists)
//! are programmer errors and are checked with `debug_assert!` instead.

use crate::types::{BookingId, ClientId, PlotId};
use thiserror::Error;

/// Errors returned by ledger operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity, e.g. `"plot"`
        entity: &'static str,
        /// Id that failed to resolve
        id: String,
    },

    /// The plot is already booked or sold
    #[error("plot {id} is not available for booking")]
    PlotNotAvailable {
        /// The contested plot
        id: PlotId,
    },

    /// The client is still referenced by at least one booking
    #[error("client {id} has active bookings and cannot be deleted")]
    ClientHasBookings {
        /// The referenced client
        id: ClientId,
    },

    /// A payment amount failed validation
    #[error("invalid payment of {amount} against booking {booking_id}: {reason}")]
    InvalidPayment {
        /// Booking the payment was aimed at
        booking_id: BookingId,
        /// Rejected amount
        amount: f64,
        /// Why the amount was rejected
        reason: String,
    },

    /// A request field failed validation
    #[error("validation error: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Builds a [`LedgerError::NotFound`] for an entity kind and id
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience result alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
