//! Domain types for the REMS ledger.
//!
//! Entities are plain data: projects own blocks, blocks own plots, and
//! clients, bookings, transactions and documents live in flat collections
//! keyed by surrogate ids. All behavior lives on the [`Ledger`]
//! aggregate.
//!
//! [`Ledger`]: crate::ledger::Ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed entity id newtype.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from a UUID
            #[must_use]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the inner UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a project
    ProjectId
);
entity_id!(
    /// Unique identifier for a block within a project
    BlockId
);
entity_id!(
    /// Unique identifier for a plot
    ///
    /// Plot ids are independent surrogates; the plot's position in the
    /// inventory tree is carried by its `project_id` and `block_id`
    /// foreign keys, never by the id itself.
    PlotId
);
entity_id!(
    /// Unique identifier for a client
    ClientId
);
entity_id!(
    /// Unique identifier for a booking
    BookingId
);
entity_id!(
    /// Unique identifier for a payment transaction
    TransactionId
);
entity_id!(
    /// Unique identifier for an attached document
    DocumentId
);

/// Sale status of a plot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    /// Open inventory, can be booked
    Available,
    /// Committed to a client through an active booking
    Booked,
    /// Fully paid and handed over
    ///
    /// Defined for completeness; no ledger operation currently performs
    /// the `Booked -> Sold` transition.
    Sold,
}

/// Status of a booking
///
/// Set at creation; the ledger defines no further transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Booking is live
    Active,
}

/// Kind of a payment transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Initial payment made at booking time
    Advance,
    /// Any subsequent payment against the booking
    Installment,
}

/// How a payment was made
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash payment
    #[default]
    Cash,
    /// Bank transfer
    Bank,
    /// Cheque
    Cheque,
    /// Online payment
    Online,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Cheque => "cheque",
            Self::Online => "online",
        };
        f.write_str(label)
    }
}

/// A housing project, the root of the inventory tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// When the project was created
    pub created_at: DateTime<Utc>,
    /// Blocks in creation order
    pub blocks: Vec<Block>,
}

/// A named subdivision of a project containing plots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier
    pub id: BlockId,
    /// Display name, e.g. `"A"`
    pub name: String,
    /// Plots in numbering order
    pub plots: Vec<Plot>,
}

/// The smallest sellable inventory unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Unique identifier, immutable once assigned
    pub id: PlotId,
    /// Project this plot belongs to
    pub project_id: ProjectId,
    /// Block this plot belongs to
    pub block_id: BlockId,
    /// Human-facing number, e.g. `"P-3"`
    pub number: String,
    /// Size label, e.g. `"5 Marla"`
    pub size: String,
    /// Asking price
    pub price: f64,
    /// Sale status
    pub status: PlotStatus,
    /// Client the plot is currently booked for, if any
    pub booked_by: Option<ClientId>,
}

/// A client of the sales office
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (generated surrogate)
    pub id: ClientId,
    /// Full name
    pub name: String,
    /// National identity number; the natural uniqueness key
    pub cnic: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
}

/// Data for registering a client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Full name
    pub name: String,
    /// National identity number
    pub cnic: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
}

/// A client's commitment to purchase a plot under a payment plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Purchasing client
    pub client_id: ClientId,
    /// Plot under purchase
    pub plot_id: PlotId,
    /// When the booking was made
    pub date: DateTime<Utc>,
    /// Full sale price agreed for the plot
    pub total_amount: f64,
    /// Payment made up front at booking time
    pub advance_amount: f64,
    /// Number of monthly installments after the advance
    pub months: u32,
    /// Method of the advance payment
    pub payment_method: PaymentMethod,
    /// Booking status
    pub status: BookingStatus,
}

/// Data for creating a booking
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    /// Purchasing client
    pub client_id: ClientId,
    /// Plot to book; must currently be [`PlotStatus::Available`]
    pub plot_id: PlotId,
    /// Full sale price
    pub total_amount: f64,
    /// Up-front payment; must lie in `[0, total_amount]`
    pub advance_amount: f64,
    /// Number of monthly installments; must be at least 1
    pub months: u32,
    /// Method of the advance payment; defaults to cash
    pub payment_method: Option<PaymentMethod>,
}

/// A single payment event against a booking
///
/// Transactions are append-only: created once, never mutated, and only
/// removed when a cascade delete removes their booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Booking this payment belongs to
    pub booking_id: BookingId,
    /// Amount paid
    pub amount: f64,
    /// Advance or installment
    pub kind: TransactionKind,
    /// How the payment was made
    pub method: PaymentMethod,
    /// When the payment was received
    pub date: DateTime<Utc>,
}

/// Data for recording an installment payment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Booking to pay against
    pub booking_id: BookingId,
    /// Amount paid; must be positive and not exceed the outstanding balance
    pub amount: f64,
    /// How the payment was made
    pub method: PaymentMethod,
}

/// A supporting document attached to a plot
///
/// Documents live independently of the booking lifecycle; they are only
/// removed explicitly or when their plot is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Plot the document is attached to
    pub plot_id: PlotId,
    /// Original file name
    pub filename: String,
    /// Opaque reference to the stored content (e.g. a data URL or object key)
    pub content_ref: String,
    /// When the document was attached
    pub uploaded_at: DateTime<Utc>,
}

/// Role of an office user account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Office owner
    Ceo,
    /// Accounts staff
    Accountant,
}

/// An office user account
///
/// Carried through the snapshot for the surrounding UI; the ledger
/// performs no authentication itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stable account id, e.g. `"ceo"`
    pub id: String,
    /// Display name
    pub name: String,
    /// Account role
    pub role: UserRole,
    /// Login password (plain text, as the surrounding UI stores it)
    pub password: String,
}

/// Company details shown on receipts and reports
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    /// Company name
    pub name: String,
    /// Logo reference (e.g. a data URL)
    pub logo: Option<String>,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
}

/// Parameters for creating a block of plots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBlock {
    /// Block display name
    pub name: String,
    /// Prefix for plot numbering, e.g. `"P"` yields `P-1..P-n`
    pub plot_prefix: String,
    /// Number of plots to generate
    pub plot_count: u32,
    /// Size label applied to every generated plot
    pub plot_size: String,
    /// Price applied to every generated plot
    pub price: f64,
}

/// Aggregate figures for the office dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Number of projects
    pub total_projects: usize,
    /// Number of registered clients
    pub total_clients: usize,
    /// Sum of all recorded payments
    pub total_collected: f64,
    /// Sum of outstanding balances across all bookings
    pub total_pending: f64,
}
