//! The ledger aggregate.
//!
//! [`Ledger`] owns the entire entity graph. All mutation goes through the
//! operation methods defined in the [`inventory`], [`clients`],
//! [`bookings`] and [`documents`] modules; fields are private so
//! referential integrity is enforced in exactly one place.
//!
//! [`inventory`]: crate::inventory
//! [`clients`]: crate::clients
//! [`bookings`]: crate::bookings
//! [`documents`]: crate::documents

use crate::types::{
    Booking, BookingId, Client, ClientId, CompanyDetails, Document, LedgerStats, Plot, PlotId,
    Project, Transaction, UserAccount, UserRole,
};
use serde::{Deserialize, Serialize};

/// The complete domain state of the sales office
///
/// Projects nest their blocks and plots; clients, bookings, transactions
/// and documents are flat, insertion-ordered collections referencing each
/// other by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub(crate) company: Option<CompanyDetails>,
    pub(crate) users: Vec<UserAccount>,
    pub(crate) projects: Vec<Project>,
    pub(crate) clients: Vec<Client>,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) documents: Vec<Document>,
}

impl Default for Ledger {
    /// An empty ledger with the two stock office accounts
    fn default() -> Self {
        Self {
            company: None,
            users: vec![
                UserAccount {
                    id: "ceo".to_string(),
                    name: "CEO".to_string(),
                    role: UserRole::Ceo,
                    password: "1234".to_string(),
                },
                UserAccount {
                    id: "acc".to_string(),
                    name: "Accountant".to_string(),
                    role: UserRole::Accountant,
                    password: "1234".to_string(),
                },
            ],
            projects: Vec::new(),
            clients: Vec::new(),
            bookings: Vec::new(),
            transactions: Vec::new(),
            documents: Vec::new(),
        }
    }
}

impl Ledger {
    /// Creates an empty ledger with default user accounts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Read accessors ==========

    /// All projects in creation order
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// All registered clients in registration order
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// All bookings in creation order
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// All transactions in insertion order
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All documents in attachment order
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Office user accounts
    #[must_use]
    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    /// Company details, if set
    #[must_use]
    pub const fn company(&self) -> Option<&CompanyDetails> {
        self.company.as_ref()
    }

    /// Sets the company details shown on receipts and reports
    pub fn set_company_details(&mut self, details: CompanyDetails) {
        self.company = Some(details);
    }

    /// Looks up a client by id
    #[must_use]
    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Looks up a booking by id
    #[must_use]
    pub fn booking(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Finds the live booking for a plot, if any
    #[must_use]
    pub fn booking_for_plot(&self, plot_id: PlotId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.plot_id == plot_id)
    }

    /// Finds a plot anywhere in the inventory tree
    #[must_use]
    pub fn find_plot(&self, id: PlotId) -> Option<&Plot> {
        self.all_plots().find(|p| p.id == id)
    }

    /// Transactions belonging to a booking, in insertion order
    pub fn transactions_for(&self, booking_id: BookingId) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| t.booking_id == booking_id)
    }

    /// Sum of all payments recorded against a booking
    ///
    /// This is the authoritative "paid" figure; it is never stored on the
    /// booking itself.
    #[must_use]
    pub fn paid_total(&self, booking_id: BookingId) -> f64 {
        self.transactions_for(booking_id).map(|t| t.amount).sum()
    }

    /// Aggregate figures for the dashboard
    #[must_use]
    pub fn stats(&self) -> LedgerStats {
        let total_collected = self.transactions.iter().map(|t| t.amount).sum();
        let total_pending = self
            .bookings
            .iter()
            .map(|b| b.total_amount - self.paid_total(b.id))
            .sum();

        LedgerStats {
            total_projects: self.projects.len(),
            total_clients: self.clients.len(),
            total_collected,
            total_pending,
        }
    }

    // ========== Internal helpers ==========

    /// Iterates every plot in the inventory tree
    pub(crate) fn all_plots(&self) -> impl Iterator<Item = &Plot> {
        self.projects
            .iter()
            .flat_map(|p| p.blocks.iter())
            .flat_map(|b| b.plots.iter())
    }

    /// Mutable lookup of a plot anywhere in the inventory tree
    pub(crate) fn find_plot_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.projects
            .iter_mut()
            .flat_map(|p| p.blocks.iter_mut())
            .flat_map(|b| b.plots.iter_mut())
            .find(|p| p.id == id)
    }

    /// Mutable lookup of a booking by id
    pub(crate) fn booking_mut(&mut self, id: BookingId) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == id)
    }

    /// Removes every booking, transaction and document that references
    /// one of the given plots.
    ///
    /// This is the cascade shared by all inventory deletes; the plots
    /// themselves are removed by the caller.
    pub(crate) fn purge_plot_references(&mut self, plot_ids: &[PlotId]) {
        let removed_bookings: Vec<BookingId> = self
            .bookings
            .iter()
            .filter(|b| plot_ids.contains(&b.plot_id))
            .map(|b| b.id)
            .collect();

        self.bookings.retain(|b| !plot_ids.contains(&b.plot_id));
        self.transactions
            .retain(|t| !removed_bookings.contains(&t.booking_id));
        self.documents.retain(|d| !plot_ids.contains(&d.plot_id));
    }
}
