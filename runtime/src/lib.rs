//! # REMS Runtime
//!
//! The runtime store that fronts the domain ledger for the UI layer.
//!
//! ## Core Components
//!
//! - **[`LedgerStore`]**: wraps the [`Ledger`] behind a single
//!   reader-writer lock so external calls never interleave mid-mutation,
//!   and hands a full snapshot to the persistence collaborator after
//!   every successful mutation
//! - **[`StoreError`]**: domain errors plus the startup persistence error
//!
//! The save after each mutation is fire-and-forget: a failure is logged
//! at `warn` and the in-memory state stays authoritative for the rest of
//! the session. Only the initial `load` can fail the store.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rems_core::environment::LedgerEnvironment;
//! use rems_runtime::LedgerStore;
//! use rems_persistence::JsonSnapshotStore;
//!
//! # async fn example() -> Result<(), rems_runtime::StoreError> {
//! let store = LedgerStore::open(
//!     LedgerEnvironment::default(),
//!     Arc::new(JsonSnapshotStore::new("rems.json")),
//! )
//! .await?;
//!
//! let project = store.create_project("Green Valley").await;
//! let total = store.state(|ledger| ledger.projects().len()).await;
//! # Ok(())
//! # }
//! ```

use rems_core::environment::LedgerEnvironment;
use rems_core::error::LedgerError;
use rems_core::ledger::Ledger;
use rems_core::schedule::ScheduleRow;
use rems_core::snapshot::{SnapshotError, SnapshotStore};
use rems_core::types::{
    Block, BlockId, Booking, BookingId, Client, ClientId, CompanyDetails, Document, DocumentId,
    LedgerStats, NewBlock, NewBooking, NewClient, PaymentRequest, PlotId, Project, ProjectId,
    Transaction,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by the runtime store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain operation was rejected
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The snapshot store failed while loading at startup
    #[error("failed to load snapshot: {0}")]
    Load(#[source] SnapshotError),
}

/// The single mutual-exclusion boundary around the ledger.
///
/// Every mutating call takes the write lock, runs the domain operation
/// to completion, saves a snapshot, and only then releases the lock, so
/// the entity graph is internally consistent at every observation point.
/// Reads share the read lock.
pub struct LedgerStore {
    ledger: RwLock<Ledger>,
    env: LedgerEnvironment,
    snapshots: Arc<dyn SnapshotStore>,
}

impl LedgerStore {
    /// Opens the store, loading the previous session's snapshot if one
    /// exists
    ///
    /// An absent snapshot yields a fresh ledger with the stock office
    /// accounts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the snapshot store is unreadable
    /// or holds a corrupt snapshot.
    pub async fn open(
        env: LedgerEnvironment,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Result<Self, StoreError> {
        let ledger = match snapshots.load().await.map_err(StoreError::Load)? {
            Some(snapshot) => {
                tracing::info!("restored ledger from snapshot");
                Ledger::restore(snapshot)
            }
            None => {
                tracing::info!("no snapshot found, starting with a fresh ledger");
                Ledger::new()
            }
        };

        Ok(Self {
            ledger: RwLock::new(ledger),
            env,
            snapshots,
        })
    }

    /// Reads from the ledger under the shared lock
    pub async fn state<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.ledger.read().await;
        f(&guard)
    }

    // ========== Inventory ==========

    /// Creates a project; see [`Ledger::create_project`]
    pub async fn create_project(&self, name: impl Into<String>) -> Project {
        let mut guard = self.ledger.write().await;
        let project = guard.create_project(&self.env, name);
        self.persist(&guard).await;
        project
    }

    /// Creates a block of plots; see [`Ledger::create_block`]
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] from the domain operation.
    pub async fn create_block(
        &self,
        project_id: ProjectId,
        spec: NewBlock,
    ) -> Result<Block, StoreError> {
        let mut guard = self.ledger.write().await;
        let block = guard.create_block(project_id, spec)?;
        self.persist(&guard).await;
        Ok(block)
    }

    /// Deletes a project and cascades; see [`Ledger::delete_project`]
    pub async fn delete_project(&self, project_id: ProjectId) {
        let mut guard = self.ledger.write().await;
        guard.delete_project(project_id);
        self.persist(&guard).await;
    }

    /// Deletes a block and cascades; see [`Ledger::delete_block`]
    pub async fn delete_block(&self, project_id: ProjectId, block_id: BlockId) {
        let mut guard = self.ledger.write().await;
        guard.delete_block(project_id, block_id);
        self.persist(&guard).await;
    }

    /// Deletes a plot and cascades; see [`Ledger::delete_plot`]
    pub async fn delete_plot(&self, project_id: ProjectId, block_id: BlockId, plot_id: PlotId) {
        let mut guard = self.ledger.write().await;
        guard.delete_plot(project_id, block_id, plot_id);
        self.persist(&guard).await;
    }

    // ========== Clients ==========

    /// Registers a client (idempotent on CNIC); see [`Ledger::add_client`]
    pub async fn add_client(&self, data: NewClient) -> Client {
        let mut guard = self.ledger.write().await;
        let client = guard.add_client(data);
        self.persist(&guard).await;
        client
    }

    /// Deletes a client; see [`Ledger::delete_client`]
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] from the domain operation.
    pub async fn delete_client(&self, client_id: ClientId) -> Result<(), StoreError> {
        let mut guard = self.ledger.write().await;
        guard.delete_client(client_id)?;
        self.persist(&guard).await;
        Ok(())
    }

    // ========== Bookings ==========

    /// Books a plot; see [`Ledger::create_booking`]
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] from the domain operation.
    pub async fn create_booking(&self, req: NewBooking) -> Result<Booking, StoreError> {
        let mut guard = self.ledger.write().await;
        let booking = guard.create_booking(&self.env, req)?;
        self.persist(&guard).await;
        Ok(booking)
    }

    /// Records an installment payment; see [`Ledger::record_payment`]
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] from the domain operation.
    pub async fn record_payment(&self, req: PaymentRequest) -> Result<Transaction, StoreError> {
        let mut guard = self.ledger.write().await;
        let tx = guard.record_payment(&self.env, req)?;
        self.persist(&guard).await;
        Ok(tx)
    }

    /// Transfers a booking to another client; see
    /// [`Ledger::transfer_ownership`]
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] from the domain operation.
    pub async fn transfer_ownership(
        &self,
        booking_id: BookingId,
        new_client_id: ClientId,
    ) -> Result<(), StoreError> {
        let mut guard = self.ledger.write().await;
        guard.transfer_ownership(booking_id, new_client_id)?;
        self.persist(&guard).await;
        Ok(())
    }

    /// Outstanding balance of a booking
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] if the booking does not exist.
    pub async fn outstanding_balance(&self, booking_id: BookingId) -> Result<f64, StoreError> {
        let guard = self.ledger.read().await;
        Ok(guard.outstanding_balance(booking_id)?)
    }

    /// Installment schedule of a booking
    ///
    /// # Errors
    ///
    /// Propagates [`LedgerError`] if the booking does not exist.
    pub async fn payment_schedule(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<ScheduleRow>, StoreError> {
        let guard = self.ledger.read().await;
        Ok(guard.payment_schedule(booking_id)?)
    }

    // ========== Documents ==========

    /// Attaches a document to a plot; see [`Ledger::attach_document`]
    pub async fn attach_document(
        &self,
        plot_id: PlotId,
        filename: impl Into<String>,
        content_ref: impl Into<String>,
    ) -> Document {
        let mut guard = self.ledger.write().await;
        let doc = guard.attach_document(&self.env, plot_id, filename, content_ref);
        self.persist(&guard).await;
        doc
    }

    /// Documents attached to a plot, in attachment order
    pub async fn documents_for_plot(&self, plot_id: PlotId) -> Vec<Document> {
        let guard = self.ledger.read().await;
        guard
            .documents_for_plot(plot_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Detaches a document; see [`Ledger::detach_document`]
    pub async fn detach_document(&self, document_id: DocumentId) {
        let mut guard = self.ledger.write().await;
        guard.detach_document(document_id);
        self.persist(&guard).await;
    }

    // ========== Office ==========

    /// Sets the company details
    pub async fn set_company_details(&self, details: CompanyDetails) {
        let mut guard = self.ledger.write().await;
        guard.set_company_details(details);
        self.persist(&guard).await;
    }

    /// Dashboard aggregates
    pub async fn stats(&self) -> LedgerStats {
        let guard = self.ledger.read().await;
        guard.stats()
    }

    /// Saves a snapshot of the current state.
    ///
    /// Fire-and-forget: the ledger never depends on the save having
    /// completed, so failures are logged and swallowed.
    async fn persist(&self, ledger: &Ledger) {
        if let Err(e) = self.snapshots.save(ledger.snapshot()).await {
            tracing::warn!(error = %e, "snapshot save failed; continuing with in-memory state");
        }
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore").finish_non_exhaustive()
    }
}
