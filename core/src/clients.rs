//! Client registry operations.

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::types::{Client, ClientId, NewClient};

impl Ledger {
    /// Registers a client, deduplicating by CNIC
    ///
    /// If a client with the same `cnic` already exists, that record is
    /// returned unchanged and the supplied data is discarded.
    pub fn add_client(&mut self, data: NewClient) -> Client {
        if let Some(existing) = self.clients.iter().find(|c| c.cnic == data.cnic) {
            return existing.clone();
        }

        let client = Client {
            id: ClientId::new(),
            name: data.name,
            cnic: data.cnic,
            phone: data.phone,
            address: data.address,
        };
        self.clients.push(client.clone());
        client
    }

    /// Deletes a client
    ///
    /// Never cascades into bookings.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ClientHasBookings`] if any booking still
    /// references the client, and [`LedgerError::NotFound`] if the client
    /// does not exist. State is unchanged in both cases.
    pub fn delete_client(&mut self, client_id: ClientId) -> LedgerResult<()> {
        if !self.clients.iter().any(|c| c.id == client_id) {
            return Err(LedgerError::not_found("client", client_id));
        }
        if self.bookings.iter().any(|b| b.client_id == client_id) {
            return Err(LedgerError::ClientHasBookings { id: client_id });
        }

        self.clients.retain(|c| c.id != client_id);
        Ok(())
    }
}
