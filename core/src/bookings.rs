//! Booking ledger operations: booking creation, payments and transfers.
//!
//! A booking commits an available plot to a client under a payment plan.
//! Payments are an append-only transaction list; the amount paid so far
//! is always derived by summing it, never cached.

use crate::environment::LedgerEnvironment;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::schedule::{self, ScheduleRow};
use crate::types::{
    Booking, BookingId, BookingStatus, ClientId, NewBooking, PaymentRequest, PlotStatus,
    Transaction, TransactionId, TransactionKind,
};

impl Ledger {
    /// Books a plot for a client and records the advance payment
    ///
    /// On success the plot transitions `Available -> Booked` and gets its
    /// `booked_by` reference set, the booking is created with status
    /// [`BookingStatus::Active`], and an advance [`Transaction`] is
    /// appended (method defaulting to cash).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the plot or client does not exist
    /// - [`LedgerError::PlotNotAvailable`] if the plot is already booked
    ///   or sold
    /// - [`LedgerError::Validation`] for a non-positive total, an advance
    ///   outside `[0, total]`, or zero months
    pub fn create_booking(
        &mut self,
        env: &LedgerEnvironment,
        req: NewBooking,
    ) -> LedgerResult<Booking> {
        Self::validate_new_booking(&req)?;

        if self.client(req.client_id).is_none() {
            return Err(LedgerError::not_found("client", req.client_id));
        }
        let plot = self
            .find_plot(req.plot_id)
            .ok_or_else(|| LedgerError::not_found("plot", req.plot_id))?;
        if plot.status != PlotStatus::Available {
            return Err(LedgerError::PlotNotAvailable { id: req.plot_id });
        }

        let now = env.now();
        let method = req.payment_method.unwrap_or_default();
        let booking = Booking {
            id: BookingId::new(),
            client_id: req.client_id,
            plot_id: req.plot_id,
            date: now,
            total_amount: req.total_amount,
            advance_amount: req.advance_amount,
            months: req.months,
            payment_method: method,
            status: BookingStatus::Active,
        };

        if let Some(plot) = self.find_plot_mut(req.plot_id) {
            plot.status = PlotStatus::Booked;
            plot.booked_by = Some(req.client_id);
        }

        self.transactions.push(Transaction {
            id: TransactionId::new(),
            booking_id: booking.id,
            amount: req.advance_amount,
            kind: TransactionKind::Advance,
            method,
            date: now,
        });
        self.bookings.push(booking.clone());

        Ok(booking)
    }

    /// Records an installment payment against a booking
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the booking does not exist
    /// - [`LedgerError::InvalidPayment`] if the amount is not positive or
    ///   exceeds the outstanding balance
    pub fn record_payment(
        &mut self,
        env: &LedgerEnvironment,
        req: PaymentRequest,
    ) -> LedgerResult<Transaction> {
        let outstanding = self.outstanding_balance(req.booking_id)?;

        if req.amount <= 0.0 {
            return Err(LedgerError::InvalidPayment {
                booking_id: req.booking_id,
                amount: req.amount,
                reason: "amount must be positive".to_string(),
            });
        }
        if req.amount > outstanding {
            return Err(LedgerError::InvalidPayment {
                booking_id: req.booking_id,
                amount: req.amount,
                reason: format!("amount exceeds outstanding balance of {outstanding}"),
            });
        }

        let tx = Transaction {
            id: TransactionId::new(),
            booking_id: req.booking_id,
            amount: req.amount,
            kind: TransactionKind::Installment,
            method: req.method,
            date: env.now(),
        };
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Transfers a booking to a different client
    ///
    /// Rewrites the booking's `client_id` and the plot's `booked_by`;
    /// the booking id and the full transaction history are untouched, so
    /// payment history follows the plot, not the client.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the booking or the new client
    /// does not exist.
    pub fn transfer_ownership(
        &mut self,
        booking_id: BookingId,
        new_client_id: ClientId,
    ) -> LedgerResult<()> {
        if self.client(new_client_id).is_none() {
            return Err(LedgerError::not_found("client", new_client_id));
        }
        let booking = self
            .booking_mut(booking_id)
            .ok_or_else(|| LedgerError::not_found("booking", booking_id))?;

        booking.client_id = new_client_id;
        let plot_id = booking.plot_id;

        if let Some(plot) = self.find_plot_mut(plot_id) {
            plot.booked_by = Some(new_client_id);
        } else {
            // A booking without its plot means a cascade failed somewhere.
            debug_assert!(false, "booking {booking_id} references missing plot {plot_id}");
        }
        Ok(())
    }

    /// Outstanding balance of a booking: total minus everything paid
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the booking does not exist.
    pub fn outstanding_balance(&self, booking_id: BookingId) -> LedgerResult<f64> {
        let booking = self
            .booking(booking_id)
            .ok_or_else(|| LedgerError::not_found("booking", booking_id))?;
        Ok(booking.total_amount - self.paid_total(booking_id))
    }

    /// Computes the installment schedule for a booking
    ///
    /// See [`schedule::installment_schedule`] for the reconciliation
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the booking does not exist.
    pub fn payment_schedule(&self, booking_id: BookingId) -> LedgerResult<Vec<ScheduleRow>> {
        let booking = self
            .booking(booking_id)
            .ok_or_else(|| LedgerError::not_found("booking", booking_id))?;
        Ok(schedule::installment_schedule(booking, &self.transactions))
    }

    /// Validates the shape of a booking request
    fn validate_new_booking(req: &NewBooking) -> LedgerResult<()> {
        if req.total_amount <= 0.0 {
            return Err(LedgerError::Validation(
                "total amount must be positive".to_string(),
            ));
        }
        if req.advance_amount < 0.0 || req.advance_amount > req.total_amount {
            return Err(LedgerError::Validation(
                "advance must lie between zero and the total amount".to_string(),
            ));
        }
        if req.months == 0 {
            return Err(LedgerError::Validation(
                "installment plan needs at least one month".to_string(),
            ));
        }
        Ok(())
    }
}
