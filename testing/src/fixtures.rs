//! Fixture builders for a pre-populated ledger.

use crate::mocks::FixedClock;
use rems_core::environment::LedgerEnvironment;
use rems_core::ledger::Ledger;
use rems_core::types::{NewBlock, NewBooking, NewClient, PaymentMethod, PaymentRequest};
use std::sync::Arc;

/// A deterministic environment pinned to 2024-01-15
#[must_use]
pub fn fixed_env() -> LedgerEnvironment {
    LedgerEnvironment::new(Arc::new(FixedClock::at(2024, 1, 15)))
}

/// A small but fully-populated ledger
///
/// One project ("Green Valley") with block A of three plots, two
/// clients, one active booking on plot P-1 (500k total, 100k advance,
/// 10 months, one 80k installment paid) and a document on the booked
/// plot.
///
/// # Panics
///
/// Panics if the fixture operations fail, which would mean the core
/// crate itself is broken (test-only convenience).
#[must_use]
#[allow(clippy::unwrap_used)]
#[allow(clippy::missing_panics_doc)]
pub fn sample_ledger() -> Ledger {
    let env = fixed_env();
    let mut ledger = Ledger::new();

    let project = ledger.create_project(&env, "Green Valley");
    let block = ledger
        .create_block(
            project.id,
            NewBlock {
                name: "A".to_string(),
                plot_prefix: "P".to_string(),
                plot_count: 3,
                plot_size: "5 Marla".to_string(),
                price: 500_000.0,
            },
        )
        .unwrap();

    let buyer = ledger.add_client(NewClient {
        name: "Ali Raza".to_string(),
        cnic: "35202-1234567-1".to_string(),
        phone: "0300-1234567".to_string(),
        address: "Lahore".to_string(),
    });
    ledger.add_client(NewClient {
        name: "Sara Khan".to_string(),
        cnic: "61101-7654321-2".to_string(),
        phone: "0333-7654321".to_string(),
        address: "Islamabad".to_string(),
    });

    let booking = ledger
        .create_booking(
            &env,
            NewBooking {
                client_id: buyer.id,
                plot_id: block.plots[0].id,
                total_amount: 500_000.0,
                advance_amount: 100_000.0,
                months: 10,
                payment_method: Some(PaymentMethod::Cash),
            },
        )
        .unwrap();
    ledger
        .record_payment(
            &env,
            PaymentRequest {
                booking_id: booking.id,
                amount: 80_000.0,
                method: PaymentMethod::Bank,
            },
        )
        .unwrap();

    ledger.attach_document(&env, block.plots[0].id, "agreement.pdf", "ref-agreement");

    ledger
}
