//! Booking ledger tests: arithmetic, reconciliation, guards and
//! transfers.
//!
//! Run with: `cargo test -p rems-core --test booking_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use rems_core::environment::LedgerEnvironment;
use rems_core::error::LedgerError;
use rems_core::ledger::Ledger;
use rems_core::schedule::RowLabel;
use rems_core::types::{
    BookingId, NewBlock, NewBooking, NewClient, PaymentMethod, PaymentRequest, PlotId, PlotStatus,
    TransactionKind,
};

struct Fixture {
    env: LedgerEnvironment,
    ledger: Ledger,
    client_id: rems_core::types::ClientId,
    plot_id: PlotId,
    spare_plot_id: PlotId,
}

/// One project, one block with two plots, one client.
fn fixture() -> Fixture {
    let env = LedgerEnvironment::default();
    let mut ledger = Ledger::new();
    let project = ledger.create_project(&env, "Green Valley");
    let block = ledger
        .create_block(
            project.id,
            NewBlock {
                name: "A".to_string(),
                plot_prefix: "P".to_string(),
                plot_count: 2,
                plot_size: "5 Marla".to_string(),
                price: 500_000.0,
            },
        )
        .expect("project exists");
    let client = ledger.add_client(NewClient {
        name: "Ali Raza".to_string(),
        cnic: "35202-1234567-1".to_string(),
        phone: "0300-1234567".to_string(),
        address: "Lahore".to_string(),
    });

    Fixture {
        env,
        client_id: client.id,
        plot_id: block.plots[0].id,
        spare_plot_id: block.plots[1].id,
        ledger,
    }
}

fn standard_booking(f: &mut Fixture) -> BookingId {
    f.ledger
        .create_booking(
            &f.env,
            NewBooking {
                client_id: f.client_id,
                plot_id: f.plot_id,
                total_amount: 500_000.0,
                advance_amount: 100_000.0,
                months: 10,
                payment_method: None,
            },
        )
        .expect("booking succeeds")
        .id
}

#[test]
fn booking_books_the_plot_and_records_the_advance() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);

    let plot = f.ledger.find_plot(f.plot_id).unwrap();
    assert_eq!(plot.status, PlotStatus::Booked);
    assert_eq!(plot.booked_by, Some(f.client_id));

    let txs: Vec<_> = f.ledger.transactions_for(booking_id).collect();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, TransactionKind::Advance);
    assert_eq!(txs[0].amount, 100_000.0);
    assert_eq!(txs[0].method, PaymentMethod::Cash);

    assert_eq!(f.ledger.outstanding_balance(booking_id).unwrap(), 400_000.0);
}

#[test]
fn double_booking_a_plot_is_a_conflict() {
    let mut f = fixture();
    standard_booking(&mut f);

    let second = f.ledger.create_booking(
        &f.env,
        NewBooking {
            client_id: f.client_id,
            plot_id: f.plot_id,
            total_amount: 500_000.0,
            advance_amount: 0.0,
            months: 12,
            payment_method: None,
        },
    );

    assert!(matches!(
        second,
        Err(LedgerError::PlotNotAvailable { id }) if id == f.plot_id
    ));
    // Exactly one live booking references the plot.
    assert_eq!(
        f.ledger
            .bookings()
            .iter()
            .filter(|b| b.plot_id == f.plot_id)
            .count(),
        1
    );
}

#[test]
fn booking_unknown_plot_or_client_is_not_found() {
    let mut f = fixture();

    let missing_plot = f.ledger.create_booking(
        &f.env,
        NewBooking {
            client_id: f.client_id,
            plot_id: PlotId::new(),
            total_amount: 500_000.0,
            advance_amount: 0.0,
            months: 12,
            payment_method: None,
        },
    );
    assert!(matches!(missing_plot, Err(LedgerError::NotFound { entity: "plot", .. })));

    let missing_client = f.ledger.create_booking(
        &f.env,
        NewBooking {
            client_id: rems_core::types::ClientId::new(),
            plot_id: f.spare_plot_id,
            total_amount: 500_000.0,
            advance_amount: 0.0,
            months: 12,
            payment_method: None,
        },
    );
    assert!(matches!(missing_client, Err(LedgerError::NotFound { entity: "client", .. })));
}

#[test]
fn schedule_reconciles_cumulative_payments() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);

    f.ledger
        .record_payment(
            &f.env,
            PaymentRequest {
                booking_id,
                amount: 80_000.0,
                method: PaymentMethod::Bank,
            },
        )
        .expect("payment accepted");

    // paid = 100000 advance + 80000 = 180000; monthly = 40000.
    let rows = f.ledger.payment_schedule(booking_id).unwrap();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0].label, RowLabel::Advance);
    assert!(rows[0].paid);
    assert!(rows[1].paid); // due 140000
    assert!(rows[2].paid); // due 180000
    assert!(!rows[3].paid); // due 220000
    assert_eq!(rows[1].amount, 40_000.0);

    assert_eq!(f.ledger.outstanding_balance(booking_id).unwrap(), 320_000.0);
}

#[test]
fn payments_are_validated_against_the_outstanding_balance() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);

    let negative = f.ledger.record_payment(
        &f.env,
        PaymentRequest {
            booking_id,
            amount: -5.0,
            method: PaymentMethod::Cash,
        },
    );
    assert!(matches!(negative, Err(LedgerError::InvalidPayment { .. })));

    let too_much = f.ledger.record_payment(
        &f.env,
        PaymentRequest {
            booking_id,
            amount: 400_000.1,
            method: PaymentMethod::Cash,
        },
    );
    assert!(matches!(too_much, Err(LedgerError::InvalidPayment { .. })));

    let unknown = f.ledger.record_payment(
        &f.env,
        PaymentRequest {
            booking_id: BookingId::new(),
            amount: 1_000.0,
            method: PaymentMethod::Cash,
        },
    );
    assert!(matches!(unknown, Err(LedgerError::NotFound { .. })));

    // Rejected payments leave the ledger untouched.
    assert_eq!(f.ledger.transactions_for(booking_id).count(), 1);

    // Paying off exactly the outstanding balance is allowed.
    f.ledger
        .record_payment(
            &f.env,
            PaymentRequest {
                booking_id,
                amount: 400_000.0,
                method: PaymentMethod::Cash,
            },
        )
        .expect("exact payoff accepted");
    assert_eq!(f.ledger.outstanding_balance(booking_id).unwrap(), 0.0);
}

#[test]
fn booking_requests_are_validated() {
    let mut f = fixture();

    let zero_months = f.ledger.create_booking(
        &f.env,
        NewBooking {
            client_id: f.client_id,
            plot_id: f.plot_id,
            total_amount: 500_000.0,
            advance_amount: 100_000.0,
            months: 0,
            payment_method: None,
        },
    );
    assert!(matches!(zero_months, Err(LedgerError::Validation(_))));

    let oversized_advance = f.ledger.create_booking(
        &f.env,
        NewBooking {
            client_id: f.client_id,
            plot_id: f.plot_id,
            total_amount: 500_000.0,
            advance_amount: 600_000.0,
            months: 10,
            payment_method: None,
        },
    );
    assert!(matches!(oversized_advance, Err(LedgerError::Validation(_))));

    // Failed validation must not have booked the plot.
    assert_eq!(
        f.ledger.find_plot(f.plot_id).unwrap().status,
        PlotStatus::Available
    );
}

#[test]
fn add_client_is_idempotent_on_cnic() {
    let mut f = fixture();

    let first = f.ledger.add_client(NewClient {
        name: "Original Name".to_string(),
        cnic: "42101-7654321-9".to_string(),
        phone: "0311-0000000".to_string(),
        address: "Karachi".to_string(),
    });
    let second = f.ledger.add_client(NewClient {
        name: "Different Name".to_string(),
        cnic: "42101-7654321-9".to_string(),
        phone: "0322-9999999".to_string(),
        address: "Islamabad".to_string(),
    });

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Original Name");
    assert_eq!(
        f.ledger
            .clients()
            .iter()
            .filter(|c| c.cnic == "42101-7654321-9")
            .count(),
        1
    );
}

#[test]
fn client_with_bookings_cannot_be_deleted() {
    let mut f = fixture();
    standard_booking(&mut f);
    let before = f.ledger.clone();

    let result = f.ledger.delete_client(f.client_id);

    assert!(matches!(
        result,
        Err(LedgerError::ClientHasBookings { id }) if id == f.client_id
    ));
    assert_eq!(f.ledger, before);
}

#[test]
fn client_without_bookings_can_be_deleted() {
    let mut f = fixture();
    f.ledger.delete_client(f.client_id).expect("no bookings yet");
    assert!(f.ledger.client(f.client_id).is_none());

    let unknown = f.ledger.delete_client(f.client_id);
    assert!(matches!(unknown, Err(LedgerError::NotFound { .. })));
}

#[test]
fn transfer_rewrites_ownership_but_preserves_history() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);
    f.ledger
        .record_payment(
            &f.env,
            PaymentRequest {
                booking_id,
                amount: 50_000.0,
                method: PaymentMethod::Cheque,
            },
        )
        .unwrap();

    let new_client = f.ledger.add_client(NewClient {
        name: "Sara Khan".to_string(),
        cnic: "61101-1112223-4".to_string(),
        phone: "0333-1234567".to_string(),
        address: "Islamabad".to_string(),
    });

    let history_before: Vec<_> = f.ledger.transactions_for(booking_id).cloned().collect();
    f.ledger
        .transfer_ownership(booking_id, new_client.id)
        .expect("transfer succeeds");

    let booking = f.ledger.booking(booking_id).unwrap();
    assert_eq!(booking.client_id, new_client.id);
    assert_eq!(
        f.ledger.find_plot(f.plot_id).unwrap().booked_by,
        Some(new_client.id)
    );

    let history_after: Vec<_> = f.ledger.transactions_for(booking_id).cloned().collect();
    assert_eq!(history_before, history_after);
    assert_eq!(f.ledger.paid_total(booking_id), 150_000.0);

    // The old client is now deletable, the new one is not.
    f.ledger.delete_client(f.client_id).expect("old client freed");
    assert!(f.ledger.delete_client(new_client.id).is_err());
}

#[test]
fn transfer_to_unknown_targets_is_rejected() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);

    let unknown_client =
        f.ledger.transfer_ownership(booking_id, rems_core::types::ClientId::new());
    assert!(matches!(unknown_client, Err(LedgerError::NotFound { .. })));

    let unknown_booking = f.ledger.transfer_ownership(BookingId::new(), f.client_id);
    assert!(matches!(unknown_booking, Err(LedgerError::NotFound { .. })));
}

#[test]
fn stats_aggregate_collected_and_pending() {
    let mut f = fixture();
    let booking_id = standard_booking(&mut f);
    f.ledger
        .record_payment(
            &f.env,
            PaymentRequest {
                booking_id,
                amount: 80_000.0,
                method: PaymentMethod::Online,
            },
        )
        .unwrap();

    let stats = f.ledger.stats();
    assert_eq!(stats.total_projects, 1);
    assert_eq!(stats.total_clients, 1);
    assert_eq!(stats.total_collected, 180_000.0);
    assert_eq!(stats.total_pending, 320_000.0);
}

#[test]
fn documents_attach_list_and_detach() {
    let mut f = fixture();

    let d1 = f.ledger.attach_document(&f.env, f.plot_id, "deed.pdf", "ref-1");
    let d2 = f.ledger.attach_document(&f.env, f.plot_id, "cnic-copy.jpg", "ref-2");
    f.ledger.attach_document(&f.env, f.spare_plot_id, "other.pdf", "ref-3");

    let docs = f.ledger.documents_for_plot(f.plot_id);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, d1.id);
    assert_eq!(docs[1].id, d2.id);

    f.ledger.detach_document(d1.id);
    assert_eq!(f.ledger.documents_for_plot(f.plot_id).len(), 1);

    // Detaching an unknown document is a no-op.
    f.ledger.detach_document(d1.id);
    assert_eq!(f.ledger.documents().len(), 2);
}
