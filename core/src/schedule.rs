//! Installment schedule computation.
//!
//! The schedule is a pure function of a booking and its transactions.
//! Payments are not earmarked to specific installments: a row counts as
//! paid purely because enough cumulative money has arrived. The office
//! relies on this greedy model for its receipts and due-date displays,
//! so it must not be replaced by a per-installment allocation.

use crate::types::{Booking, Transaction};
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Label of a schedule row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowLabel {
    /// The advance payment row (row 0)
    Advance,
    /// The i-th monthly installment, 1-based
    Month(u32),
}

impl std::fmt::Display for RowLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advance => f.write_str("Advance"),
            Self::Month(i) => write!(f, "Month {i}"),
        }
    }
}

/// One row of an installment schedule
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Advance or the installment number
    pub label: RowLabel,
    /// When this amount falls due
    pub due_date: DateTime<Utc>,
    /// Amount due in this row
    pub amount: f64,
    /// Whether cumulative payments cover this row
    pub paid: bool,
}

/// Computes the theoretical due schedule for a booking and reconciles it
/// against cumulative payments.
///
/// - `remaining = total - advance`, `monthly = remaining / months`
///   (floating-point division, no rounding)
/// - Row 0 is the advance: due at the booking date, always paid
/// - Row `i` (1-based) is due `i` calendar months after the booking date
///   and is paid iff `paid_so_far >= advance + monthly * i`, where
///   `paid_so_far` is the sum of *all* of the booking's transactions,
///   computed once up front
///
/// `transactions` may be the full ledger transaction list; entries for
/// other bookings are ignored.
#[must_use]
pub fn installment_schedule(booking: &Booking, transactions: &[Transaction]) -> Vec<ScheduleRow> {
    let paid_so_far: f64 = transactions
        .iter()
        .filter(|t| t.booking_id == booking.id)
        .map(|t| t.amount)
        .sum();

    let remaining = booking.total_amount - booking.advance_amount;
    let monthly = remaining / f64::from(booking.months);

    let mut rows = Vec::with_capacity(booking.months as usize + 1);
    rows.push(ScheduleRow {
        label: RowLabel::Advance,
        due_date: booking.date,
        amount: booking.advance_amount,
        paid: true,
    });

    for i in 1..=booking.months {
        // Calendar-month advancement with day clamping, not 30-day steps.
        let due_date = booking
            .date
            .checked_add_months(Months::new(i))
            .unwrap_or(booking.date);
        let due_so_far = booking.advance_amount + monthly * f64::from(i);

        rows.push(ScheduleRow {
            label: RowLabel::Month(i),
            due_date,
            amount: monthly,
            paid: paid_so_far >= due_so_far,
        });
    }

    rows
}
