//! Stable ordering for deterministic allocation and display.

use crate::domain::Payment;
use chrono::NaiveDate;

/// Allocation ordering key for earnings and payments.
///
/// Ordering: date -> record id. Same-date records never fall back to the
/// store's iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LedgerOrderingKey {
    /// Date (primary sort, oldest first).
    pub date: NaiveDate,
    /// Record id (tie-breaker).
    pub id: String,
}

impl LedgerOrderingKey {
    pub fn new(date: NaiveDate, id: &str) -> Self {
        LedgerOrderingKey {
            date,
            id: id.to_string(),
        }
    }

    pub fn from_payment(payment: &Payment) -> Self {
        Self::new(payment.date, payment.id.as_str())
    }
}

/// Sort payments oldest first.
pub fn sort_payments_for_allocation(payments: &mut [Payment]) {
    payments.sort_by(|a, b| {
        let key_a = LedgerOrderingKey::from_payment(a);
        let key_b = LedgerOrderingKey::from_payment(b);
        key_a.cmp(&key_b)
    });
}
