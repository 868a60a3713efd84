//! Payment normalization: all payments -> one staff member's payments.

use crate::domain::{Payment, StaffId};

/// Select the payments made to `staff_id`.
///
/// Payments are not filtered by kind: an advance reduces the balance exactly
/// like a settlement does. Non-positive and out-of-range amounts are invalid
/// records and are dropped.
pub fn normalize_payments(payments: &[Payment], staff_id: &StaffId) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| &p.staff_id == staff_id)
        .filter(|p| {
            let valid = p.amount.is_positive() && p.amount.is_in_range();
            if !valid {
                tracing::warn!(
                    payment_id = %p.id,
                    staff_id = %staff_id,
                    amount = %p.amount,
                    "Skipping payment with invalid amount"
                );
            }
            valid
        })
        .cloned()
        .collect()
}
