//! Earnings projection: events -> per-staff earnings.

use super::Earning;
use crate::domain::{Event, Money, StaffId};

/// Derive one earning per event that `staff_id` attended.
///
/// The amount is the participation's amount-due as currently recorded.
/// Absent or non-attended participations contribute nothing; participations
/// with a negative or out-of-range amount-due are dropped.
pub fn project_earnings(events: &[Event], staff_id: &StaffId) -> Vec<Earning> {
    events
        .iter()
        .filter_map(|event| {
            let participation = event.attended_participation(staff_id)?;
            if !is_valid_amount_due(participation.amount_due) {
                tracing::warn!(
                    event_id = %event.id,
                    staff_id = %staff_id,
                    amount_due = %participation.amount_due,
                    "Skipping participation with invalid amount due"
                );
                return None;
            }

            Some(Earning {
                id: event.id.clone(),
                staff_id: staff_id.clone(),
                title: event.title.clone(),
                date: event.date,
                amount: participation.amount_due,
                remaining: participation.amount_due,
            })
        })
        .collect()
}

/// Amount-due values that produce an earning: non-negative and in range.
pub fn is_valid_amount_due(amount_due: Money) -> bool {
    !amount_due.is_negative() && amount_due.is_in_range()
}
