//! Settlement planning: turn a ledger into a payment draft.
//!
//! The planner never writes. A draft is handed to whoever persists payments;
//! `draft_id` and `basis` let that writer detect retries and stale plans.

use super::ledger::LedgerEntry;
use super::status::{ClassifiedEarning, EarningStatus};
use crate::domain::{EventId, Money, PaymentKind, PaymentMethod, SnapshotKey, StaffId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

pub const FULL_SETTLEMENT_NOTE: &str = "Full balance settlement";
pub const DEFAULT_ADVANCE_NOTE: &str = "Manual advance";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Nothing is owed to staff member {0}")]
    NothingOwed(StaffId),
    #[error("Earning {earning_id} does not belong to staff member {staff_id}")]
    UnknownEarning {
        staff_id: StaffId,
        earning_id: EventId,
    },
    #[error("Earning {0} is already paid")]
    AlreadyPaid(EventId),
    #[error("Unknown staff member: {0}")]
    UnknownStaff(StaffId),
}

/// The ledger state a draft was planned against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBasis {
    pub snapshot_key: SnapshotKey,
    pub balance: Money,
}

impl DraftBasis {
    /// True if the draft was planned against a different snapshot.
    pub fn is_stale(&self, current: &SnapshotKey) -> bool {
        &self.snapshot_key != current
    }
}

/// A proposed payment, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Fresh per draft; usable as an idempotency key by the writer.
    pub draft_id: Uuid,
    pub staff_id: StaffId,
    pub amount: Money,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub kind: PaymentKind,
    pub note: String,
    /// Titles of the earnings this payment is meant to settle, oldest first.
    pub covered_titles: Vec<String>,
    pub basis: DraftBasis,
}

/// Plan a settlement for `entry`.
///
/// With an empty selection the draft settles the full balance. Otherwise it
/// settles exactly the outstanding remainder of the selected earnings; a
/// partially paid earning contributes only what is still owed.
///
/// # Errors
/// - `UnknownEarning` if a selected id is not one of the entry's earnings
/// - `AlreadyPaid` if a selected earning has nothing outstanding
/// - `NothingOwed` if the resulting amount is not positive
pub fn plan_settlement(
    entry: &LedgerEntry,
    selection: &[EventId],
    method: PaymentMethod,
    today: NaiveDate,
    snapshot_key: &SnapshotKey,
) -> Result<PaymentDraft, SettlementError> {
    let selection: BTreeSet<&EventId> = selection.iter().collect();

    let (amount, covered, note) = if selection.is_empty() {
        let covered = oldest_first(entry.open_earnings());
        (entry.balance, covered, FULL_SETTLEMENT_NOTE.to_string())
    } else {
        for id in &selection {
            let earning = entry.earning(id).ok_or_else(|| SettlementError::UnknownEarning {
                staff_id: entry.staff_id.clone(),
                earning_id: (*id).clone(),
            })?;
            if earning.status == EarningStatus::Paid {
                return Err(SettlementError::AlreadyPaid((*id).clone()));
            }
        }

        let covered = oldest_first(entry.earnings().filter(|e| selection.contains(&e.id)));
        let amount: Money = covered.iter().map(|e| e.outstanding()).sum();
        let titles: Vec<&str> = covered.iter().map(|e| e.title.as_str()).collect();
        let note = format!(
            "Settlement of {} event{}: {}",
            covered.len(),
            if covered.len() == 1 { "" } else { "s" },
            titles.join(", ")
        );
        (amount, covered, note)
    };

    if !amount.is_positive() {
        return Err(SettlementError::NothingOwed(entry.staff_id.clone()));
    }

    tracing::info!(
        staff_id = %entry.staff_id,
        amount = %amount,
        selected = selection.len(),
        "Planned settlement"
    );

    Ok(PaymentDraft {
        draft_id: Uuid::new_v4(),
        staff_id: entry.staff_id.clone(),
        amount,
        date: today,
        method,
        kind: PaymentKind::Event,
        note,
        covered_titles: covered.iter().map(|e| e.title.clone()).collect(),
        basis: DraftBasis {
            snapshot_key: snapshot_key.clone(),
            balance: entry.balance,
        },
    })
}

/// Plan a manual advance from user-entered amount text.
///
/// # Errors
/// `InvalidAmount` unless the text is a number that stays positive and in
/// range after rounding to the minor unit.
pub fn plan_advance(
    entry: &LedgerEntry,
    raw_amount: &str,
    method: PaymentMethod,
    note: Option<&str>,
    today: NaiveDate,
    snapshot_key: &SnapshotKey,
) -> Result<PaymentDraft, SettlementError> {
    let amount = Money::from_str_canonical(raw_amount)
        .map_err(|_| SettlementError::InvalidAmount(raw_amount.to_string()))?
        .round_to_minor_unit();
    if !amount.is_positive() || !amount.is_in_range() {
        return Err(SettlementError::InvalidAmount(raw_amount.to_string()));
    }

    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_ADVANCE_NOTE)
        .to_string();

    Ok(PaymentDraft {
        draft_id: Uuid::new_v4(),
        staff_id: entry.staff_id.clone(),
        amount,
        date: today,
        method,
        kind: PaymentKind::Advance,
        note,
        covered_titles: Vec::new(),
        basis: DraftBasis {
            snapshot_key: snapshot_key.clone(),
            balance: entry.balance,
        },
    })
}

fn oldest_first<'a>(earnings: impl Iterator<Item = &'a ClassifiedEarning>) -> Vec<&'a ClassifiedEarning> {
    let mut earnings: Vec<_> = earnings.collect();
    earnings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    earnings
}
