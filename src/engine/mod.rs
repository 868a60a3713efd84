//! Pure computation engine(s) for deterministic ledger logic.

use crate::domain::{EventId, Money, StaffId};
use chrono::NaiveDate;
use serde::Serialize;

pub mod allocator;
pub mod earnings;
pub mod journal;
pub mod ledger;
pub mod payments;
pub mod settlement;
pub mod stats;
pub mod status;

pub use allocator::{allocate, AllocatedPayment, Allocation, FifoAllocator};
pub use earnings::project_earnings;
pub use journal::{build_journal, journal_to_csv, JournalEntry, JournalFilter, JournalFlow};
pub use ledger::{
    compute_all_ledgers, compute_ledger, LedgerBook, LedgerEntry, LedgerItem, LedgerPayment,
};
pub use payments::normalize_payments;
pub use settlement::{
    plan_advance, plan_settlement, DraftBasis, PaymentDraft, SettlementError,
};
pub use stats::{compute_stats, event_financials, EventFinancials, GlobalStats};
pub use status::{ClassifiedEarning, EarningStatus};

/// Money owed to one staff member for one attended event.
///
/// `remaining` is allocator scratch state: it starts at `amount` and only
/// ever decreases during a single computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Earning {
    /// Same as the id of the event it was derived from.
    pub id: EventId,
    pub staff_id: StaffId,
    pub title: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub remaining: Money,
}

impl Earning {
    pub fn is_settled(&self) -> bool {
        !self.remaining.is_positive()
    }
}

/// The part of one payment that went to one earning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveredEvent {
    pub earning_id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub total_amount: Money,
    pub covered_amount: Money,
}
