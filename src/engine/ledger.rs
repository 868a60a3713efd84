//! Ledger assembly: per-staff reconciled history and balance.

use super::allocator::{allocate, AllocatedPayment};
use super::status::{ClassifiedEarning, EarningStatus};
use super::{normalize_payments, project_earnings, CoveredEvent};
use crate::domain::{
    EventId, Money, PaymentId, PaymentKind, PaymentMethod, Snapshot, StaffCategory, StaffId,
    StaffMember,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// A payment as shown in a ledger, with the earnings it covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPayment {
    pub id: PaymentId,
    pub title: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: PaymentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub covered_events: Vec<CoveredEvent>,
}

impl From<AllocatedPayment> for LedgerPayment {
    fn from(allocated: AllocatedPayment) -> Self {
        let payment = allocated.payment;
        LedgerPayment {
            title: format!("Payment: {}", payment.kind),
            id: payment.id,
            date: payment.date,
            amount: payment.amount,
            kind: payment.kind,
            method: payment.method,
            note: payment.note,
            covered_events: allocated.covered_events,
        }
    }
}

/// One line of a staff member's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerItem {
    Earning(ClassifiedEarning),
    Payment(LedgerPayment),
}

impl LedgerItem {
    pub fn date(&self) -> NaiveDate {
        match self {
            LedgerItem::Earning(e) => e.date,
            LedgerItem::Payment(p) => p.date,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            LedgerItem::Earning(e) => e.id.as_str(),
            LedgerItem::Payment(p) => p.id.as_str(),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            LedgerItem::Earning(_) => 0,
            LedgerItem::Payment(_) => 1,
        }
    }
}

/// Display order: newest first; same-date earnings before payments; then id
/// descending.
fn history_order(a: &LedgerItem, b: &LedgerItem) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| a.kind_rank().cmp(&b.kind_rank()))
        .then_with(|| b.id().cmp(a.id()))
}

/// The reconciled ledger of one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub staff_id: StaffId,
    pub name: String,
    pub category: StaffCategory,
    pub total_earned: Money,
    pub total_paid: Money,
    /// `total_earned - total_paid`; positive means the business owes money.
    pub balance: Money,
    pub history: Vec<LedgerItem>,
}

impl LedgerEntry {
    pub fn is_debtor(&self) -> bool {
        self.balance.is_positive()
    }

    pub fn earnings(&self) -> impl Iterator<Item = &ClassifiedEarning> {
        self.history.iter().filter_map(|item| match item {
            LedgerItem::Earning(e) => Some(e),
            LedgerItem::Payment(_) => None,
        })
    }

    pub fn payments(&self) -> impl Iterator<Item = &LedgerPayment> {
        self.history.iter().filter_map(|item| match item {
            LedgerItem::Payment(p) => Some(p),
            LedgerItem::Earning(_) => None,
        })
    }

    pub fn earning(&self, id: &EventId) -> Option<&ClassifiedEarning> {
        self.earnings().find(|e| &e.id == id)
    }

    /// Earnings not yet fully paid.
    pub fn open_earnings(&self) -> impl Iterator<Item = &ClassifiedEarning> {
        self.earnings().filter(|e| e.status != EarningStatus::Paid)
    }
}

fn assemble_entry(snapshot: &Snapshot, member: &StaffMember) -> LedgerEntry {
    let earnings = project_earnings(&snapshot.events, &member.id);
    let payments = normalize_payments(&snapshot.payments, &member.id);

    let total_earned: Money = earnings.iter().map(|e| e.amount).sum();
    let total_paid: Money = payments.iter().map(|p| p.amount).sum();

    let allocation = allocate(earnings, payments);

    let mut history: Vec<LedgerItem> = allocation
        .earnings
        .iter()
        .map(|e| LedgerItem::Earning(ClassifiedEarning::from(e)))
        .chain(
            allocation
                .payments
                .into_iter()
                .map(|p| LedgerItem::Payment(LedgerPayment::from(p))),
        )
        .collect();
    history.sort_by(history_order);

    LedgerEntry {
        staff_id: member.id.clone(),
        name: member.name.clone(),
        category: member.category,
        total_earned,
        total_paid,
        balance: total_earned - total_paid,
        history,
    }
}

/// Compute the ledger of one roster member.
///
/// Returns `None` when `staff_id` is not in the roster. A roster member
/// without any events or payments gets an empty ledger with a zero balance.
pub fn compute_ledger(snapshot: &Snapshot, staff_id: &StaffId) -> Option<LedgerEntry> {
    snapshot
        .staff_member(staff_id)
        .map(|member| assemble_entry(snapshot, member))
}

/// Compute every roster member's ledger, highest balance first.
///
/// Ties are broken by staff id. Participations and payments that reference
/// staff outside the roster are left out of every ledger.
pub fn compute_all_ledgers(snapshot: &Snapshot) -> Vec<LedgerEntry> {
    log_orphan_references(snapshot);

    let mut seen: HashSet<&StaffId> = HashSet::new();
    let mut entries: Vec<LedgerEntry> = snapshot
        .staff
        .iter()
        .filter(|member| seen.insert(&member.id))
        .map(|member| assemble_entry(snapshot, member))
        .collect();

    entries.sort_by(|a, b| {
        b.balance
            .cmp(&a.balance)
            .then_with(|| a.staff_id.cmp(&b.staff_id))
    });
    entries
}

fn log_orphan_references(snapshot: &Snapshot) {
    let roster = snapshot.roster_ids();

    for event in &snapshot.events {
        for participation in &event.participations {
            if !roster.contains(&participation.staff_id) {
                tracing::debug!(
                    event_id = %event.id,
                    staff_id = %participation.staff_id,
                    "Participation references staff outside the roster"
                );
            }
        }
    }

    for payment in &snapshot.payments {
        if !roster.contains(&payment.staff_id) {
            tracing::debug!(
                payment_id = %payment.id,
                staff_id = %payment.staff_id,
                "Payment references staff outside the roster"
            );
        }
    }
}

/// All ledgers of a snapshot with lookup helpers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LedgerBook {
    entries: Vec<LedgerEntry>,
}

impl LedgerBook {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            entries: compute_all_ledgers(snapshot),
        }
    }

    /// Every entry, highest balance first.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn ledger_for(&self, staff_id: &StaffId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| &e.staff_id == staff_id)
    }

    /// Staff the business currently owes money to.
    pub fn debtors(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| e.is_debtor())
    }

    /// Staff with a zero or negative balance.
    pub fn settled(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| !e.is_debtor())
    }

    /// Sum of positive balances. Negative balances are not receivables.
    pub fn total_debt(&self) -> Money {
        self.debtors().map(|e| e.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Event, Participation, Payment};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            staff: vec![
                StaffMember::new(StaffId::from("m1"), "Ana", StaffCategory::Musician),
                StaffMember::new(StaffId::from("m2"), "Luis", StaffCategory::Driver),
            ],
            events: vec![
                Event::new(EventId::from("e1"), "Gala", day(1)).with_participation(
                    Participation::new(StaffId::from("m1"), true, Money::from_units(100)),
                ),
                Event::new(EventId::from("e2"), "Wedding", day(2))
                    .with_participation(Participation::new(
                        StaffId::from("m1"),
                        true,
                        Money::from_units(150),
                    ))
                    .with_participation(Participation::new(
                        StaffId::from("ghost"),
                        true,
                        Money::from_units(999),
                    )),
            ],
            payments: vec![
                Payment::new(
                    PaymentId::from("p1"),
                    StaffId::from("m1"),
                    Money::from_units(120),
                    day(3),
                ),
                Payment::new(
                    PaymentId::from("p2"),
                    StaffId::from("m2"),
                    Money::from_units(30),
                    day(3),
                ),
            ],
            expenses: vec![],
        }
    }

    #[test]
    fn history_is_newest_first() {
        let entry = compute_ledger(&snapshot(), &StaffId::from("m1")).unwrap();
        let ids: Vec<&str> = entry.history.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["p1", "e2", "e1"]);
    }

    #[test]
    fn same_date_history_puts_earnings_first() {
        let mut snap = snapshot();
        snap.payments[0].date = day(2);

        let entry = compute_ledger(&snap, &StaffId::from("m1")).unwrap();
        let ids: Vec<&str> = entry.history.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["e2", "p1", "e1"]);
    }

    #[test]
    fn totals_and_balance() {
        let entry = compute_ledger(&snapshot(), &StaffId::from("m1")).unwrap();
        assert_eq!(entry.total_earned, Money::from_units(250));
        assert_eq!(entry.total_paid, Money::from_units(120));
        assert_eq!(entry.balance, Money::from_units(130));
        assert!(entry.is_debtor());
        assert_eq!(entry.open_earnings().count(), 1);
    }

    #[test]
    fn unknown_staff_has_no_ledger() {
        assert!(compute_ledger(&snapshot(), &StaffId::from("ghost")).is_none());
    }

    #[test]
    fn all_ledgers_sorted_by_balance() {
        let entries = compute_all_ledgers(&snapshot());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].staff_id, StaffId::from("m1"));
        assert_eq!(entries[1].staff_id, StaffId::from("m2"));
        assert_eq!(entries[1].balance, Money::from_units(-30));
    }

    #[test]
    fn duplicate_roster_rows_yield_one_ledger() {
        let mut snap = snapshot();
        snap.staff.push(snap.staff[0].clone());
        assert_eq!(compute_all_ledgers(&snap).len(), 2);
    }

    #[test]
    fn ledger_book_splits_debtors() {
        let book = LedgerBook::from_snapshot(&snapshot());
        assert_eq!(book.debtors().count(), 1);
        assert_eq!(book.settled().count(), 1);
        assert_eq!(book.total_debt(), Money::from_units(130));
        assert!(book.ledger_for(&StaffId::from("m2")).is_some());
    }

    #[test]
    fn ledger_item_serializes_with_type_tag() {
        let entry = compute_ledger(&snapshot(), &StaffId::from("m1")).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["history"][0]["type"], "payment");
        assert_eq!(json["history"][0]["coveredEvents"][1]["earningId"], "e2");
        assert_eq!(json["history"][1]["type"], "earning");
        assert_eq!(json["history"][1]["status"], "partial");
    }
}
