//! Business-wide rollups and per-event financials.

use super::earnings::is_valid_amount_due;
use super::ledger::LedgerEntry;
use crate::domain::{Event, EventId, Money, Snapshot};
use serde::Serialize;

/// Dashboard totals over the whole event/payment universe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    /// Client advances received on events.
    pub total_income: Money,
    /// Business expenses.
    pub total_expense: Money,
    /// Every valid payment made to staff, roster or not.
    pub total_paid_out: Money,
    /// Sum of positive staff balances.
    pub total_debt: Money,
    /// `total_income - total_expense - total_paid_out`.
    pub net_balance: Money,
    pub debtor_count: usize,
}

/// Roll up the snapshot. `ledgers` must be the ledgers of the same snapshot.
///
/// Out-of-range amounts are left out of every total.
pub fn compute_stats(snapshot: &Snapshot, ledgers: &[LedgerEntry]) -> GlobalStats {
    let total_income: Money = snapshot
        .events
        .iter()
        .map(|e| e.advance)
        .filter(|a| in_range("advance", a))
        .sum();
    let total_expense: Money = snapshot
        .expenses
        .iter()
        .map(|e| e.amount)
        .filter(|a| in_range("expense", a))
        .sum();
    let total_paid_out: Money = snapshot
        .payments
        .iter()
        .filter(|p| p.amount.is_positive() && p.amount.is_in_range())
        .map(|p| p.amount)
        .sum();

    let debtors: Vec<&LedgerEntry> = ledgers.iter().filter(|l| l.is_debtor()).collect();
    let total_debt: Money = debtors.iter().map(|l| l.balance).sum();

    GlobalStats {
        total_income,
        total_expense,
        total_paid_out,
        total_debt,
        net_balance: total_income - total_expense - total_paid_out,
        debtor_count: debtors.len(),
    }
}

/// Profitability of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFinancials {
    pub event_id: EventId,
    pub title: String,
    pub price: Money,
    pub advance: Money,
    /// Still to be collected from the client.
    pub outstanding: Money,
    /// Pay owed to staff who attended.
    pub staff_cost: Money,
    pub net_margin: Money,
    pub attended_count: usize,
}

/// Financials of one event. Staff cost counts the same participations that
/// produce earnings in the staff ledgers.
pub fn event_financials(event: &Event) -> EventFinancials {
    let attended: Vec<_> = event
        .participations
        .iter()
        .filter(|p| p.attended && is_valid_amount_due(p.amount_due))
        .collect();
    let staff_cost: Money = attended.iter().map(|p| p.amount_due).sum();

    let price = if in_range("price", &event.price) { event.price } else { Money::zero() };
    let advance = if in_range("advance", &event.advance) { event.advance } else { Money::zero() };

    EventFinancials {
        event_id: event.id.clone(),
        title: event.title.clone(),
        price,
        advance,
        outstanding: price - advance,
        staff_cost,
        net_margin: price - staff_cost,
        attended_count: attended.len(),
    }
}

fn in_range(field: &'static str, amount: &Money) -> bool {
    let ok = amount.is_in_range();
    if !ok {
        tracing::warn!(field, amount = %amount, "Ignoring out-of-range amount");
    }
    ok
}
