//! Earning classification after allocation.

use super::Earning;
use crate::domain::{EventId, Money};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningStatus {
    Paid,
    Partial,
    Unpaid,
}

impl EarningStatus {
    /// Classify from the earning amount and what is still outstanding.
    pub fn derive(amount: Money, remaining: Money) -> Self {
        if !remaining.is_positive() {
            EarningStatus::Paid
        } else if remaining < amount {
            EarningStatus::Partial
        } else {
            EarningStatus::Unpaid
        }
    }
}

impl std::fmt::Display for EarningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EarningStatus::Paid => write!(f, "paid"),
            EarningStatus::Partial => write!(f, "partial"),
            EarningStatus::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// An earning with its settlement status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEarning {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub status: EarningStatus,
    pub paid_amount: Money,
}

impl ClassifiedEarning {
    /// Amount still owed on this earning.
    pub fn outstanding(&self) -> Money {
        self.amount - self.paid_amount
    }
}

impl From<&Earning> for ClassifiedEarning {
    fn from(earning: &Earning) -> Self {
        ClassifiedEarning {
            id: earning.id.clone(),
            title: earning.title.clone(),
            date: earning.date,
            amount: earning.amount,
            status: EarningStatus::derive(earning.amount, earning.remaining),
            paid_amount: earning.amount - earning.remaining,
        }
    }
}
