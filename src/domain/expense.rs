//! Business expenses. Not owed to anyone; they only feed stats and the journal.

use crate::domain::{EventId, ExpenseId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Transport,
    Food,
    Equipment,
    Marketing,
    Administrative,
    Other,
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Administrative => "administrative",
            ExpenseCategory::Other => "other",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub concept: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        concept: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            concept: concept.into(),
            amount,
            category,
            event_id: None,
            date,
        }
    }
}
