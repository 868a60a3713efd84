//! Flat journal of every money movement: client advances in, staff payments
//! and expenses out.

use crate::domain::{Money, Snapshot};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalFlow {
    Income,
    Expense,
}

impl std::fmt::Display for JournalFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalFlow::Income => write!(f, "income"),
            JournalFlow::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub amount: Money,
    pub flow: JournalFlow,
    pub category: String,
}

/// Which rows to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalFilter {
    /// Case-insensitive substring over title and category.
    pub search: Option<String>,
    /// `None` keeps both flows.
    pub flow: Option<JournalFlow>,
}

impl JournalFilter {
    fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(flow) = self.flow {
            if entry.flow != flow {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                entry.title.to_lowercase().contains(&needle)
                    || entry.category.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

impl FromStr for JournalFlow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(JournalFlow::Income),
            "expense" => Ok(JournalFlow::Expense),
            _ => Err(()),
        }
    }
}

/// Build the journal, newest first (ties by id), then apply `filter`.
pub fn build_journal(snapshot: &Snapshot, filter: &JournalFilter) -> Vec<JournalEntry> {
    let names: HashMap<&str, &str> = snapshot
        .staff
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();

    let income = snapshot
        .events
        .iter()
        .filter(|e| e.advance.is_positive() && e.advance.is_in_range())
        .map(|e| JournalEntry {
            id: format!("income-{}", e.id),
            date: e.date,
            title: e.title.clone(),
            amount: e.advance,
            flow: JournalFlow::Income,
            category: "Event".to_string(),
        });

    let payments = snapshot
        .payments
        .iter()
        .filter(|p| p.amount.is_positive() && p.amount.is_in_range())
        .map(|p| JournalEntry {
            id: format!("pay-{}", p.id),
            date: p.date,
            title: format!(
                "Payment: {}",
                names.get(p.staff_id.as_str()).copied().unwrap_or("Unknown staff")
            ),
            amount: p.amount,
            flow: JournalFlow::Expense,
            category: "Staff".to_string(),
        });

    let expenses = snapshot
        .expenses
        .iter()
        .filter(|x| x.amount.is_in_range())
        .map(|x| JournalEntry {
            id: format!("exp-{}", x.id),
            date: x.date,
            title: x.concept.clone(),
            amount: x.amount,
            flow: JournalFlow::Expense,
            category: x.category.to_string(),
        });

    let mut entries: Vec<JournalEntry> = income
        .chain(payments)
        .chain(expenses)
        .filter(|e| filter.matches(e))
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    entries
}

/// Render journal rows as CSV with a header line.
///
/// # Errors
/// Returns an error if the CSV writer fails.
pub fn journal_to_csv(entries: &[JournalEntry]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "date", "title", "amount", "flow", "category"])?;
    for entry in entries {
        writer.write_record(&[
            entry.id.clone(),
            entry.date.format("%Y-%m-%d").to_string(),
            entry.title.clone(),
            entry.amount.to_canonical_string(),
            entry.flow.to_string(),
            entry.category.clone(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
