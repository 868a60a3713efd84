//! Immutable input bundle for one ledger computation.

use crate::domain::{Event, Expense, Payment, StaffId, StaffMember};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Content key of a snapshot: hex SHA-256 over its canonical serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotKey(pub String);

impl SnapshotKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A consistent view of the external stores. Collection order carries no
/// meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    pub fn staff_member(&self, staff_id: &StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| &s.id == staff_id)
    }

    pub fn roster_ids(&self) -> HashSet<&StaffId> {
        self.staff.iter().map(|s| &s.id).collect()
    }

    /// Compute the content key.
    ///
    /// Each collection is sorted by id before hashing, so the same records
    /// delivered in a different store order share a key.
    pub fn content_key(&self) -> SnapshotKey {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        let mut payments: Vec<&Payment> = self.payments.iter().collect();
        payments.sort_by(|a, b| a.id.cmp(&b.id));
        let mut staff: Vec<&StaffMember> = self.staff.iter().collect();
        staff.sort_by(|a, b| a.id.cmp(&b.id));
        let mut expenses: Vec<&Expense> = self.expenses.iter().collect();
        expenses.sort_by(|a, b| a.id.cmp(&b.id));

        fn hash_section<T: Serialize>(hasher: &mut Sha256, tag: &str, records: &[T]) {
            hasher.update((tag.len() as u32).to_le_bytes());
            hasher.update(tag.as_bytes());
            let bytes = serde_json::to_vec(records).unwrap_or_default();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }

        // The JSON form carries amounts as f64; hash their exact text too.
        let amounts: Vec<String> = events
            .iter()
            .flat_map(|e| {
                [e.price, e.advance]
                    .into_iter()
                    .chain(e.participations.iter().map(|p| p.amount_due))
            })
            .chain(payments.iter().map(|p| p.amount))
            .chain(expenses.iter().map(|x| x.amount))
            .map(|a| a.to_canonical_string())
            .collect();

        let mut hasher = Sha256::new();
        hash_section(&mut hasher, "events", &events);
        hash_section(&mut hasher, "payments", &payments);
        hash_section(&mut hasher, "staff", &staff);
        hash_section(&mut hasher, "expenses", &expenses);
        hash_section(&mut hasher, "amounts", &amounts);

        SnapshotKey(hex::encode(hasher.finalize()))
    }
}
