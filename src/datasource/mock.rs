//! Mock snapshot source for testing without touching the filesystem.

use super::{DataSourceError, SnapshotSource};
use crate::domain::{Event, Expense, Payment, Snapshot, StaffMember};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock source that returns a predefined snapshot.
///
/// Clones share state, so a test can hand one clone to the app and keep
/// another to replace the snapshot between requests.
#[derive(Debug, Clone, Default)]
pub struct MockSnapshotSource {
    snapshot: Arc<Mutex<Snapshot>>,
    failure: Arc<Mutex<Option<DataSourceError>>>,
}

impl MockSnapshotSource {
    /// Create a new mock source with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source serving `snapshot`.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            failure: Arc::default(),
        }
    }

    pub fn with_staff(self, member: StaffMember) -> Self {
        self.update(|s| s.staff.push(member));
        self
    }

    pub fn with_event(self, event: Event) -> Self {
        self.update(|s| s.events.push(event));
        self
    }

    pub fn with_payment(self, payment: Payment) -> Self {
        self.update(|s| s.payments.push(payment));
        self
    }

    pub fn with_payments(self, payments: Vec<Payment>) -> Self {
        self.update(|s| s.payments.extend(payments));
        self
    }

    pub fn with_expense(self, expense: Expense) -> Self {
        self.update(|s| s.expenses.push(expense));
        self
    }

    /// Apply an edit to the served snapshot, as a write to the store would.
    pub fn update(&self, edit: impl FnOnce(&mut Snapshot)) {
        let mut guard = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        edit(&mut guard);
    }

    /// Make every subsequent fetch fail with `err`.
    pub fn fail_with(&self, err: DataSourceError) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(err);
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, DataSourceError> {
        if let Some(err) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(err);
        }
        Ok(self.snapshot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
