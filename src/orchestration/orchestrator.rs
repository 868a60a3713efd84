use crate::compile::{CompiledLedgers, LedgerCache};
use crate::datasource::{DataSourceError, SnapshotSource};
use crate::domain::{EventId, PaymentMethod, Snapshot, StaffId};
use crate::engine::{
    build_journal, event_financials, plan_advance, plan_settlement, EventFinancials,
    JournalEntry, JournalFilter, PaymentDraft, SettlementError,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Ties a snapshot source to the ledger cache.
///
/// Every call reads a fresh snapshot, so corrections in the store show up on
/// the next request; the cache only skips recompiling an unchanged snapshot.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    source: Arc<dyn SnapshotSource>,
    cache: Arc<LedgerCache>,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn SnapshotSource>, cache: Arc<LedgerCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &LedgerCache {
        &self.cache
    }

    pub async fn snapshot(&self) -> Result<Snapshot, OrchestrationError> {
        Ok(self.source.fetch_snapshot().await?)
    }

    /// Ledgers and stats of the current snapshot.
    pub async fn compiled(&self) -> Result<Arc<CompiledLedgers>, OrchestrationError> {
        let snapshot = self.snapshot().await?;
        Ok(self.cache.get_or_compile(&snapshot).await)
    }

    pub async fn event_financials(
        &self,
        event_id: &EventId,
    ) -> Result<Option<EventFinancials>, OrchestrationError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot
            .events
            .iter()
            .find(|e| &e.id == event_id)
            .map(event_financials))
    }

    pub async fn journal(
        &self,
        filter: &JournalFilter,
    ) -> Result<Vec<JournalEntry>, OrchestrationError> {
        let snapshot = self.snapshot().await?;
        Ok(build_journal(&snapshot, filter))
    }

    /// Plan a settlement against the current ledger of `staff_id`.
    pub async fn plan_settlement(
        &self,
        staff_id: &StaffId,
        selection: &[EventId],
        method: PaymentMethod,
        today: NaiveDate,
    ) -> Result<PaymentDraft, OrchestrationError> {
        let compiled = self.compiled().await?;
        let entry = compiled
            .book
            .ledger_for(staff_id)
            .ok_or_else(|| SettlementError::UnknownStaff(staff_id.clone()))?;
        Ok(plan_settlement(entry, selection, method, today, &compiled.key)?)
    }

    /// Plan a manual advance for `staff_id` from user-entered amount text.
    pub async fn plan_advance(
        &self,
        staff_id: &StaffId,
        raw_amount: &str,
        method: PaymentMethod,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<PaymentDraft, OrchestrationError> {
        let compiled = self.compiled().await?;
        let entry = compiled
            .book
            .ledger_for(staff_id)
            .ok_or_else(|| SettlementError::UnknownStaff(staff_id.clone()))?;
        Ok(plan_advance(entry, raw_amount, method, note, today, &compiled.key)?)
    }
}

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error(transparent)]
    Source(#[from] DataSourceError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}
