//! Ledger compilation: turn a snapshot into every derived view the API serves.
//!
//! Compilation is a pure function of the snapshot, so results are memoized by
//! the snapshot content key. An unchanged snapshot is never recompiled.

use crate::domain::{Snapshot, SnapshotKey};
use crate::engine::{compute_stats, GlobalStats, LedgerBook};

pub mod cache;

pub use cache::LedgerCache;

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledLedgers {
    /// Content key of the snapshot these ledgers were derived from.
    pub key: SnapshotKey,
    pub book: LedgerBook,
    pub stats: GlobalStats,
}

impl CompiledLedgers {
    /// Compile all ledgers and the global rollup for `snapshot`.
    pub fn compile(snapshot: &Snapshot) -> Self {
        Self::compile_with_key(snapshot, snapshot.content_key())
    }

    pub(crate) fn compile_with_key(snapshot: &Snapshot, key: SnapshotKey) -> Self {
        let book = LedgerBook::from_snapshot(snapshot);
        let stats = compute_stats(snapshot, book.entries());
        tracing::info!(
            key = %key,
            ledgers = book.entries().len(),
            debtors = stats.debtor_count,
            "Compiled ledgers"
        );
        Self { key, book, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Event, EventId, Money, Participation, StaffCategory, StaffId, StaffMember};
    use chrono::NaiveDate;

    #[test]
    fn test_compile_carries_snapshot_key() {
        let snapshot = Snapshot {
            staff: vec![StaffMember::new(StaffId::from("m1"), "Ana", StaffCategory::Musician)],
            events: vec![Event::new(
                EventId::from("e1"),
                "Gala",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .with_participation(Participation::new(
                StaffId::from("m1"),
                true,
                Money::from_units(100),
            ))],
            ..Snapshot::default()
        };

        let compiled = CompiledLedgers::compile(&snapshot);
        assert_eq!(compiled.key, snapshot.content_key());
        assert_eq!(compiled.book.entries().len(), 1);
        assert_eq!(compiled.stats.total_debt, Money::from_units(100));
        assert_eq!(compiled.book.total_debt(), compiled.stats.total_debt);
    }
}
