//! Snapshot source backed by a JSON export of the store.

use super::{DataSourceError, SnapshotSource};
use crate::domain::Snapshot;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads the whole snapshot from one JSON document on every fetch.
///
/// The document has the shape `{"events": [...], "payments": [...],
/// "staff": [...], "expenses": [...]}`; any missing collection is empty.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotSource {
    path: PathBuf,
}

impl JsonFileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, DataSourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DataSourceError::Io(format!("{}: {}", self.path.display(), e))
        })?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            path = %self.path.display(),
            events = snapshot.events.len(),
            payments = snapshot.payments.len(),
            staff = snapshot.staff.len(),
            expenses = snapshot.expenses.len(),
            "Loaded snapshot"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, PaymentKind, PaymentMethod, StaffId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = r#"{
        "staff": [{"id": "m1", "name": "Ana", "category": "musician", "role": "drums"}],
        "events": [{
            "id": "e1",
            "title": "Gala",
            "date": "2024-01-01",
            "price": 1000,
            "advance": 300.5,
            "participations": [{"staffId": "m1", "attended": true, "amountDue": 100}]
        }],
        "payments": [{
            "id": "p1",
            "staffId": "m1",
            "amount": 40.25,
            "date": "2024-01-03",
            "method": "transfer",
            "kind": "advance"
        }]
    }"#;

    #[tokio::test]
    async fn test_reads_export() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let source = JsonFileSnapshotSource::new(file.path());
        let snapshot = source.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.staff[0].role.as_deref(), Some("drums"));
        assert_eq!(snapshot.events[0].advance, Money::from_str_canonical("300.5").unwrap());
        assert_eq!(snapshot.events[0].participations[0].staff_id, StaffId::from("m1"));
        assert_eq!(snapshot.payments[0].method, Some(PaymentMethod::Transfer));
        assert_eq!(snapshot.payments[0].kind, PaymentKind::Advance);
        assert!(snapshot.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSnapshotSource::new(dir.path().join("absent.json"));
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, DataSourceError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"events\": 5}").unwrap();

        let source = JsonFileSnapshotSource::new(file.path());
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, DataSourceError::Parse(_)));
    }
}
