//! Snapshot sources: where the engine's read-only view of the store comes from.

use crate::domain::Snapshot;
use async_trait::async_trait;
use std::fmt;

pub mod json_file;
pub mod mock;

pub use json_file::JsonFileSnapshotSource;
pub use mock::MockSnapshotSource;

/// Provider of a consistent snapshot of events, payments, staff and expenses.
///
/// Implementations must return a single consistent view per call; the engine
/// never observes a half-applied write.
#[async_trait]
pub trait SnapshotSource: Send + Sync + fmt::Debug {
    /// Fetch the current snapshot.
    async fn fetch_snapshot(&self) -> Result<Snapshot, DataSourceError>;
}

/// Error type for snapshot source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// The backing store could not be read
    Io(String),
    /// The store was read but its contents are malformed
    Parse(String),
    /// The source is temporarily not serving snapshots
    Unavailable(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::Io(msg) => write!(f, "IO error: {}", msg),
            DataSourceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::Unavailable(msg) => write!(f, "Source unavailable: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

impl From<std::io::Error> for DataSourceError {
    fn from(err: std::io::Error) -> Self {
        DataSourceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataSourceError {
    fn from(err: serde_json::Error) -> Self {
        DataSourceError::Parse(err.to_string())
    }
}
