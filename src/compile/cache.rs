//! Snapshot-keyed memoization of compiled ledgers.

use super::CompiledLedgers;
use crate::domain::Snapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the ledgers of the most recently compiled snapshot.
///
/// Readers of the same snapshot share one `Arc<CompiledLedgers>`. A miss
/// compiles without holding the lock, so a slow compile never blocks hits.
#[derive(Debug)]
pub struct LedgerCache {
    enabled: bool,
    slot: RwLock<Option<Arc<CompiledLedgers>>>,
    compilations: AtomicU64,
}

impl LedgerCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            slot: RwLock::new(None),
            compilations: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of compilations performed so far.
    pub fn compilations(&self) -> u64 {
        self.compilations.load(Ordering::Relaxed)
    }

    /// Return the compiled ledgers for `snapshot`, compiling on a miss.
    pub async fn get_or_compile(&self, snapshot: &Snapshot) -> Arc<CompiledLedgers> {
        let key = snapshot.content_key();

        if self.enabled {
            let slot = self.slot.read().await;
            if let Some(compiled) = slot.as_ref().filter(|c| c.key == key) {
                tracing::debug!(key = %key, "Ledger cache hit");
                return Arc::clone(compiled);
            }
        }

        let compiled = Arc::new(CompiledLedgers::compile_with_key(snapshot, key));
        self.compilations.fetch_add(1, Ordering::Relaxed);

        if self.enabled {
            let mut slot = self.slot.write().await;
            *slot = Some(Arc::clone(&compiled));
        }

        compiled
    }

    /// Drop whatever is cached.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

impl Default for LedgerCache {
    fn default() -> Self {
        Self::new(true)
    }
}
