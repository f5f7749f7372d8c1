use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

pub mod memory_ledger_store;
pub mod postgres_ledger_store;

pub use memory_ledger_store::MemoryLedgerStore;
pub use postgres_ledger_store::PostgresLedgerStore;

/// Per-account-number async locks handed out to callers that need a
/// serialized read-modify-write over one account.
///
/// Scope is the current process; a multi-instance deployment needs the
/// serialization moved into the backing store (row locks or versioned puts).
#[derive(Default)]
pub(crate) struct KeyLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyLocks {
    pub(crate) async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        slot.lock_owned().await
    }
}
