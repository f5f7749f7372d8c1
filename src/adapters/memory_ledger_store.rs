//! In-memory implementation of LedgerStore.
//! Backs the test suite and local runs that have no Postgres around.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::KeyLocks;
use crate::domain::Account;
use crate::ports::{LedgerStore, StoreResult};

#[derive(Default)]
pub struct MemoryLedgerStore {
    accounts: Mutex<HashMap<String, Account>>,
    locks: KeyLocks,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn lock(&self, account_number: &str) -> OwnedMutexGuard<()> {
        self.locks.acquire(account_number).await
    }

    async fn get(&self, account_number: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(accounts.get(account_number).cloned())
    }

    async fn put(&self, account: Account) -> StoreResult<Account> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.insert(account.account_number.clone(), account.clone());
        Ok(account)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
