//! Collaborator contracts for the account core.
//!
//! The service talks to its ledger store, the transaction recorder, and the
//! account directory only through these traits, so tests substitute in-memory
//! fakes and production wires in Postgres and HTTP clients.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{Account, Direction};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("ledger store failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("recorder request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("recorder rejected append: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response from directory: {0}")]
    InvalidResponse(String),
}

/// Authoritative store of account balances, keyed by account number.
///
/// `put` is a last-writer-wins overwrite; the store offers no cross-account
/// atomicity. Callers that read-modify-write one account hold the key lock
/// from `lock` across the cycle to avoid lost updates between concurrent
/// operations on the same number.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn lock(&self, account_number: &str) -> OwnedMutexGuard<()>;

    async fn get(&self, account_number: &str) -> StoreResult<Option<Account>>;

    async fn put(&self, account: Account) -> StoreResult<Account>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}

/// Append-only log of movement legs, owned by the transaction service.
///
/// Appends happen after the balance change has committed; a failed append is
/// reported to the caller but the ledger is authoritative and never rolled
/// back because of it.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    async fn append(
        &self,
        account_number: &str,
        amount: &BigDecimal,
        direction: Direction,
        timestamp_millis: i64,
    ) -> Result<(), RecorderError>;
}

/// Maps a user identifier to the account number the user service generated
/// at registration. Number generation lives entirely on the other side of
/// this contract.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn resolve_account_number(&self, user_id: i64) -> Result<Option<String>, DirectoryError>;
}
