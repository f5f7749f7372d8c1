//! Postgres implementation of LedgerStore.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OwnedMutexGuard;

use super::KeyLocks;
use crate::domain::Account;
use crate::ports::{LedgerStore, StoreError, StoreResult};

/// Postgres-backed ledger store. One row per account number.
pub struct PostgresLedgerStore {
    pool: PgPool,
    locks: KeyLocks,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            locks: KeyLocks::default(),
        }
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn lock(&self, account_number: &str) -> OwnedMutexGuard<()> {
        self.locks.acquire(account_number).await
    }

    async fn get(&self, account_number: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT account_number, user_id, balance FROM accounts WHERE account_number = $1",
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(row.map(AccountRow::into_domain))
    }

    async fn put(&self, account: Account) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (account_number, user_id, balance)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_number)
            DO UPDATE SET user_id = EXCLUDED.user_id, balance = EXCLUDED.balance
            RETURNING account_number, user_id, balance
            "#,
        )
        .bind(&account.account_number)
        .bind(account.user_id)
        .bind(&account.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(row.into_domain())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    account_number: String,
    user_id: i64,
    balance: bigdecimal::BigDecimal,
}

impl AccountRow {
    fn into_domain(self) -> Account {
        Account {
            account_number: self.account_number,
            user_id: self.user_id,
            balance: self.balance,
        }
    }
}
