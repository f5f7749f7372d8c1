//! The money-movement core: validates requests, mutates balances in the
//! ledger store, and fans out transaction records to the recorder.
//!
//! There is no distributed transaction here. The two puts of a transfer and
//! the recorder appends are independent steps; a crash between them leaves a
//! partially applied movement visible. That window is part of the service's
//! contract (the ledger is authoritative, the record log is best-effort) and
//! closing it (outbox, saga) is future work.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::domain::{Account, Direction};
use crate::error::AppError;
use crate::ports::{AccountDirectory, LedgerStore, TransactionRecorder};
use crate::validation;

pub struct AccountService {
    ledger: Arc<dyn LedgerStore>,
    recorder: Arc<dyn TransactionRecorder>,
    directory: Arc<dyn AccountDirectory>,
}

impl AccountService {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        recorder: Arc<dyn TransactionRecorder>,
        directory: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            ledger,
            recorder,
            directory,
        }
    }

    /// Opens an account for a registered user. The account number comes from
    /// the directory; this service never generates one, so a missing or
    /// empty number fails the whole creation.
    pub async fn create_account(&self, user_id: i64) -> Result<Account, AppError> {
        tracing::info!(user_id, "creating account");

        let number = self
            .directory
            .resolve_account_number(user_id)
            .await
            .map_err(|err| {
                tracing::error!(user_id, error = %err, "directory lookup failed");
                AppError::DirectoryLookup(format!("lookup for user {user_id} failed: {err}"))
            })?
            .ok_or_else(|| {
                tracing::error!(user_id, "directory returned no account number");
                AppError::DirectoryLookup(format!("no account number for user {user_id}"))
            })?;
        tracing::info!(account_number = %number, "fetched account number from directory");

        let _guard = self.ledger.lock(&number).await;
        let saved = self.ledger.put(Account::open(number, user_id)).await?;
        tracing::info!(account_number = %saved.account_number, "saved new account");

        Ok(saved)
    }

    /// Adds money to an account and records one credit leg.
    pub async fn credit(
        &self,
        account_number: &str,
        amount: &BigDecimal,
    ) -> Result<Account, AppError> {
        tracing::info!(account_number, %amount, "adding money");
        check_account_number(account_number)?;

        let _guard = self.ledger.lock(account_number).await;
        let mut account = self.get_existing(account_number).await?;
        check_positive_amount(amount)?;

        account.balance = &account.balance + amount;
        let updated = self.ledger.put(account).await?;
        tracing::info!(account_number, balance = %updated.balance, "updated balance");

        self.record(account_number, amount, Direction::Credit).await;

        Ok(updated)
    }

    /// Moves money between two accounts and records a debit and a credit leg.
    /// Returns the updated sender.
    ///
    /// Precondition failures are reported in a fixed order: sender format,
    /// receiver format, sender existence, receiver existence, amount
    /// positivity, then balance sufficiency.
    pub async fn transfer(
        &self,
        sender_number: &str,
        receiver_number: &str,
        amount: &BigDecimal,
    ) -> Result<Account, AppError> {
        tracing::info!(sender_number, receiver_number, %amount, "initiating money transfer");
        check_account_number(sender_number)?;
        check_account_number(receiver_number)?;

        // Key locks are taken in lexicographic order so two opposing
        // transfers cannot deadlock; equal numbers take a single lock.
        let (first, second) = if sender_number <= receiver_number {
            (sender_number, receiver_number)
        } else {
            (receiver_number, sender_number)
        };
        let _first_guard = self.ledger.lock(first).await;
        let _second_guard = if first == second {
            None
        } else {
            Some(self.ledger.lock(second).await)
        };

        let mut sender = self.ledger.get(sender_number).await?.ok_or_else(|| {
            tracing::error!(sender_number, "sender account not found");
            AppError::AccountNotFound(format!("sender account {sender_number}"))
        })?;
        let mut receiver = self.ledger.get(receiver_number).await?.ok_or_else(|| {
            tracing::error!(receiver_number, "receiver account not found");
            AppError::AccountNotFound(format!("receiver account {receiver_number}"))
        })?;

        check_positive_amount(amount)?;

        if sender.balance < *amount {
            tracing::error!(sender_number, balance = %sender.balance, "insufficient balance in sender account");
            return Err(AppError::InsufficientFunds(format!(
                "sender account {sender_number} holds {} but {amount} was requested",
                sender.balance
            )));
        }

        let updated_sender = if sender_number == receiver_number {
            // Both legs land on the same account and net to zero; a single
            // put keeps the balance intact while both records still go out.
            self.ledger.put(sender).await?
        } else {
            sender.balance = &sender.balance - amount;
            receiver.balance = &receiver.balance + amount;
            // Two independent puts. A crash between them leaves the sender
            // debited and the receiver not yet credited.
            let updated_sender = self.ledger.put(sender).await?;
            self.ledger.put(receiver).await?;
            updated_sender
        };
        tracing::info!(sender_number, balance = %updated_sender.balance, "transfer applied");

        self.record(sender_number, amount, Direction::Debit).await;
        self.record(receiver_number, amount, Direction::Credit).await;

        Ok(updated_sender)
    }

    /// Returns the current balance without side effects.
    pub async fn view_balance(&self, account_number: &str) -> Result<BigDecimal, AppError> {
        tracing::info!(account_number, "retrieving balance");
        check_account_number(account_number)?;

        let account = self.get_existing(account_number).await?;
        Ok(account.balance)
    }

    async fn get_existing(&self, account_number: &str) -> Result<Account, AppError> {
        self.ledger.get(account_number).await?.ok_or_else(|| {
            tracing::error!(account_number, "account not found");
            AppError::AccountNotFound(account_number.to_string())
        })
    }

    /// Best-effort append. The balance change has already committed; a
    /// failed append is logged and never unwinds the ledger.
    async fn record(&self, account_number: &str, amount: &BigDecimal, direction: Direction) {
        let timestamp = Utc::now().timestamp_millis();
        match self
            .recorder
            .append(account_number, amount, direction, timestamp)
            .await
        {
            Ok(()) => {
                tracing::info!(account_number, %direction, "transaction recorded");
            }
            Err(err) => {
                tracing::warn!(
                    account_number,
                    %direction,
                    error = %err,
                    "failed to record transaction; ledger not rolled back"
                );
            }
        }
    }
}

fn check_account_number(account_number: &str) -> Result<(), AppError> {
    validation::validate_account_number(account_number).map_err(|_| {
        tracing::error!(account_number, "invalid account number");
        AppError::InvalidAccountNumber(account_number.to_string())
    })
}

fn check_positive_amount(amount: &BigDecimal) -> Result<(), AppError> {
    validation::validate_positive_amount(amount).map_err(|_| {
        tracing::error!(%amount, "invalid amount");
        AppError::InvalidAmount(amount.to_string())
    })
}
