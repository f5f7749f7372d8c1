//! Account domain entity.
//! Framework-agnostic representation of one ledger account.

use bigdecimal::BigDecimal;
use serde::Serialize;

/// Domain entity representing an account in the ledger.
///
/// The account number and owning user are immutable once assigned; only the
/// balance changes, and only through the account service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    pub user_id: i64,
    pub balance: BigDecimal,
}

impl Account {
    /// A freshly opened account always starts with a zero balance.
    pub fn open(account_number: String, user_id: i64) -> Self {
        Self {
            account_number,
            user_id,
            balance: BigDecimal::from(0),
        }
    }
}
