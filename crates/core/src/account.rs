//! Account - a client's ledger account.
//!
//! `initial_balance` is the anchor of the running-balance chain: the first
//! transaction's balance is derived from it, and the balance engine never
//! writes it back.

use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "checking" => Ok(AccountType::Checking),
            other => Err(CoreError::UnknownAccountType(other.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger account. `status == false` means soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store on insert; 0 until then.
    pub id: i64,
    pub account_number: String,
    pub account_type: AccountType,
    /// Balance before the first transaction. Immutable once transactions
    /// exist; read-only input to the balance engine.
    pub initial_balance: Decimal,
    pub status: bool,
    pub client_id: i64,
}

impl Account {
    /// New active account, not yet persisted.
    pub fn new(
        account_number: &str,
        account_type: AccountType,
        initial_balance: Decimal,
        client_id: i64,
    ) -> Self {
        Self {
            id: 0,
            account_number: account_number.to_string(),
            account_type,
            initial_balance,
            status: true,
            client_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status
    }

    /// Soft delete.
    pub fn deactivate(&mut self) {
        self.status = false;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} ({}, {}, initial {})",
            self.id, self.account_number, self.account_type, self.initial_balance
        )
    }
}
