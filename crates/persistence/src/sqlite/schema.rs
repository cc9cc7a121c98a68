//! Row types for sqlx mapping from SQLite tables.
//!
//! Decimals are stored as TEXT and parsed on read; timestamps go through the
//! sqlx chrono support. Conversions to domain types are fallible because TEXT
//! columns can hold anything.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use corebank_core::{Account, AccountType, Client, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row type for the `clients` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub identification: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub password: String,
    pub status: bool,
}

/// Row type for the `accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: i64,
    pub account_number: String,
    pub account_type: String,
    pub initial_balance: String, // Decimal stored as TEXT
    pub status: bool,
    pub client_id: i64,
}

/// Row type for the `transactions` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub account_id: i64,
    pub date: DateTime<Utc>,
    pub tx_type: String,
    pub amount: String,  // Decimal stored as TEXT
    pub balance: String, // Decimal stored as TEXT
}

/// Statement query row: a transaction joined with its account and client.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct StatementTxRow {
    pub id: i64,
    pub account_id: i64,
    pub date: DateTime<Utc>,
    pub tx_type: String,
    pub amount: String,
    pub balance: String,
    pub account_number: String,
    pub account_type: String,
    pub initial_balance: String,
    pub account_status: bool,
    pub client_name: String,
}

pub(crate) fn parse_decimal(value: &str) -> PersistenceResult<Decimal> {
    Decimal::from_str(value).map_err(|_| PersistenceError::InvalidDecimal(value.to_string()))
}

// === Conversion implementations ===

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            gender: row.gender,
            age: row.age,
            identification: row.identification,
            address: row.address,
            phone: row.phone,
            password: row.password,
            status: row.status,
        }
    }
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            gender: client.gender.clone(),
            age: client.age,
            identification: client.identification.clone(),
            address: client.address.clone(),
            phone: client.phone.clone(),
            password: client.password.clone(),
            status: client.status,
        }
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> PersistenceResult<Self> {
        let account_type = AccountType::parse(&row.account_type).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "account_type",
                value: row.account_type.clone(),
            }
        })?;

        Ok(Account {
            id: row.id,
            account_number: row.account_number,
            account_type,
            initial_balance: parse_decimal(&row.initial_balance)?,
            status: row.status,
            client_id: row.client_id,
        })
    }
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            account_number: account.account_number.clone(),
            account_type: account.account_type.as_str().to_string(),
            initial_balance: account.initial_balance.to_string(),
            status: account.status,
            client_id: account.client_id,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> PersistenceResult<Self> {
        let kind = TransactionKind::parse(&row.tx_type).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "tx_type",
                value: row.tx_type.clone(),
            }
        })?;

        Ok(Transaction {
            id: row.id,
            account_id: row.account_id,
            date: row.date,
            kind,
            amount: parse_decimal(&row.amount)?,
            balance: parse_decimal(&row.balance)?,
        })
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            account_id: tx.account_id,
            date: tx.date,
            tx_type: tx.kind.as_str().to_string(),
            amount: tx.amount.to_string(),
            balance: tx.balance.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn transaction_row_round_trips_through_text_decimals() {
        let mut tx = Transaction::new(3, TransactionKind::Withdrawal, dec!(-575.25));
        tx.id = 9;
        tx.balance = dec!(1424.75);

        let row = TransactionRow::from(&tx);
        assert_eq!(row.amount, "-575.25");

        let back = Transaction::try_from(row).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn bad_enum_value_is_reported_with_field() {
        let row = TransactionRow {
            id: 1,
            account_id: 1,
            date: Utc::now(),
            tx_type: "transfer".to_string(),
            amount: "10".to_string(),
            balance: "10".to_string(),
        };
        let err = Transaction::try_from(row).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::InvalidEnumValue { field: "tx_type", .. }
        ));
    }

    #[test]
    fn bad_decimal_is_rejected() {
        assert!(parse_decimal("not-a-number").is_err());
        assert_eq!(parse_decimal("2000").unwrap(), dec!(2000));
    }
}
