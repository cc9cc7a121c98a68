//! Transaction - one movement on an account.
//!
//! Amounts are sign-normalized by kind: deposits are stored non-negative,
//! withdrawals non-positive, whatever sign the caller supplied. `balance` is
//! the account's running total immediately after this transaction and is
//! written exclusively by the balance engine.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Movement kind, determines the stored sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            other => Err(CoreError::UnknownTransactionKind(other.to_string())),
        }
    }

    /// Force the sign of `amount` to match the kind.
    pub fn normalize(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount.abs(),
            TransactionKind::Withdrawal => -amount.abs(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ledger movement. Ordered by `(date, id)`; the id is assigned by the
/// store at insert and serves as the deterministic tie-break for equal
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the store on insert; 0 until then.
    pub id: i64,
    pub account_id: i64,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    /// Normalized amount (deposit >= 0, withdrawal <= 0).
    pub amount: Decimal,
    /// Running balance immediately after this transaction.
    pub balance: Decimal,
}

impl Transaction {
    /// New movement with a raw caller-supplied amount. The balance engine
    /// normalizes the amount and computes `balance` before persisting.
    pub fn new(account_id: i64, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: 0,
            account_id,
            date: Utc::now(),
            kind,
            amount,
            balance: Decimal::ZERO,
        }
    }

    /// Total order within an account: timestamp, then insertion id.
    pub fn sequence_key(&self) -> (DateTime<Utc>, i64) {
        (self.date, self.id)
    }

    pub fn cmp_sequence(&self, other: &Self) -> Ordering {
        self.sequence_key().cmp(&other.sequence_key())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {} ({} {} -> balance {})",
            self.id, self.kind, self.amount, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn deposit_normalizes_to_non_negative() {
        assert_eq!(TransactionKind::Deposit.normalize(dec!(100)), dec!(100));
        assert_eq!(TransactionKind::Deposit.normalize(dec!(-100)), dec!(100));
        assert_eq!(TransactionKind::Deposit.normalize(dec!(0)), dec!(0));
    }

    #[test]
    fn withdrawal_normalizes_to_non_positive() {
        assert_eq!(TransactionKind::Withdrawal.normalize(dec!(30)), dec!(-30));
        assert_eq!(TransactionKind::Withdrawal.normalize(dec!(-30)), dec!(-30));
    }

    #[test]
    fn kind_codec_round_trips() {
        assert_eq!(
            TransactionKind::parse("deposit").unwrap(),
            TransactionKind::Deposit
        );
        assert_eq!(
            TransactionKind::parse("WITHDRAWAL").unwrap(),
            TransactionKind::Withdrawal
        );
        assert!(TransactionKind::parse("transfer").is_err());
    }

    #[test]
    fn sequence_key_breaks_timestamp_ties_by_id() {
        let date = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let mut a = Transaction::new(1, TransactionKind::Deposit, dec!(10));
        let mut b = Transaction::new(1, TransactionKind::Deposit, dec!(20));
        a.date = date;
        b.date = date;
        a.id = 7;
        b.id = 3;
        assert_eq!(a.cmp_sequence(&b), Ordering::Greater);
    }
}
