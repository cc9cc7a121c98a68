//! Account statement generation.
//!
//! A statement covers every movement across all of a client's accounts inside
//! an inclusive civil-day range (UTC). Rows come out in sequence order per
//! the stored chain; the running totals answer "how much moved in, how much
//! moved out" over the period:
//!
//! - `total_debits`: sum of absolute values of negative movements
//! - `total_credits`: sum of positive movements

use crate::error::{ReportError, ReportResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use corebank_persistence::{ClientRepo, PersistenceError, StatementTxRow, TransactionRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// One statement line: the transaction joined with its account context and
/// the period totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: DateTime<Utc>,
    pub client: String,
    pub account_number: String,
    pub account_type: String,
    pub initial_balance: Decimal,
    pub status: bool,
    /// Signed movement: positive for deposits, negative for withdrawals.
    pub movement: Decimal,
    /// Running balance after this movement.
    pub available_balance: Decimal,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
}

/// A generated statement for one client over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementReport {
    pub client_id: i64,
    pub client_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<StatementRow>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub generated_at: DateTime<Utc>,
}

/// Generate a statement for a client over an inclusive date range.
///
/// Both bounds are civil days in UTC: `start` opens at midnight and `end`
/// closes at the last representable instant of that day, so a movement
/// stamped anywhere on the end day is included.
pub async fn generate_statement(
    pool: &SqlitePool,
    client_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> ReportResult<StatementReport> {
    if start > end {
        return Err(ReportError::InvalidDateRange { start, end });
    }

    let client = match ClientRepo::get_by_id(pool, client_id).await {
        Ok(row) => row,
        Err(e) if e.is_not_found() => return Err(ReportError::ClientNotFound(client_id)),
        Err(e) => return Err(e.into()),
    };

    let range_start = start.and_time(NaiveTime::MIN).and_utc();
    let range_end =
        end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::nanoseconds(1);

    let raw = TransactionRepo::find_by_client_and_range(pool, client_id, range_start, range_end)
        .await?;

    let (total_debits, total_credits) = tally(&raw)?;

    let mut rows = Vec::with_capacity(raw.len());
    for tx in raw {
        rows.push(StatementRow {
            date: tx.date,
            client: tx.client_name,
            account_number: tx.account_number,
            account_type: tx.account_type,
            initial_balance: parse_decimal(&tx.initial_balance)?,
            status: tx.account_status,
            movement: parse_decimal(&tx.amount)?,
            available_balance: parse_decimal(&tx.balance)?,
            total_debits,
            total_credits,
        });
    }

    info!(client_id, rows = rows.len(), %total_debits, %total_credits, "statement generated");

    Ok(StatementReport {
        client_id,
        client_name: client.name,
        start,
        end,
        rows,
        total_debits,
        total_credits,
        generated_at: Utc::now(),
    })
}

/// Period totals over raw statement rows: (debits as a positive sum,
/// credits).
fn tally(rows: &[StatementTxRow]) -> ReportResult<(Decimal, Decimal)> {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    for row in rows {
        let amount = parse_decimal(&row.amount)?;
        if amount < Decimal::ZERO {
            debits += amount.abs();
        } else {
            credits += amount;
        }
    }
    Ok((debits, credits))
}

fn parse_decimal(value: &str) -> ReportResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|_| ReportError::Persistence(PersistenceError::InvalidDecimal(value.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(amount: &str, balance: &str) -> StatementTxRow {
        StatementTxRow {
            id: 1,
            account_id: 1,
            date: Utc::now(),
            tx_type: "Deposit".to_string(),
            amount: amount.to_string(),
            balance: balance.to_string(),
            account_number: "478758".to_string(),
            account_type: "Savings".to_string(),
            initial_balance: "100".to_string(),
            account_status: true,
            client_name: "Jose Lema".to_string(),
        }
    }

    #[test]
    fn tally_splits_debits_and_credits() {
        let rows = vec![raw("600", "700"), raw("-575", "125"), raw("150", "275")];
        let (debits, credits) = tally(&rows).unwrap();
        assert_eq!(debits, dec!(575));
        assert_eq!(credits, dec!(750));
    }

    #[test]
    fn tally_of_empty_period_is_zero() {
        let (debits, credits) = tally(&[]).unwrap();
        assert_eq!(debits, Decimal::ZERO);
        assert_eq!(credits, Decimal::ZERO);
    }

    #[test]
    fn malformed_amount_is_an_error() {
        let rows = vec![raw("not-a-number", "0")];
        assert!(tally(&rows).is_err());
    }
}
