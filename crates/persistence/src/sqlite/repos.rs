//! Repository implementations for SQLite.
//!
//! Every method is generic over [`sqlx::SqliteExecutor`], so the same query
//! runs against the pool for plain reads or against `&mut *tx` inside a
//! `sqlx::Transaction` when the balance engine needs its scoped atomic unit
//! of work. Transaction queries always order by `(date, id)` - the id is the
//! tie-break that keeps recalculation deterministic under equal timestamps.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountRow, ClientRow, StatementTxRow, TransactionRow};
use chrono::{DateTime, Utc};
use corebank_core::{Account, Client, Transaction};
use sqlx::SqliteExecutor;

// ============================================================================
// Client Repository
// ============================================================================

/// Repository for the `clients` table
pub struct ClientRepo;

impl ClientRepo {
    pub async fn insert<'e, E>(exec: E, client: &Client) -> PersistenceResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO clients (name, gender, age, identification, address, phone, password, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.name)
        .bind(&client.gender)
        .bind(client.age)
        .bind(&client.identification)
        .bind(&client.address)
        .bind(&client.phone)
        .bind(&client.password)
        .bind(client.status)
        .execute(exec)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id<'e, E>(exec: E, id: i64) -> PersistenceResult<ClientRow>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Client", id))
    }

    pub async fn get_all<'e, E>(exec: E) -> PersistenceResult<Vec<ClientRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, ClientRow>("SELECT * FROM clients ORDER BY id")
            .fetch_all(exec)
            .await?;
        Ok(rows)
    }

    pub async fn update<'e, E>(exec: E, client: &Client) -> PersistenceResult<()>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = ?, gender = ?, age = ?, identification = ?,
                address = ?, phone = ?, password = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&client.name)
        .bind(&client.gender)
        .bind(client.age)
        .bind(&client.identification)
        .bind(&client.address)
        .bind(&client.phone)
        .bind(&client.password)
        .bind(client.status)
        .bind(client.id)
        .execute(exec)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Client", client.id));
        }
        Ok(())
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the `accounts` table
pub struct AccountRepo;

impl AccountRepo {
    pub async fn insert<'e, E>(exec: E, account: &Account) -> PersistenceResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (account_number, account_type, initial_balance, status, client_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.account_number)
        .bind(account.account_type.as_str())
        .bind(account.initial_balance.to_string())
        .bind(account.status)
        .bind(account.client_id)
        .execute(exec)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id<'e, E>(exec: E, id: i64) -> PersistenceResult<AccountRow>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    pub async fn get_all<'e, E>(exec: E) -> PersistenceResult<Vec<AccountRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts ORDER BY id")
            .fetch_all(exec)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_client<'e, E>(exec: E, client_id: i64) -> PersistenceResult<Vec<AccountRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE client_id = ? ORDER BY id",
        )
        .bind(client_id)
        .fetch_all(exec)
        .await?;
        Ok(rows)
    }

    pub async fn update<'e, E>(exec: E, account: &Account) -> PersistenceResult<()>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET account_number = ?, account_type = ?, initial_balance = ?, status = ?, client_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.account_number)
        .bind(account.account_type.as_str())
        .bind(account.initial_balance.to_string())
        .bind(account.status)
        .bind(account.client_id)
        .bind(account.id)
        .execute(exec)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", account.id));
        }
        Ok(())
    }
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Repository for the `transactions` table
pub struct TransactionRepo;

impl TransactionRepo {
    pub async fn insert<'e, E>(exec: E, tx: &Transaction) -> PersistenceResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, date, tx_type, amount, balance)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(tx.account_id)
        .bind(tx.date)
        .bind(tx.kind.as_str())
        .bind(tx.amount.to_string())
        .bind(tx.balance.to_string())
        .execute(exec)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id<'e, E>(exec: E, id: i64) -> PersistenceResult<TransactionRow>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Transaction", id))
    }

    /// All transactions of an account in sequence order.
    pub async fn list_by_account<'e, E>(
        exec: E,
        account_id: i64,
    ) -> PersistenceResult<Vec<TransactionRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_id = ? ORDER BY date ASC, id ASC",
        )
        .bind(account_id)
        .fetch_all(exec)
        .await?;
        Ok(rows)
    }

    /// The most recent transaction of an account, if any.
    pub async fn latest_for_account<'e, E>(
        exec: E,
        account_id: i64,
    ) -> PersistenceResult<Option<TransactionRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_id = ? ORDER BY date DESC, id DESC LIMIT 1",
        )
        .bind(account_id)
        .fetch_optional(exec)
        .await?;
        Ok(row)
    }

    /// Rewrite a transaction's mutable fields (date, kind, amount, balance).
    pub async fn update<'e, E>(exec: E, tx: &Transaction) -> PersistenceResult<()>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE transactions SET date = ?, tx_type = ?, amount = ?, balance = ? WHERE id = ?",
        )
        .bind(tx.date)
        .bind(tx.kind.as_str())
        .bind(tx.amount.to_string())
        .bind(tx.balance.to_string())
        .bind(tx.id)
        .execute(exec)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Transaction", tx.id));
        }
        Ok(())
    }

    pub async fn delete<'e, E>(exec: E, id: i64) -> PersistenceResult<()>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Transaction", id));
        }
        Ok(())
    }

    /// All transactions of a client's accounts inside a closed instant range,
    /// joined with account and client fields for statement rendering.
    pub async fn find_by_client_and_range<'e, E>(
        exec: E,
        client_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PersistenceResult<Vec<StatementTxRow>>
    where
        E: SqliteExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, StatementTxRow>(
            r#"
            SELECT t.id, t.account_id, t.date, t.tx_type, t.amount, t.balance,
                   a.account_number, a.account_type, a.initial_balance,
                   a.status AS account_status, c.name AS client_name
            FROM transactions t
            JOIN accounts a ON a.id = t.account_id
            JOIN clients c ON c.id = a.client_id
            WHERE c.id = ? AND t.date BETWEEN ? AND ?
            ORDER BY t.date ASC, t.id ASC
            "#,
        )
        .bind(client_id)
        .bind(start)
        .bind(end)
        .fetch_all(exec)
        .await?;
        Ok(rows)
    }

    pub async fn count<'e, E>(exec: E) -> PersistenceResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(exec)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::{Duration, TimeZone};
    use corebank_core::{AccountType, TransactionKind};
    use rust_decimal_macros::dec;

    async fn seeded_account(db: &Database) -> i64 {
        let client_id = ClientRepo::insert(db.pool(), &Client::new("Jose Lema", "1712345678", "1234"))
            .await
            .unwrap();
        AccountRepo::insert(
            db.pool(),
            &Account::new("478758", AccountType::Savings, dec!(2000), client_id),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let db = Database::in_memory().await.unwrap();
        let account_id = seeded_account(&db).await;

        let first = TransactionRepo::insert(
            db.pool(),
            &Transaction::new(account_id, TransactionKind::Deposit, dec!(10)),
        )
        .await
        .unwrap();
        let second = TransactionRepo::insert(
            db.pool(),
            &Transaction::new(account_id, TransactionKind::Deposit, dec!(20)),
        )
        .await
        .unwrap();

        assert!(second > first);
        assert_eq!(TransactionRepo::count(db.pool()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_orders_by_date_then_id() {
        let db = Database::in_memory().await.unwrap();
        let account_id = seeded_account(&db).await;
        let date = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

        // Insert out of chronological order, with two equal timestamps.
        let mut late = Transaction::new(account_id, TransactionKind::Deposit, dec!(1));
        late.date = date + Duration::hours(1);
        let mut tied_a = Transaction::new(account_id, TransactionKind::Deposit, dec!(2));
        tied_a.date = date;
        let mut tied_b = Transaction::new(account_id, TransactionKind::Deposit, dec!(3));
        tied_b.date = date;

        let late_id = TransactionRepo::insert(db.pool(), &late).await.unwrap();
        let a_id = TransactionRepo::insert(db.pool(), &tied_a).await.unwrap();
        let b_id = TransactionRepo::insert(db.pool(), &tied_b).await.unwrap();

        let rows = TransactionRepo::list_by_account(db.pool(), account_id)
            .await
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a_id, b_id, late_id]);

        let latest = TransactionRepo::latest_for_account(db.pool(), account_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, late_id);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let db = Database::in_memory().await.unwrap();
        seeded_account(&db).await;

        let mut ghost = Transaction::new(1, TransactionKind::Deposit, dec!(5));
        ghost.id = 999;

        assert!(TransactionRepo::update(db.pool(), &ghost)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(TransactionRepo::delete(db.pool(), 999)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn ranged_query_is_inclusive_on_both_ends() {
        let db = Database::in_memory().await.unwrap();
        let account_id = seeded_account(&db).await;
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();

        // One second before the window, both boundaries, and the middle.
        for offset in [-1, 0, 12 * 3600, 24 * 3600] {
            let mut tx = Transaction::new(account_id, TransactionKind::Deposit, dec!(1));
            tx.date = start + Duration::seconds(offset);
            TransactionRepo::insert(db.pool(), &tx).await.unwrap();
        }

        let client_id = AccountRepo::get_by_id(db.pool(), account_id)
            .await
            .unwrap()
            .client_id;
        let rows = TransactionRepo::find_by_client_and_range(db.pool(), client_id, start, end)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].client_name, "Jose Lema");
        assert_eq!(rows[0].account_number, "478758");
    }
}
