//! SQLite backend: schema, connection helpers, repositories.

pub mod repos;
pub mod schema;

use crate::error::PersistenceResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Connect to an existing database.
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Connect, creating the database file if missing, and ensure the schema.
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the schema. Idempotent.
///
/// `transactions.id` is AUTOINCREMENT on purpose: it is the deterministic
/// tie-break for equal timestamps, so it must be monotonic in insertion order
/// and never reused.
pub async fn init_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            gender TEXT,
            age INTEGER,
            identification TEXT NOT NULL UNIQUE,
            address TEXT,
            phone TEXT,
            password TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_number TEXT NOT NULL UNIQUE,
            account_type TEXT NOT NULL,
            initial_balance TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            client_id INTEGER NOT NULL,
            FOREIGN KEY (client_id) REFERENCES clients(id)
        );

        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            tx_type TEXT NOT NULL,
            amount TEXT NOT NULL,
            balance TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(id)
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_account_seq
            ON transactions(account_id, date, id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
