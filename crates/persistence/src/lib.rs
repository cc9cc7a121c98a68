//! # Corebank Persistence
//!
//! The ledger store: SQLite via sqlx. Exposes repositories over row types and
//! a thin [`Database`] facade around the connection pool.
//!
//! The balance engine's atomicity contract lives here: repositories accept
//! any [`sqlx::SqliteExecutor`], so an edit/delete recalculation runs every
//! read and write through one `sqlx::Transaction` obtained from
//! [`Database::pool`] - either all recomputed balances commit or none do.

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::repos::{AccountRepo, ClientRepo, TransactionRepo};
pub use sqlite::schema::{AccountRow, ClientRow, StatementTxRow, TransactionRow};
pub use sqlite::{create_pool, init_database, init_schema};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Database facade - owns the SQLite pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to an existing database.
    pub async fn connect(database_url: &str) -> PersistenceResult<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self { pool })
    }

    /// Open (creating if missing) and ensure the schema.
    pub async fn open(database_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(database_url).await?;
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied. One connection, so
    /// every query sees the same memory store.
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        init_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
