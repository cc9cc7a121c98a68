//! Service context: shared database access and per-account serialization.

use corebank_persistence::Database;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One async mutex per account id.
///
/// Mutating ledger operations on the same account must not interleave: two
/// concurrent recalculation passes over one sequence can each commit a chain
/// derived from a stale read. Cross-account operations share nothing and run
/// concurrently.
#[derive(Default)]
pub struct AccountLocks {
    inner: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl AccountLocks {
    /// The lock for an account, created on first use.
    pub fn for_account(&self, account_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().expect("account lock map poisoned");
        map.entry(account_id).or_default().clone()
    }
}

/// Context for business operations - database access plus account locks.
pub struct ServiceContext {
    pool: SqlitePool,
    locks: AccountLocks,
}

impl ServiceContext {
    /// Create new service context from a database
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            locks: AccountLocks::default(),
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: AccountLocks::default(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn locks(&self) -> &AccountLocks {
        &self.locks
    }
}
