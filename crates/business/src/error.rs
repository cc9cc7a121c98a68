//! Business layer errors.
//!
//! Typed end to end so callers can tell a not-found from a rejected
//! operation from a transient storage failure without downcasting.

use corebank_core::CoreError;
use corebank_persistence::PersistenceError;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Not found errors ===
    #[error("client not found: {0}")]
    ClientNotFound(i64),

    #[error("account not found: {0}")]
    AccountNotFound(i64),

    #[error("transaction not found: {0}")]
    TransactionNotFound(i64),

    // === Domain rule violations (insufficient balance, invalid amount) ===
    #[error(transparent)]
    Core(#[from] CoreError),

    // === Storage failures, retryable when transient ===
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_insufficient_balance())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound(_) | Self::AccountNotFound(_) | Self::TransactionNotFound(_)
        )
    }
}
