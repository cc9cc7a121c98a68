//! Persistence layer errors, wrapping sqlx.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Transient storage failure. Safe to retry the whole operation:
    /// recalculation is deterministic given the same stored state.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid decimal value: {0}")]
    InvalidDecimal(String),

    #[error("invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: &'static str, value: String },
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
