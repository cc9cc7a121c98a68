//! Report errors.

use chrono::NaiveDate;
use corebank_persistence::PersistenceError;
use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("client not found: {0}")]
    ClientNotFound(i64),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
