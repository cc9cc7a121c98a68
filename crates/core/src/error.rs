//! Core domain errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Deterministic business-rule failures. Infrastructure errors belong to the
/// persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A withdrawal (direct or arising from recalculation) would drive a
    /// running balance below zero.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unknown account type: {0}")]
    UnknownAccountType(String),

    #[error("unknown transaction kind: {0}")]
    UnknownTransactionKind(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn insufficient_balance(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientBalance {
            required,
            available,
        }
    }

    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, Self::InsufficientBalance { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn insufficient_balance_display() {
        let err = CoreError::insufficient_balance(dec!(200), dec!(100));
        assert_eq!(
            err.to_string(),
            "insufficient balance: required 200, available 100"
        );
        assert!(err.is_insufficient_balance());
    }
}
