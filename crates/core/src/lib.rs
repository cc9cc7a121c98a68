//! # Corebank Core
//!
//! Pure banking domain: clients, accounts, transactions, and the
//! running-balance math. No I/O - persistence lives in
//! `corebank-persistence`, orchestration in `corebank-business`.

pub mod account;
pub mod client;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use account::{Account, AccountType};
pub use client::Client;
pub use error::{CoreError, CoreResult};
pub use transaction::{Transaction, TransactionKind};
