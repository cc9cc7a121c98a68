//! # Corebank Business
//!
//! Service layer: the balance engine ([`LedgerService`]) plus client and
//! account CRUD. Every mutating ledger operation runs under a per-account
//! lock and a single storage transaction, so the running-balance invariant
//! holds at rest after each call.

pub mod account;
pub mod client;
pub mod error;
pub mod ledger;
pub mod services;

pub use account::AccountService;
pub use client::ClientService;
pub use error::{BusinessError, BusinessResult};
pub use ledger::LedgerService;
pub use services::ServiceContext;
