pub mod account;
pub mod client;
pub mod statement;
pub mod transaction;
