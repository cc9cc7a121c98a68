//! Client - the person who owns accounts.
//!
//! Flattened person + client record: identity fields plus credentials and an
//! active flag. None of these fields carry balance semantics; the ledger only
//! cares about the client id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bank client. `status == false` means soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Assigned by the store on insert; 0 until then.
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    /// National identification number, unique per client.
    pub identification: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub password: String,
    pub status: bool,
}

impl Client {
    /// New active client, not yet persisted.
    pub fn new(name: &str, identification: &str, password: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            gender: None,
            age: None,
            identification: identification.to_string(),
            address: None,
            phone: None,
            password: password.to_string(),
            status: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status
    }

    /// Soft delete.
    pub fn deactivate(&mut self) {
        self.status = false;
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client {} ({}, active: {})",
            self.id, self.name, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_is_active() {
        let client = Client::new("Jose Lema", "1712345678", "1234");
        assert_eq!(client.id, 0);
        assert!(client.is_active());
    }

    #[test]
    fn deactivate_clears_status() {
        let mut client = Client::new("Jose Lema", "1712345678", "1234");
        client.deactivate();
        assert!(!client.is_active());
    }
}
