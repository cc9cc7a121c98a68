//! Account operations - CRUD with soft delete.
//!
//! The initial balance set here anchors the account's balance chain; the
//! ledger service treats it as read-only from then on.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use corebank_core::Account;
use corebank_persistence::{AccountRepo, ClientRepo};
use tracing::info;

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account for an existing client.
    pub async fn create(&self, mut account: Account) -> BusinessResult<Account> {
        match ClientRepo::get_by_id(self.ctx.pool(), account.client_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(BusinessError::ClientNotFound(account.client_id))
            }
            Err(e) => return Err(e.into()),
        }

        account.id = AccountRepo::insert(self.ctx.pool(), &account).await?;
        info!(account_id = account.id, client_id = account.client_id, "account created");
        Ok(account)
    }

    pub async fn get_all(&self) -> BusinessResult<Vec<Account>> {
        let rows = AccountRepo::get_all(self.ctx.pool()).await?;
        let accounts = rows
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }

    pub async fn find(&self, account_id: i64) -> BusinessResult<Account> {
        match AccountRepo::get_by_id(self.ctx.pool(), account_id).await {
            Ok(row) => Ok(Account::try_from(row)?),
            Err(e) if e.is_not_found() => Err(BusinessError::AccountNotFound(account_id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_client(&self, client_id: i64) -> BusinessResult<Vec<Account>> {
        let rows = AccountRepo::get_by_client(self.ctx.pool(), client_id).await?;
        let accounts = rows
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }

    pub async fn update(&self, account: &Account) -> BusinessResult<()> {
        match AccountRepo::update(self.ctx.pool(), account).await {
            Ok(()) => {
                info!(account_id = account.id, "account updated");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(BusinessError::AccountNotFound(account.id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Soft delete: flips status to inactive, keeps the row and its
    /// transaction history.
    pub async fn deactivate(&self, account_id: i64) -> BusinessResult<()> {
        let mut account = self.find(account_id).await?;
        account.deactivate();
        self.update(&account).await?;
        info!(account_id, "account deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientService;
    use corebank_core::{AccountType, Client};
    use corebank_persistence::Database;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn create_requires_existing_client() {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);
        let svc = AccountService::new(&ctx);

        let err = svc
            .create(Account::new("585545", AccountType::Checking, dec!(1000), 42))
            .await
            .unwrap_err();
        assert!(matches!(err, BusinessError::ClientNotFound(42)));
    }

    #[tokio::test]
    async fn soft_delete_keeps_the_row() {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);

        let client = ClientService::new(&ctx)
            .create(Client::new("Juan Osorio", "1722334455", "1245"))
            .await
            .unwrap();
        let svc = AccountService::new(&ctx);
        let account = svc
            .create(Account::new("495878", AccountType::Savings, dec!(0), client.id))
            .await
            .unwrap();

        svc.deactivate(account.id).await.unwrap();
        let found = svc.find(account.id).await.unwrap();
        assert!(!found.is_active());
        assert_eq!(found.account_number, "495878");
    }
}
