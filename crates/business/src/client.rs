//! Client operations - CRUD with soft delete.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use corebank_core::Client;
use corebank_persistence::ClientRepo;
use tracing::info;

/// Client service
pub struct ClientService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClientService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, mut client: Client) -> BusinessResult<Client> {
        client.id = ClientRepo::insert(self.ctx.pool(), &client).await?;
        info!(client_id = client.id, "client created");
        Ok(client)
    }

    pub async fn get_all(&self) -> BusinessResult<Vec<Client>> {
        let rows = ClientRepo::get_all(self.ctx.pool()).await?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    pub async fn find(&self, client_id: i64) -> BusinessResult<Client> {
        match ClientRepo::get_by_id(self.ctx.pool(), client_id).await {
            Ok(row) => Ok(Client::from(row)),
            Err(e) if e.is_not_found() => Err(BusinessError::ClientNotFound(client_id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, client: &Client) -> BusinessResult<()> {
        match ClientRepo::update(self.ctx.pool(), client).await {
            Ok(()) => {
                info!(client_id = client.id, "client updated");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(BusinessError::ClientNotFound(client.id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Soft delete: flips status to inactive, keeps the row.
    pub async fn deactivate(&self, client_id: i64) -> BusinessResult<()> {
        let mut client = self.find(client_id).await?;
        client.deactivate();
        self.update(&client).await?;
        info!(client_id, "client deactivated");
        Ok(())
    }
}
