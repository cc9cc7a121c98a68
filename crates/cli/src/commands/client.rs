//! Client management commands

use anyhow::Result;
use corebank_business::{ClientService, ServiceContext};
use corebank_core::Client;
use std::path::Path;

use crate::db;
use crate::ClientAction;

/// Handle client subcommands
pub async fn handle(db_path: &Path, action: ClientAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&database);
    let svc = ClientService::new(&ctx);

    match action {
        ClientAction::Create {
            name,
            identification,
            password,
            gender,
            age,
            address,
            phone,
        } => {
            let mut client = Client::new(&name, &identification, &password);
            client.gender = gender;
            client.age = age;
            client.address = address;
            client.phone = phone;

            let created = svc.create(client).await?;
            println!("Created client:");
            println!("   ID:             {}", created.id);
            println!("   Name:           {}", created.name);
            println!("   Identification: {}", created.identification);
        }

        ClientAction::List => {
            let clients = svc.get_all().await?;
            if clients.is_empty() {
                println!("No clients found.");
                return Ok(());
            }

            println!("{:<6} {:<24} {:<14} {:<8}", "ID", "NAME", "IDENTIFICATION", "STATUS");
            println!("{}", "-".repeat(56));
            for c in clients {
                let status = if c.status { "active" } else { "inactive" };
                println!("{:<6} {:<24} {:<14} {:<8}", c.id, c.name, c.identification, status);
            }
        }

        ClientAction::Show { client_id } => {
            let client = svc.find(client_id).await?;
            println!("Client details");
            println!("   ID:             {}", client.id);
            println!("   Name:           {}", client.name);
            println!("   Identification: {}", client.identification);
            if let Some(address) = &client.address {
                println!("   Address:        {}", address);
            }
            if let Some(phone) = &client.phone {
                println!("   Phone:          {}", phone);
            }
            println!("   Status:         {}", if client.status { "active" } else { "inactive" });
        }

        ClientAction::Deactivate { client_id } => {
            svc.deactivate(client_id).await?;
            println!("Client {} deactivated", client_id);
        }
    }

    Ok(())
}
