//! Account management commands

use anyhow::Result;
use corebank_business::{AccountService, LedgerService, ServiceContext};
use corebank_core::Account;
use std::path::Path;

use crate::db;
use crate::AccountAction;

/// Handle account subcommands
pub async fn handle(db_path: &Path, action: AccountAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&database);
    let svc = AccountService::new(&ctx);

    match action {
        AccountAction::Create {
            number,
            r#type,
            initial_balance,
            client_id,
        } => {
            let account = svc
                .create(Account::new(&number, r#type.to_core_type(), initial_balance, client_id))
                .await?;
            println!("Created account:");
            println!("   ID:              {}", account.id);
            println!("   Number:          {}", account.account_number);
            println!("   Type:            {}", account.account_type);
            println!("   Initial balance: {}", account.initial_balance);
            println!("   Client ID:       {}", account.client_id);
        }

        AccountAction::List { client_id } => {
            let accounts = match client_id {
                Some(id) => svc.find_by_client(id).await?,
                None => svc.get_all().await?,
            };
            if accounts.is_empty() {
                println!("No accounts found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<12} {:<10} {:>16} {:<8} {:<8}",
                "ID", "NUMBER", "TYPE", "INITIAL", "CLIENT", "STATUS"
            );
            println!("{}", "-".repeat(66));
            for a in accounts {
                let status = if a.status { "active" } else { "inactive" };
                println!(
                    "{:<6} {:<12} {:<10} {:>16} {:<8} {:<8}",
                    a.id, a.account_number, a.account_type, a.initial_balance, a.client_id, status
                );
            }
        }

        AccountAction::Show { account_id } => {
            let account = svc.find(account_id).await?;
            let ledger = LedgerService::new(&ctx);
            let balance = ledger.current_balance(account_id).await?;

            println!("Account details");
            println!("   ID:              {}", account.id);
            println!("   Number:          {}", account.account_number);
            println!("   Type:            {}", account.account_type);
            println!("   Initial balance: {}", account.initial_balance);
            println!("   Current balance: {}", balance);
            println!("   Status:          {}", if account.status { "active" } else { "inactive" });
        }

        AccountAction::Deactivate { account_id } => {
            svc.deactivate(account_id).await?;
            println!("Account {} deactivated", account_id);
        }
    }

    Ok(())
}
