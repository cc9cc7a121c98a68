//! Transaction commands: deposit, withdraw, edit, delete, list

use anyhow::Result;
use corebank_business::{LedgerService, ServiceContext};
use corebank_core::TransactionKind;
use rust_decimal::Decimal;
use std::path::Path;

use crate::db;
use crate::TransactionAction;

/// Record a deposit or withdrawal
pub async fn create(
    db_path: &Path,
    account_id: i64,
    kind: TransactionKind,
    amount: Decimal,
) -> Result<()> {
    let database = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&database);
    let svc = LedgerService::new(&ctx);

    let tx = svc.create_transaction(account_id, kind, amount).await?;
    println!("Recorded {}:", tx.kind);
    println!("   Transaction ID: {}", tx.id);
    println!("   Amount:         {}", tx.amount);
    println!("   Balance:        {}", tx.balance);
    Ok(())
}

/// Handle transaction subcommands
pub async fn handle(db_path: &Path, action: TransactionAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&database);
    let svc = LedgerService::new(&ctx);

    match action {
        TransactionAction::Edit {
            transaction_id,
            kind,
            amount,
            date,
        } => {
            let tx = svc
                .update_transaction(transaction_id, kind.to_core_kind(), amount, date)
                .await?;
            println!("Transaction {} updated:", tx.id);
            println!("   Amount:  {}", tx.amount);
            println!("   Balance: {}", tx.balance);
        }

        TransactionAction::Delete { transaction_id } => {
            svc.delete_transaction(transaction_id).await?;
            println!("Transaction {} deleted", transaction_id);
        }

        TransactionAction::List { account_id } => {
            let txs = svc.transactions_for_account(account_id).await?;
            if txs.is_empty() {
                println!("No transactions for account {}", account_id);
                return Ok(());
            }

            println!(
                "{:<6} {:<25} {:<12} {:>16} {:>16}",
                "ID", "DATE", "KIND", "AMOUNT", "BALANCE"
            );
            println!("{}", "-".repeat(80));
            for tx in txs {
                println!(
                    "{:<6} {:<25} {:<12} {:>16} {:>16}",
                    tx.id,
                    tx.date.to_rfc3339(),
                    tx.kind.to_string(),
                    tx.amount,
                    tx.balance
                );
            }
        }
    }

    Ok(())
}

/// Show the current balance of an account
pub async fn show_balance(db_path: &Path, account_id: i64) -> Result<()> {
    let database = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&database);
    let svc = LedgerService::new(&ctx);

    let balance = svc.current_balance(account_id).await?;
    println!("Account {} balance: {}", account_id, balance);
    Ok(())
}
