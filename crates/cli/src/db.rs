//! Database initialization and status

use anyhow::{Context, Result};
use corebank_persistence::Database;
use std::path::Path;

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("Removed existing database");
    }

    let db_url = format!("sqlite:{}", db_path.display());
    Database::open(&db_url)
        .await
        .context("Failed to initialize database")?;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("Database not found at {:?}", db_path);
        println!("Run 'corebank init' to create the database");
        return Ok(());
    }

    let db = connect(db_path).await?;

    println!("Database status");
    println!("   Path: {:?}", db_path);
    println!();

    let clients: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    let accounts: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    let transactions: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    println!("   Clients:      {}", clients.0);
    println!("   Accounts:     {}", accounts.0);
    println!("   Transactions: {}", transactions.0);

    Ok(())
}

/// Connect to an existing database
pub async fn connect(db_path: &Path) -> Result<Database> {
    let db_url = format!("sqlite:{}", db_path.display());
    Database::connect(&db_url)
        .await
        .context("Failed to connect to database. Run 'corebank init' first.")
}
