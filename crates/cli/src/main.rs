//! Corebank CLI - Banking operations from command line
//!
//! Usage:
//! ```bash
//! corebank init
//! corebank client create --name "Jose Lema" --identification 1712345678 --password 1234
//! corebank account create --number 478758 --type savings --initial-balance 2000 --client-id 1
//! corebank deposit 1 600
//! corebank withdraw 1 575
//! corebank transaction edit 3 --kind deposit --amount 150
//! corebank statement --client-id 1 --from 2026-08-01 --to 2026-08-31 --format json
//! ```

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use corebank_core::{AccountType, TransactionKind};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod db;

use commands::{account, client, statement, transaction};

/// Corebank - client accounts with running-balance transaction ledgers
#[derive(Parser)]
#[command(name = "corebank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/corebank.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database with schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,

    /// Client management
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit funds to an account
    Deposit {
        /// Account ID
        account_id: i64,
        /// Amount to deposit
        amount: Decimal,
    },

    /// Withdraw funds from an account
    Withdraw {
        /// Account ID
        account_id: i64,
        /// Amount to withdraw
        amount: Decimal,
    },

    /// Transaction management
    Transaction {
        #[command(subcommand)]
        action: TransactionAction,
    },

    /// Show the current balance of an account
    Balance {
        /// Account ID
        account_id: i64,
    },

    /// Generate an account statement for a client
    Statement {
        /// Client ID
        #[arg(long)]
        client_id: i64,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Output format
        #[arg(long, default_value = "json")]
        format: ReportFormat,
        /// Output file path (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Create a new client
    Create {
        #[arg(long, short)]
        name: String,
        /// National identification number
        #[arg(long, short)]
        identification: String,
        #[arg(long, short)]
        password: String,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List all clients
    List,
    /// Show client details
    Show {
        /// Client ID
        client_id: i64,
    },
    /// Deactivate a client (soft delete)
    Deactivate {
        /// Client ID
        client_id: i64,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a new account
    Create {
        /// Account number
        #[arg(long, short)]
        number: String,
        /// Account type
        #[arg(long, short = 't')]
        r#type: AccountTypeArg,
        /// Opening balance
        #[arg(long, default_value = "0")]
        initial_balance: Decimal,
        /// Owning client ID
        #[arg(long)]
        client_id: i64,
    },
    /// List accounts
    List {
        /// Filter by client ID
        #[arg(long)]
        client_id: Option<i64>,
    },
    /// Show account details and transactions
    Show {
        /// Account ID
        account_id: i64,
    },
    /// Deactivate an account (soft delete)
    Deactivate {
        /// Account ID
        account_id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionAction {
    /// Edit a transaction; later balances are recalculated
    Edit {
        /// Transaction ID
        transaction_id: i64,
        /// New kind
        #[arg(long, short)]
        kind: KindArg,
        /// New amount
        #[arg(long, short)]
        amount: Decimal,
        /// New timestamp (RFC 3339, e.g. 2026-08-10T09:30:00Z)
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Delete a transaction; later balances are recalculated
    Delete {
        /// Transaction ID
        transaction_id: i64,
    },
    /// List an account's transactions in sequence order
    List {
        /// Account ID
        account_id: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AccountTypeArg {
    Savings,
    Checking,
}

impl AccountTypeArg {
    pub fn to_core_type(self) -> AccountType {
        match self {
            AccountTypeArg::Savings => AccountType::Savings,
            AccountTypeArg::Checking => AccountType::Checking,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Deposit,
    Withdrawal,
}

impl KindArg {
    pub fn to_core_kind(self) -> TransactionKind {
        match self {
            KindArg::Deposit => TransactionKind::Deposit,
            KindArg::Withdrawal => TransactionKind::Withdrawal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Client { action } => {
            client::handle(&cli.db, action).await?;
        }

        Commands::Account { action } => {
            account::handle(&cli.db, action).await?;
        }

        Commands::Deposit { account_id, amount } => {
            transaction::create(&cli.db, account_id, TransactionKind::Deposit, amount).await?;
        }

        Commands::Withdraw { account_id, amount } => {
            transaction::create(&cli.db, account_id, TransactionKind::Withdrawal, amount).await?;
        }

        Commands::Transaction { action } => {
            transaction::handle(&cli.db, action).await?;
        }

        Commands::Balance { account_id } => {
            transaction::show_balance(&cli.db, account_id).await?;
        }

        Commands::Statement {
            client_id,
            from,
            to,
            format,
            output,
        } => {
            statement::generate(&cli.db, client_id, from, to, format, output).await?;
        }
    }

    Ok(())
}
