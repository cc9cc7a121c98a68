//! Ledger service - the balance engine.
//!
//! Owns every write to `transactions.balance`. Each mutation acquires the
//! account's lock, opens one storage transaction, and runs all reads and
//! writes through it: either the whole recomputed chain commits or nothing
//! does. Current balance is always derived from the latest persisted
//! transaction, never cached.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::{DateTime, Utc};
use corebank_core::ledger;
use corebank_core::{Account, CoreError, Transaction, TransactionKind};
use corebank_persistence::{AccountRepo, PersistenceError, TransactionRepo};
use rust_decimal::Decimal;
use sqlx::SqliteConnection;
use std::collections::HashSet;
use tracing::{error, info};

/// Balance engine operations: append, edit, delete, current balance.
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a movement to an account.
    ///
    /// The raw amount may carry any sign; it is normalized by kind. The new
    /// balance is derived from the latest persisted transaction (or the
    /// initial balance), and a withdrawal that would go negative is rejected
    /// before anything is written.
    pub async fn create_transaction(
        &self,
        account_id: i64,
        kind: TransactionKind,
        amount: Decimal,
    ) -> BusinessResult<Transaction> {
        if amount.is_zero() {
            return Err(CoreError::InvalidAmount("amount must be non-zero".to_string()).into());
        }

        let lock = self.ctx.locks().for_account(account_id);
        let _guard = lock.lock().await;

        let mut dbtx = self.ctx.pool().begin().await.map_err(PersistenceError::from)?;

        let account = Self::load_account(&mut dbtx, account_id).await?;
        let latest = TransactionRepo::latest_for_account(&mut *dbtx, account_id)
            .await?
            .map(Transaction::try_from)
            .transpose()?;
        let current = ledger::current_balance(account.initial_balance, latest.as_ref());

        let (normalized, balance) = ledger::next_balance(current, kind, amount).map_err(|e| {
            error!(account_id, %current, %amount, "transaction rejected: {e}");
            e
        })?;

        let mut tx = Transaction::new(account_id, kind, amount);
        tx.amount = normalized;
        tx.balance = balance;
        tx.id = TransactionRepo::insert(&mut *dbtx, &tx).await?;

        dbtx.commit().await.map_err(PersistenceError::from)?;
        info!(transaction_id = tx.id, account_id, %balance, "transaction created");
        Ok(tx)
    }

    /// Edit a movement's kind, amount, and optionally its timestamp, then
    /// re-derive the account's balance chain.
    ///
    /// The whole sequence is recomputed from the initial balance;
    /// transactions whose stored fields come out unchanged (everything
    /// sequenced before the edit point) are not rewritten. Any negative
    /// recomputed balance aborts the operation with nothing persisted.
    pub async fn update_transaction(
        &self,
        transaction_id: i64,
        kind: TransactionKind,
        amount: Decimal,
        date: Option<DateTime<Utc>>,
    ) -> BusinessResult<Transaction> {
        if amount.is_zero() {
            return Err(CoreError::InvalidAmount("amount must be non-zero".to_string()).into());
        }

        // Resolve the owning account outside the storage transaction so the
        // right lock can be taken first.
        let account_id = self.owning_account(transaction_id).await?;
        let lock = self.ctx.locks().for_account(account_id);
        let _guard = lock.lock().await;

        let mut dbtx = self.ctx.pool().begin().await.map_err(PersistenceError::from)?;

        // Re-check under the lock; a concurrent delete may have won.
        Self::load_transaction(&mut dbtx, transaction_id).await?;
        let account = Self::load_account(&mut dbtx, account_id).await?;
        let mut sequence = Self::load_sequence(&mut dbtx, account_id).await?;

        let target = sequence
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or(BusinessError::TransactionNotFound(transaction_id))?;
        target.kind = kind;
        target.amount = amount;
        if let Some(date) = date {
            target.date = date;
        }

        let changed = ledger::recalculate(account.initial_balance, &mut sequence).map_err(|e| {
            error!(transaction_id, account_id, "edit rejected: {e}");
            e
        })?;

        let mut to_persist: HashSet<i64> = changed.into_iter().collect();
        to_persist.insert(transaction_id);
        for tx in &sequence {
            if to_persist.contains(&tx.id) {
                TransactionRepo::update(&mut *dbtx, tx).await?;
            }
        }

        dbtx.commit().await.map_err(PersistenceError::from)?;
        info!(transaction_id, account_id, "transaction updated");

        sequence
            .into_iter()
            .find(|t| t.id == transaction_id)
            .ok_or(BusinessError::TransactionNotFound(transaction_id))
    }

    /// Delete a movement and repair every transaction sequenced after it.
    ///
    /// The remaining sequence is re-derived exactly as in an edit; if the
    /// removal strands a withdrawal (deleting the deposit that funded it),
    /// the whole operation is rejected and every row keeps its pre-operation
    /// state.
    pub async fn delete_transaction(&self, transaction_id: i64) -> BusinessResult<()> {
        let account_id = self.owning_account(transaction_id).await?;
        let lock = self.ctx.locks().for_account(account_id);
        let _guard = lock.lock().await;

        let mut dbtx = self.ctx.pool().begin().await.map_err(PersistenceError::from)?;

        Self::load_transaction(&mut dbtx, transaction_id).await?;
        let account = Self::load_account(&mut dbtx, account_id).await?;

        TransactionRepo::delete(&mut *dbtx, transaction_id).await?;
        let mut remaining = Self::load_sequence(&mut dbtx, account_id).await?;

        let changed = ledger::recalculate(account.initial_balance, &mut remaining).map_err(|e| {
            error!(transaction_id, account_id, "delete rejected: {e}");
            e
        })?;

        let to_persist: HashSet<i64> = changed.into_iter().collect();
        for tx in &remaining {
            if to_persist.contains(&tx.id) {
                TransactionRepo::update(&mut *dbtx, tx).await?;
            }
        }

        dbtx.commit().await.map_err(PersistenceError::from)?;
        info!(transaction_id, account_id, "transaction deleted");
        Ok(())
    }

    /// Current balance of an account, derived on demand: the latest
    /// transaction's balance, or the initial balance when none exist.
    pub async fn current_balance(&self, account_id: i64) -> BusinessResult<Decimal> {
        let account = match AccountRepo::get_by_id(self.ctx.pool(), account_id).await {
            Ok(row) => Account::try_from(row)?,
            Err(e) if e.is_not_found() => return Err(BusinessError::AccountNotFound(account_id)),
            Err(e) => return Err(e.into()),
        };

        let latest = TransactionRepo::latest_for_account(self.ctx.pool(), account_id)
            .await?
            .map(Transaction::try_from)
            .transpose()?;

        Ok(ledger::current_balance(account.initial_balance, latest.as_ref()))
    }

    /// All transactions of an account in sequence order.
    pub async fn transactions_for_account(
        &self,
        account_id: i64,
    ) -> BusinessResult<Vec<Transaction>> {
        match AccountRepo::get_by_id(self.ctx.pool(), account_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => return Err(BusinessError::AccountNotFound(account_id)),
            Err(e) => return Err(e.into()),
        }

        let rows = TransactionRepo::list_by_account(self.ctx.pool(), account_id).await?;
        let txs = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    async fn owning_account(&self, transaction_id: i64) -> BusinessResult<i64> {
        match TransactionRepo::get_by_id(self.ctx.pool(), transaction_id).await {
            Ok(row) => Ok(row.account_id),
            Err(e) if e.is_not_found() => Err(BusinessError::TransactionNotFound(transaction_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_account(conn: &mut SqliteConnection, id: i64) -> BusinessResult<Account> {
        match AccountRepo::get_by_id(&mut *conn, id).await {
            Ok(row) => Ok(Account::try_from(row)?),
            Err(e) if e.is_not_found() => Err(BusinessError::AccountNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_transaction(conn: &mut SqliteConnection, id: i64) -> BusinessResult<Transaction> {
        match TransactionRepo::get_by_id(&mut *conn, id).await {
            Ok(row) => Ok(Transaction::try_from(row)?),
            Err(e) if e.is_not_found() => Err(BusinessError::TransactionNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_sequence(
        conn: &mut SqliteConnection,
        account_id: i64,
    ) -> BusinessResult<Vec<Transaction>> {
        let rows = TransactionRepo::list_by_account(&mut *conn, account_id).await?;
        let txs = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(txs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corebank_core::AccountType;
    use corebank_persistence::{ClientRepo, Database};
    use corebank_core::Client;
    use rust_decimal_macros::dec;

    async fn context_with_account(initial: Decimal) -> (ServiceContext, i64) {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);
        let client_id = ClientRepo::insert(ctx.pool(), &Client::new("Jose Lema", "1712345678", "1234"))
            .await
            .unwrap();
        let account_id = AccountRepo::insert(
            ctx.pool(),
            &Account::new("478758", AccountType::Savings, initial, client_id),
        )
        .await
        .unwrap();
        (ctx, account_id)
    }

    #[tokio::test]
    async fn deposit_builds_on_initial_balance() {
        let (ctx, account_id) = context_with_account(dec!(100)).await;
        let svc = LedgerService::new(&ctx);

        let tx = svc
            .create_transaction(account_id, TransactionKind::Deposit, dec!(50))
            .await
            .unwrap();

        assert_eq!(tx.amount, dec!(50));
        assert_eq!(tx.balance, dec!(150));
        assert_eq!(svc.current_balance(account_id).await.unwrap(), dec!(150));
    }

    #[tokio::test]
    async fn overdraft_withdrawal_writes_nothing() {
        let (ctx, account_id) = context_with_account(dec!(100)).await;
        let svc = LedgerService::new(&ctx);

        let err = svc
            .create_transaction(account_id, TransactionKind::Withdrawal, dec!(200))
            .await
            .unwrap_err();

        assert!(err.is_insufficient_balance());
        assert_eq!(TransactionRepo::count(ctx.pool()).await.unwrap(), 0);
        assert_eq!(svc.current_balance(account_id).await.unwrap(), dec!(100));
    }

    #[tokio::test]
    async fn withdrawal_amount_is_stored_negative() {
        let (ctx, account_id) = context_with_account(dec!(100)).await;
        let svc = LedgerService::new(&ctx);

        let tx = svc
            .create_transaction(account_id, TransactionKind::Withdrawal, dec!(40))
            .await
            .unwrap();

        assert_eq!(tx.amount, dec!(-40));
        assert_eq!(tx.balance, dec!(60));
    }

    #[tokio::test]
    async fn unknown_account_is_reported() {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);
        let svc = LedgerService::new(&ctx);

        let err = svc
            .create_transaction(77, TransactionKind::Deposit, dec!(10))
            .await
            .unwrap_err();
        assert!(matches!(err, BusinessError::AccountNotFound(77)));

        let err = svc.current_balance(77).await.unwrap_err();
        assert!(matches!(err, BusinessError::AccountNotFound(77)));
    }

    #[tokio::test]
    async fn zero_amount_is_invalid() {
        let (ctx, account_id) = context_with_account(dec!(100)).await;
        let svc = LedgerService::new(&ctx);

        let err = svc
            .create_transaction(account_id, TransactionKind::Deposit, dec!(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BusinessError::Core(CoreError::InvalidAmount(_))
        ));
    }
}
