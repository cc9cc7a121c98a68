//! Running-balance math.
//!
//! Pure functions over an account's transaction sequence. The invariant they
//! maintain: sorted by `(date, id)`, the first balance equals
//! `initial_balance + amount[0]` and every later balance equals the previous
//! balance plus that transaction's normalized amount, with no balance ever
//! negative.
//!
//! `corebank-business` wraps these in storage transactions; nothing here
//! touches I/O, so recalculation is deterministic and idempotent by
//! construction.

use crate::error::{CoreError, CoreResult};
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;

/// Append step: normalize the raw amount and derive the balance after
/// applying it on top of `previous`.
///
/// A withdrawal that would drive the balance negative is rejected; deposits
/// cannot (their normalized amount is non-negative).
pub fn next_balance(
    previous: Decimal,
    kind: TransactionKind,
    raw_amount: Decimal,
) -> CoreResult<(Decimal, Decimal)> {
    let normalized = kind.normalize(raw_amount);
    let balance = previous + normalized;

    if kind == TransactionKind::Withdrawal && balance < Decimal::ZERO {
        return Err(CoreError::insufficient_balance(normalized.abs(), previous));
    }

    Ok((normalized, balance))
}

/// Recalculation cascade: re-derive every transaction's normalized amount and
/// balance from `initial_balance` forward.
///
/// Sorts `transactions` by `(date, id)` and walks the chain. Returns the ids
/// of transactions whose stored fields actually changed, in ascending
/// sequence order - callers persist exactly those. Transactions already
/// satisfying the invariant are recomputed to their stored values and
/// reported unchanged, which keeps the pass idempotent and leaves rows before
/// an edit point untouched.
pub fn recalculate(
    initial_balance: Decimal,
    transactions: &mut [Transaction],
) -> CoreResult<Vec<i64>> {
    transactions.sort_by(|a, b| a.cmp_sequence(b));

    let mut previous = initial_balance;
    let mut changed = Vec::new();

    for tx in transactions.iter_mut() {
        let (normalized, balance) = next_balance(previous, tx.kind, tx.amount)?;

        if tx.amount != normalized || tx.balance != balance {
            tx.amount = normalized;
            tx.balance = balance;
            changed.push(tx.id);
        }

        previous = balance;
    }

    Ok(changed)
}

/// Current balance of an account: the latest transaction's balance, or the
/// initial balance when no transaction exists.
pub fn current_balance(initial_balance: Decimal, latest: Option<&Transaction>) -> Decimal {
    latest.map(|tx| tx.balance).unwrap_or(initial_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn tx(id: i64, minutes: i64, kind: TransactionKind, amount: Decimal) -> Transaction {
        let mut tx = Transaction::new(1, kind, amount);
        tx.id = id;
        tx.date = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        tx
    }

    #[test]
    fn deposit_on_initial_balance() {
        // initial 100, deposit 50 -> balance 150
        let (amount, balance) = next_balance(dec!(100), TransactionKind::Deposit, dec!(50)).unwrap();
        assert_eq!(amount, dec!(50));
        assert_eq!(balance, dec!(150));
    }

    #[test]
    fn overdraft_withdrawal_is_rejected() {
        // balance 100, withdraw 200 -> insufficient
        let err = next_balance(dec!(100), TransactionKind::Withdrawal, dec!(200)).unwrap_err();
        assert_eq!(
            err,
            CoreError::insufficient_balance(dec!(200), dec!(100))
        );
    }

    #[test]
    fn withdrawal_to_exactly_zero_is_allowed() {
        let (amount, balance) =
            next_balance(dec!(70), TransactionKind::Withdrawal, dec!(70)).unwrap();
        assert_eq!(amount, dec!(-70));
        assert_eq!(balance, dec!(0));
    }

    #[test]
    fn negative_raw_amounts_are_normalized() {
        let (amount, _) = next_balance(dec!(0), TransactionKind::Deposit, dec!(-100)).unwrap();
        assert_eq!(amount, dec!(100));
    }

    #[test]
    fn edit_cascades_to_later_transactions() {
        // initial 0: deposit 100 (bal 100), withdrawal 30 (bal 70);
        // edit the deposit down to 50 -> deposit bal 50, withdrawal bal 20.
        let mut txs = vec![
            tx(1, 0, TransactionKind::Deposit, dec!(100)),
            tx(2, 10, TransactionKind::Withdrawal, dec!(-30)),
        ];
        recalculate(dec!(0), &mut txs).unwrap();

        txs[0].amount = dec!(50);
        let changed = recalculate(dec!(0), &mut txs).unwrap();

        assert_eq!(changed, vec![1, 2]);
        assert_eq!(txs[0].balance, dec!(50));
        assert_eq!(txs[1].balance, dec!(20));
    }

    #[test]
    fn delete_that_strands_a_withdrawal_is_rejected() {
        // initial 0: after deleting the deposit, the withdrawal of 30 would
        // recompute against 0 and go negative.
        let mut remaining = vec![tx(2, 10, TransactionKind::Withdrawal, dec!(-30))];
        remaining[0].balance = dec!(70);

        let err = recalculate(dec!(0), &mut remaining).unwrap_err();
        assert_eq!(err, CoreError::insufficient_balance(dec!(30), dec!(0)));
    }

    #[test]
    fn recalculation_is_idempotent() {
        let mut txs = vec![
            tx(1, 0, TransactionKind::Deposit, dec!(100)),
            tx(2, 5, TransactionKind::Withdrawal, dec!(40)),
            tx(3, 15, TransactionKind::Deposit, dec!(25)),
        ];
        let first = recalculate(dec!(10), &mut txs).unwrap();
        assert_eq!(first.len(), 3);

        let snapshot = txs.clone();
        let second = recalculate(dec!(10), &mut txs).unwrap();
        assert!(second.is_empty());
        assert_eq!(txs, snapshot);
    }

    #[test]
    fn equal_timestamps_recalculate_in_insertion_order() {
        let mut a = tx(5, 0, TransactionKind::Deposit, dec!(100));
        let mut b = tx(6, 0, TransactionKind::Withdrawal, dec!(60));
        b.date = a.date;
        // Shuffled input; the sort must put id 5 first or the withdrawal
        // would be rejected.
        let mut txs = vec![b.clone(), a.clone()];
        recalculate(dec!(0), &mut txs).unwrap();

        assert_eq!(txs[0].id, 5);
        assert_eq!(txs[0].balance, dec!(100));
        assert_eq!(txs[1].balance, dec!(40));
    }

    #[test]
    fn current_balance_falls_back_to_initial() {
        assert_eq!(current_balance(dec!(2000), None), dec!(2000));

        let mut latest = tx(1, 0, TransactionKind::Deposit, dec!(100));
        latest.balance = dec!(2100);
        assert_eq!(current_balance(dec!(2000), Some(&latest)), dec!(2100));
    }

    proptest! {
        /// Property: for any accepted sequence of movements, every balance in
        /// the chain links to its predecessor and none is negative.
        #[test]
        fn accepted_sequences_satisfy_the_balance_chain(
            initial in 0i64..10_000,
            moves in prop::collection::vec((prop::bool::ANY, 1i64..5_000), 1..30)
        ) {
            let initial = Decimal::from(initial);
            let mut txs: Vec<Transaction> = moves
                .iter()
                .enumerate()
                .map(|(i, (is_deposit, amount))| {
                    let kind = if *is_deposit {
                        TransactionKind::Deposit
                    } else {
                        TransactionKind::Withdrawal
                    };
                    tx(i as i64 + 1, i as i64, kind, Decimal::from(*amount))
                })
                .collect();

            if recalculate(initial, &mut txs).is_ok() {
                let mut previous = initial;
                for tx in &txs {
                    prop_assert_eq!(tx.balance, previous + tx.amount);
                    prop_assert!(tx.balance >= Decimal::ZERO);
                    previous = tx.balance;
                }
            }
        }
    }
}
