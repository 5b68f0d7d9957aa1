//! Balance and coverage computation over a user's ledger.
//!
//! Pure read-side logic: the functions here query the store, fold over the
//! results, and build values. Nothing is written back, nothing is cached;
//! every call recomputes from the current transaction set. Caller validates
//! that the user exists before invoking any of this.

use serde::Serialize;
use tracing::debug;

use crate::Amount;
use crate::model::{Coverage, Transaction, TransactionState, TransactionType, UserId};
use crate::store::TransactionStore;

/// Everything the balance endpoint reports for one user.
#[derive(Debug, Serialize)]
pub struct BalanceReport {
    pub completed_withdrawals: Vec<Transaction>,
    pub coverage_of_scheduled_withdrawals: Vec<Coverage>,
    pub balance: Amount,
}

fn total(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .fold(Amount::ZERO, |sum, tx| sum + tx.amount)
}

/// Net balance: completed deposits, minus refunds (a refund counts from the
/// moment it is requested, so pending ones are included), minus completed
/// scheduled withdrawals. Unrounded; may be negative.
pub fn balance<S: TransactionStore>(store: &S, user: UserId) -> Amount {
    use TransactionState::{Completed, Pending};

    let deposits = store.find_by_type_states(user, TransactionType::Deposit, &[Completed]);
    let refunds = store.find_by_type_states(user, TransactionType::Refund, &[Completed, Pending]);
    let withdrawals =
        store.find_by_type_states(user, TransactionType::ScheduledWithdrawal, &[Completed]);

    let balance = total(&deposits) - total(&refunds) - total(&withdrawals);
    debug!(
        user,
        deposits = deposits.len(),
        refunds = refunds.len(),
        withdrawals = withdrawals.len(),
        %balance,
        "balance computed"
    );
    balance
}

/// Coverage of every still-scheduled withdrawal, oldest first.
pub fn scheduled_coverage<S: TransactionStore>(store: &S, user: UserId) -> Vec<Coverage> {
    let opening = balance(store, user);

    let mut scheduled = store.find_by_type_states(
        user,
        TransactionType::ScheduledWithdrawal,
        &[TransactionState::Scheduled],
    );
    // stable sort: same-date withdrawals keep their retrieval order
    scheduled.sort_by_key(|tx| tx.date);

    debug!(user, scheduled = scheduled.len(), %opening, "allocating coverage");
    allocate(opening, scheduled)
}

/// Sequential greedy allocation: a left-to-right fold carrying the remaining
/// balance. Each withdrawal is measured against whatever is left after the
/// ones dated before it have drawn the balance down, so earlier withdrawals
/// have priority when funds run short.
pub fn allocate(opening: Amount, withdrawals: Vec<Transaction>) -> Vec<Coverage> {
    withdrawals
        .into_iter()
        .scan(opening, |remaining, tx| {
            let (coverage_rate, rest) = cover(*remaining, tx.amount);
            *remaining = rest;
            Some(Coverage {
                transaction: tx,
                coverage_rate,
            })
        })
        .collect()
}

/// One allocation step: the rate covered for a single withdrawal and the
/// balance left over for the next one.
///
/// A zero balance or a zero-amount withdrawal is a defined outcome (rate 0,
/// nothing carried forward), and the check also guards the division below.
/// The rate is capped at 100 but has no floor: a negative balance produces a
/// negative rate.
fn cover(balance: Amount, amount: Amount) -> (f64, Amount) {
    if balance.is_zero() || amount.is_zero() {
        return (0.0, Amount::ZERO);
    }

    let rate = (balance.to_f64() / amount.to_f64()).min(1.0) * 100.0;
    let rest = if balance >= amount {
        balance - amount
    } else {
        Amount::ZERO
    };
    (round2(rate), rest)
}

/// Two-decimal rounding, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The composite served by `GET /users/:user_id/balance`: completed
/// withdrawals, per-withdrawal coverage, and the net balance, each computed
/// fresh from the store.
pub fn report<S: TransactionStore>(store: &S, user: UserId) -> BalanceReport {
    let completed_withdrawals = store.find_by_type_states(
        user,
        TransactionType::ScheduledWithdrawal,
        &[TransactionState::Completed],
    );

    BalanceReport {
        completed_withdrawals,
        coverage_of_scheduled_withdrawals: scheduled_coverage(store, user),
        balance: balance(store, user),
    }
}
