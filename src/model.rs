//! Core domain types for the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Amount;

/// User identifier.
pub type UserId = u64;

/// Transaction identifier, unique within one user's ledger.
pub type TxId = u64;

/// The kind of money movement a transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Funds credited to the account.
    Deposit,
    /// Funds owed back to the payer; counts against the balance from the
    /// moment it is requested, not from settlement.
    Refund,
    /// A withdrawal planned for a given date, executed once balance allows.
    ScheduledWithdrawal,
}

/// Lifecycle state of a transaction. Read-side code only filters by state;
/// it never transitions one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Pending,
    Scheduled,
    Completed,
}

/// A single ledger row. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub user_id: UserId,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub state: TransactionState,
    /// Orders scheduled withdrawals during allocation.
    pub date: NaiveDate,
}

/// Client-supplied fields of a transaction to be created; the store assigns
/// the identifier and stamps the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub state: TransactionState,
    pub date: NaiveDate,
}

/// A scheduled withdrawal together with how much of it the current balance
/// can satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Percentage of the withdrawal amount covered, two-decimal precision.
    /// Capped at 100 above; goes negative when the balance itself is.
    pub coverage_rate: f64,
}
