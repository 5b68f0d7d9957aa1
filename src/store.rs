//! Transaction storage: the read contract the engine consumes, plus the
//! in-memory implementation backing the HTTP service.

use std::collections::HashMap;

use crate::model::{NewTransaction, Transaction, TransactionState, TransactionType, TxId, UserId};

/// Lookup contract the balance engine depends on.
///
/// Implementations return matching transactions in no guaranteed order;
/// callers sort where ordering matters. An empty result is a valid answer,
/// not an error. Duplicate entries in `states` are harmless.
pub trait TransactionStore {
    fn find_by_type_states(
        &self,
        user: UserId,
        kind: TransactionType,
        states: &[TransactionState],
    ) -> Vec<Transaction>;
}

/// Keyed in-memory collection of per-user ledgers.
///
/// Rows are append-only: ids are assigned sequentially per user on insertion
/// and nothing is ever mutated or deleted, so an id doubles as a stable
/// position in the user's history.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    ledgers: HashMap<UserId, Vec<Transaction>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with an empty ledger. Returns false if already known.
    pub fn add_user(&mut self, user: UserId) -> bool {
        if self.ledgers.contains_key(&user) {
            return false;
        }
        self.ledgers.insert(user, Vec::new());
        true
    }

    pub fn user_exists(&self, user: UserId) -> bool {
        self.ledgers.contains_key(&user)
    }

    /// Every transaction of the user, in insertion order.
    pub fn all(&self, user: UserId) -> Vec<Transaction> {
        self.ledgers.get(&user).cloned().unwrap_or_default()
    }

    pub fn get(&self, user: UserId, id: TxId) -> Option<Transaction> {
        self.ledgers
            .get(&user)?
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
    }

    /// Append a new row to the user's ledger, assigning the next id.
    pub fn insert(&mut self, user: UserId, new: NewTransaction) -> Transaction {
        let ledger = self.ledgers.entry(user).or_default();
        let tx = Transaction {
            id: ledger.len() as TxId + 1,
            user_id: user,
            amount: new.amount,
            kind: new.kind,
            state: new.state,
            date: new.date,
        };
        ledger.push(tx.clone());
        tx
    }
}

impl TransactionStore for InMemoryLedger {
    fn find_by_type_states(
        &self,
        user: UserId,
        kind: TransactionType,
        states: &[TransactionState],
    ) -> Vec<Transaction> {
        let Some(ledger) = self.ledgers.get(&user) else {
            return Vec::new();
        };
        ledger
            .iter()
            .filter(|tx| tx.kind == kind && states.contains(&tx.state))
            .cloned()
            .collect()
    }
}
