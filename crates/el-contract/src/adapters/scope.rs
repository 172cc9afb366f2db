//! # Transaction Scope
//!
//! Per-invocation staging accessor. Reads fall through to the underlying
//! ledger unless the scope has already staged a write or delete for the key.
//! Nothing reaches the underlying ledger until the caller commits the
//! write set returned by [`TransactionScope::into_changes`].

use crate::adapters::memory::validate_key;
use crate::domain::entities::StateChange;
use crate::errors::LedgerError;
use crate::ports::outbound::LedgerAccess;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct WriteSet {
    /// Changes in issue order.
    changes: Vec<StateChange>,
    /// Latest staged value per key; `None` marks a staged delete.
    latest: HashMap<String, Option<Vec<u8>>>,
}

/// Staging accessor for one invocation.
#[derive(Debug)]
pub struct TransactionScope<'a, L: ?Sized> {
    ledger: &'a L,
    write_set: Mutex<WriteSet>,
}

impl<'a, L: LedgerAccess + ?Sized> TransactionScope<'a, L> {
    /// Open a scope over `ledger`.
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            write_set: Mutex::new(WriteSet::default()),
        }
    }

    /// Staged changes so far, in issue order.
    #[must_use]
    pub fn changes(&self) -> Vec<StateChange> {
        self.write_set.lock().changes.clone()
    }

    /// Number of staged changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.write_set.lock().changes.len()
    }

    /// Returns true if nothing has been staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.write_set.lock().changes.is_empty()
    }

    /// Close the scope and take its write set.
    pub fn into_changes(self) -> Vec<StateChange> {
        self.write_set.into_inner().changes
    }

    fn stage(&self, change: StateChange) {
        let mut write_set = self.write_set.lock();
        let value = match &change {
            StateChange::Put { value, .. } => Some(value.clone()),
            StateChange::Delete { .. } => None,
        };
        write_set.latest.insert(change.key().to_string(), value);
        write_set.changes.push(change);
    }
}

#[async_trait]
impl<'a, L: LedgerAccess + ?Sized> LedgerAccess for TransactionScope<'a, L> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let staged = self.write_set.lock().latest.get(key).cloned();
        match staged {
            Some(value) => Ok(value),
            None => self.ledger.get_state(key).await,
        }
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        validate_key(key)?;
        self.stage(StateChange::Put {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        validate_key(key)?;
        self.stage(StateChange::Delete {
            key: key.to_string(),
        });
        Ok(())
    }
}
