//! # In-Memory World State
//!
//! Committed ledger state for tests and the peer host. A production runtime
//! would back `LedgerAccess` with the replicated ledger instead.

use crate::domain::entities::StateChange;
use crate::errors::LedgerError;
use crate::ports::outbound::LedgerAccess;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Reject keys the ledger cannot store.
///
/// # Errors
///
/// Returns `LedgerError::InvalidKey` for the empty key.
pub fn validate_key(key: &str) -> Result<(), LedgerError> {
    if key.is_empty() {
        return Err(LedgerError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be an empty string",
        });
    }
    Ok(())
}

/// In-memory committed state. `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding `entries`.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Committed bytes under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the ledger holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of the full state, in key order.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.read().clone()
    }

    /// Apply a write set atomically.
    ///
    /// Every key is validated before the first change is applied, and the
    /// whole batch is applied under one write lock, so readers observe
    /// either none or all of it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidKey` without applying anything.
    pub fn apply(&self, changes: &[StateChange]) -> Result<(), LedgerError> {
        for change in changes {
            validate_key(change.key())?;
        }
        let mut entries = self.entries.write();
        for change in changes {
            match change {
                StateChange::Put { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                StateChange::Delete { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }
}

/// Direct, unstaged access. Wrap in a `TransactionScope` for atomic
/// invocations.
#[async_trait]
impl LedgerAccess for InMemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        validate_key(key)?;
        Ok(self.get(key))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        validate_key(key)?;
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_put_delete() {
        let ledger = InMemoryLedger::new();

        // Initially absent
        assert_eq!(ledger.get_state("alice").await.unwrap(), None);

        ledger.put_state("alice", b"30".to_vec()).await.unwrap();
        assert_eq!(ledger.get_state("alice").await.unwrap(), Some(b"30".to_vec()));

        ledger.del_state("alice").await.unwrap();
        assert!(!ledger.contains("alice"));

        // Deleting again is fine
        ledger.del_state("alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.put_state("", b"x".to_vec()).await,
            Err(LedgerError::InvalidKey { .. })
        ));
        assert!(ledger.get_state("").await.is_err());
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let ledger = InMemoryLedger::from_entries([("alice", b"30".to_vec())]);
        let changes = vec![
            StateChange::Put {
                key: "bob".into(),
                value: b"Name=Bob".to_vec(),
            },
            StateChange::Put {
                key: String::new(),
                value: b"x".to_vec(),
            },
        ];
        assert!(ledger.apply(&changes).is_err());
        assert!(!ledger.contains("bob"));

        let changes = vec![
            StateChange::Put {
                key: "bob".into(),
                value: b"Name=Bob".to_vec(),
            },
            StateChange::Delete {
                key: "alice".into(),
            },
        ];
        ledger.apply(&changes).unwrap();
        assert_eq!(ledger.get("bob"), Some(b"Name=Bob".to_vec()));
        assert!(!ledger.contains("alice"));
    }

    #[test]
    fn test_snapshot_is_key_ordered() {
        let ledger = InMemoryLedger::from_entries([("b", b"2".to_vec()), ("a", b"1".to_vec())]);
        let keys: Vec<_> = ledger.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
