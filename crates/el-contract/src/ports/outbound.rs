//! # Driven Ports (SPI - Outbound)
//!
//! The ledger accessor the chaincode depends on. The runtime provides an
//! implementation scoped to the current invocation's transaction context.

use crate::domain::value_objects::{LedgerValue, ValueKind};
use crate::errors::{ContractError, LedgerError};
use async_trait::async_trait;

// =============================================================================
// LEDGER ACCESS
// =============================================================================

/// Point access to the replicated key-value ledger.
///
/// ## Implementation Notes
///
/// Writes and deletes are staged: they become durable only when the runtime
/// commits the invocation's transaction. Implementations must not retry
/// internally; any failure is returned to the handler, which aborts.
#[async_trait]
pub trait LedgerAccess: Send + Sync {
    /// Read the bytes stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - If the key holds a value
    /// * `None` - If the key is absent (not an error)
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Stage a write of `value` under `key`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Stage a delete of `key`. Deleting an absent key succeeds.
    async fn del_state(&self, key: &str) -> Result<(), LedgerError>;

    /// Read and decode `key` as `kind`.
    ///
    /// Convenience method over `get_state`; absence stays `None`.
    async fn read_value(
        &self,
        key: &str,
        kind: ValueKind,
    ) -> Result<Option<LedgerValue>, ContractError> {
        match self.get_state(key).await? {
            Some(bytes) => LedgerValue::decode(kind, &bytes)
                .map(Some)
                .map_err(|e| e.for_key(key)),
            None => Ok(None),
        }
    }

    /// Read `key` as a counter balance.
    ///
    /// Absence stays `None`; a stored value that is not a non-negative
    /// integer is `Corrupted`.
    async fn read_counter(&self, key: &str) -> Result<Option<i64>, ContractError> {
        match self.get_state(key).await? {
            Some(bytes) => LedgerValue::decode_counter(&bytes)
                .map(Some)
                .map_err(|e| e.for_key(key)),
            None => Ok(None),
        }
    }

    /// Encode and write `value` under `key`.
    async fn write_value(&self, key: &str, value: &LedgerValue) -> Result<(), ContractError> {
        self.put_state(key, value.encode()).await?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
