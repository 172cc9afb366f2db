//! # Recording Ledger
//!
//! Test double that logs every accessor call in order and can fail a chosen
//! kind of call. Used to show that rejected requests never reach the ledger
//! and that ledger failures abort the invocation.

use crate::errors::LedgerError;
use crate::ports::outbound::LedgerAccess;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Kind of accessor call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerCallKind {
    /// `get_state`
    Get,
    /// `put_state`
    Put,
    /// `del_state`
    Delete,
}

/// One recorded accessor call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    /// `get_state(key)`
    Get {
        /// Key read.
        key: String,
    },
    /// `put_state(key, value)`
    Put {
        /// Key written.
        key: String,
        /// Bytes written.
        value: Vec<u8>,
    },
    /// `del_state(key)`
    Delete {
        /// Key deleted.
        key: String,
    },
}

impl LedgerCall {
    /// Kind of this call.
    #[must_use]
    pub fn kind(&self) -> LedgerCallKind {
        match self {
            Self::Get { .. } => LedgerCallKind::Get,
            Self::Put { .. } => LedgerCallKind::Put,
            Self::Delete { .. } => LedgerCallKind::Delete,
        }
    }

    /// Key passed to the call.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Get { key } | Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

#[derive(Clone, Debug)]
struct InjectedFailure {
    kind: LedgerCallKind,
    /// Fail the call with this 1-based index among calls of `kind`.
    nth: usize,
    error: LedgerError,
}

/// Wraps an accessor and records every call made through it.
#[derive(Debug)]
pub struct RecordingLedger<L> {
    inner: L,
    calls: Mutex<Vec<LedgerCall>>,
    failure: Option<InjectedFailure>,
}

impl<L: LedgerAccess> RecordingLedger<L> {
    /// Record calls forwarded to `inner`.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Fail the first call of `kind` with `error`.
    #[must_use]
    pub fn fail_on(self, kind: LedgerCallKind, error: LedgerError) -> Self {
        self.fail_on_nth(kind, 1, error)
    }

    /// Fail the `nth` (1-based) call of `kind` with `error`.
    #[must_use]
    pub fn fail_on_nth(mut self, kind: LedgerCallKind, nth: usize, error: LedgerError) -> Self {
        self.failure = Some(InjectedFailure { kind, nth, error });
        self
    }

    /// All recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Recorded calls of `kind`, in order.
    #[must_use]
    pub fn calls_of(&self, kind: LedgerCallKind) -> Vec<LedgerCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.kind() == kind)
            .cloned()
            .collect()
    }

    /// The wrapped accessor.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Record `call`, returning the injected error if it is due.
    fn record(&self, call: LedgerCall) -> Result<(), LedgerError> {
        let kind = call.kind();
        let mut calls = self.calls.lock();
        calls.push(call);
        match &self.failure {
            Some(failure) if failure.kind == kind => {
                let seen = calls.iter().filter(|c| c.kind() == kind).count();
                if seen == failure.nth {
                    return Err(failure.error.clone());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<L: LedgerAccess> LedgerAccess for RecordingLedger<L> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.record(LedgerCall::Get {
            key: key.to_string(),
        })?;
        self.inner.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.record(LedgerCall::Put {
            key: key.to_string(),
            value: value.clone(),
        })?;
        self.inner.put_state(key, value).await
    }

    async fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        self.record(LedgerCall::Delete {
            key: key.to_string(),
        })?;
        self.inner.del_state(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLedger;

    #[tokio::test]
    async fn test_calls_recorded_in_order() {
        let ledger = RecordingLedger::new(InMemoryLedger::new());
        ledger.put_state("a", b"1".to_vec()).await.unwrap();
        ledger.get_state("a").await.unwrap();
        ledger.del_state("a").await.unwrap();

        let kinds: Vec<_> = ledger.calls().iter().map(LedgerCall::kind).collect();
        assert_eq!(
            kinds,
            vec![
                LedgerCallKind::Put,
                LedgerCallKind::Get,
                LedgerCallKind::Delete
            ]
        );
        assert!(ledger.inner().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure_on_nth_call() {
        let ledger = RecordingLedger::new(InMemoryLedger::new()).fail_on_nth(
            LedgerCallKind::Put,
            2,
            LedgerError::Timeout,
        );

        ledger.put_state("a", b"1".to_vec()).await.unwrap();
        assert_eq!(
            ledger.put_state("b", b"2".to_vec()).await,
            Err(LedgerError::Timeout)
        );

        // The failed call is still recorded, but never forwarded
        assert_eq!(ledger.calls_of(LedgerCallKind::Put).len(), 2);
        assert!(!ledger.inner().contains("b"));
    }
}
