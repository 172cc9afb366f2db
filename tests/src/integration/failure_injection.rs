//! # Ledger Failure Injection
//!
//! Fails accessor calls at every position an invocation reaches and checks
//! that the failure surfaces as the ledger's own message while the
//! committed world stays untouched.

use async_trait::async_trait;
use el_contract::errors::LedgerError;
use el_contract::ports::outbound::LedgerAccess;
use parking_lot::Mutex;

/// Accessor that serves `budget` calls and then fails every call after.
pub struct BudgetLedger<L> {
    inner: L,
    remaining: Mutex<usize>,
    error: LedgerError,
}

impl<L: LedgerAccess> BudgetLedger<L> {
    /// Allow `budget` calls through to `inner`, then return `error`.
    pub fn new(inner: L, budget: usize, error: LedgerError) -> Self {
        Self {
            inner,
            remaining: Mutex::new(budget),
            error,
        }
    }

    /// The wrapped accessor.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Calls left before failures start.
    pub fn remaining(&self) -> usize {
        *self.remaining.lock()
    }

    fn spend(&self) -> Result<(), LedgerError> {
        let mut remaining = self.remaining.lock();
        if *remaining == 0 {
            return Err(self.error.clone());
        }
        *remaining -= 1;
        Ok(())
    }
}

#[async_trait]
impl<L: LedgerAccess> LedgerAccess for BudgetLedger<L> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.spend()?;
        self.inner.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.spend()?;
        self.inner.put_state(key, value).await
    }

    async fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        self.spend()?;
        self.inner.del_state(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{args, balance_world, seeded_world};
    use el_contract::adapters::{InMemoryLedger, LedgerCallKind, RecordingLedger, TransactionScope};
    use el_contract::service::EntityContract;

    /// Every request here makes at most this many accessor calls.
    const MAX_CALLS: usize = 4;

    /// Run `function` with a budget, committing only on success.
    async fn run_with_budget(
        world: &InMemoryLedger,
        function: &str,
        values: &[&str],
        budget: usize,
    ) -> (bool, String) {
        let contract = EntityContract::default();
        let ledger = BudgetLedger::new(TransactionScope::new(world), budget, LedgerError::Unavailable);
        let response = contract
            .dispatch(&ledger, function, &args(values))
            .await
            .into_response();
        if response.is_success() {
            world.apply(&ledger.inner().changes()).unwrap();
        }
        (response.is_success(), response.message().to_string())
    }

    #[tokio::test]
    async fn test_every_failure_point_leaves_world_untouched() {
        let unavailable = "ledger unavailable";
        let cases: [(&str, &[&str], &str); 5] = [
            ("init", &["alice", "1", "bob", "Name=Bob"], unavailable),
            ("invoke", &["alice", "bob", "42", "Name=Alice"], unavailable),
            ("transferBalance", &["alice", "bob", "10"], unavailable),
            ("delete", &["alice"], unavailable),
            ("query", &["alice"], r#"{"Error":"Failed to get state for alice"}"#),
        ];

        for (function, values, expected) in cases {
            let mut succeeded = false;
            for budget in 0..=MAX_CALLS {
                let world = balance_world(30, 5);
                let before = world.snapshot();
                let (ok, message) = run_with_budget(&world, function, values, budget).await;
                if ok {
                    succeeded = true;
                    continue;
                }
                assert_eq!(message, expected, "{function} at budget {budget}");
                assert_eq!(world.snapshot(), before, "{function} at budget {budget}");
            }
            assert!(succeeded, "{function} never completed within {MAX_CALLS} calls");
        }
    }

    #[tokio::test]
    async fn test_failed_second_put_discards_first() {
        let world = seeded_world();
        let before = world.snapshot();
        let ledger = RecordingLedger::new(TransactionScope::new(&world)).fail_on_nth(
            LedgerCallKind::Put,
            2,
            LedgerError::Timeout,
        );

        let response = EntityContract::default()
            .dispatch(&ledger, "invoke", &args(&["alice", "bob", "42", "Name=Alice"]))
            .await
            .into_response();

        assert!(!response.is_success());
        assert_eq!(response.message(), "ledger access timeout");
        assert_eq!(ledger.calls_of(LedgerCallKind::Put).len(), 2);
        // the first put was staged, but nothing reaches the world
        assert_eq!(ledger.inner().len(), 1);
        assert_eq!(world.snapshot(), before);
    }

    #[tokio::test]
    async fn test_failed_read_stops_before_writes() {
        let world = seeded_world();
        let ledger = RecordingLedger::new(TransactionScope::new(&world)).fail_on_nth(
            LedgerCallKind::Get,
            2,
            LedgerError::AccessDenied,
        );

        let response = EntityContract::default()
            .dispatch(&ledger, "invoke", &args(&["alice", "bob", "42", "Name=Alice"]))
            .await
            .into_response();

        assert_eq!(response.message(), "ledger access denied");
        assert!(ledger.calls_of(LedgerCallKind::Put).is_empty());
        assert!(ledger.inner().is_empty());
    }

    #[tokio::test]
    async fn test_budget_is_spent_per_call() {
        let world = seeded_world();
        let ledger = BudgetLedger::new(TransactionScope::new(&world), 3, LedgerError::Unavailable);
        EntityContract::default()
            .dispatch(&ledger, "query", &args(&["alice"]))
            .await;
        assert_eq!(ledger.remaining(), 2);
    }
}
