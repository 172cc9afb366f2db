//! Shared builders for integration tests and benchmarks.

use el_contract::adapters::InMemoryLedger;
use el_contract::domain::entities::OperationRequest;

/// Owned argument list.
#[must_use]
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Request with an explicit transaction id, so replicas log identically.
#[must_use]
pub fn request(tx_id: &str, function: &str, values: &[&str]) -> OperationRequest {
    OperationRequest::new(function, values.iter().copied()).with_tx_id(tx_id)
}

/// World holding the reference pair: `alice = 30`, `bob = Name=Bob`.
#[must_use]
pub fn seeded_world() -> InMemoryLedger {
    InMemoryLedger::from_entries([("alice", b"30".to_vec()), ("bob", b"Name=Bob".to_vec())])
}

/// World holding two integer balances.
#[must_use]
pub fn balance_world(alice: i64, bob: i64) -> InMemoryLedger {
    InMemoryLedger::from_entries([
        ("alice", alice.to_string().into_bytes()),
        ("bob", bob.to_string().into_bytes()),
    ])
}
