//! # Peer Host
//!
//! Runs invocations against a committed world state. Each invocation gets a
//! fresh `TransactionScope`; its write set is checked against the domain
//! invariants and committed atomically on success, discarded otherwise.
//!
//! Invocations are serialized: the commit lock is held from opening the
//! scope until the write set is applied, so no invocation reads state that
//! a concurrent one is about to overwrite.
//!
//! ## Invocation Flow
//!
//! ```text
//! request ──→ TransactionScope ──→ EntityContract ──→ outcome
//!                                                       │
//!                     success + invariants hold ──→ world.apply(changes)
//!                     anything else            ──→ discard
//! ```

use el_contract::adapters::{InMemoryLedger, TransactionScope};
use el_contract::domain::entities::{OperationRequest, Response, StateChange};
use el_contract::domain::invariants::{check_all_invariants, InvariantCheckResult};
use el_contract::domain::operation::Operation;
use el_contract::events::InvokeResponsePayload;
use el_contract::service::{EntityContract, InvocationOutcome};
use el_telemetry::{record_commit, record_error, record_invocation, InvocationTimer, Outcome};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Metrics label for requests whose function name did not resolve.
const UNKNOWN_OPERATION_LABEL: &str = "unknown";

/// Which chaincode entry point a request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    /// Instantiation: always runs Initialize.
    Init,
    /// Regular invocation: dispatches on the function name.
    Invoke,
}

/// Statistics for the peer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PeerStats {
    /// Total invocations run.
    pub invocations: u64,
    /// Invocations that returned success.
    pub successes: u64,
    /// Invocations that returned failure.
    pub failures: u64,
    /// Non-empty write sets committed.
    pub commits: u64,
    /// Successful invocations whose write set broke an invariant.
    pub invariant_violations: u64,
}

/// The peer: a world state plus the chaincode.
#[derive(Debug)]
pub struct Peer {
    /// Committed state.
    world: InMemoryLedger,
    /// Chaincode.
    contract: EntityContract,
    /// Peer statistics.
    stats: RwLock<PeerStats>,
    /// Held across execute and commit of one invocation.
    commit_lock: Mutex<()>,
}

impl Peer {
    /// Create a peer over `world`.
    #[must_use]
    pub fn new(contract: EntityContract, world: InMemoryLedger) -> Self {
        Self {
            world,
            contract,
            stats: RwLock::new(PeerStats::default()),
            commit_lock: Mutex::new(()),
        }
    }

    /// Committed world state.
    #[must_use]
    pub fn world(&self) -> &InMemoryLedger {
        &self.world
    }

    /// Chaincode run by this peer.
    #[must_use]
    pub fn contract(&self) -> &EntityContract {
        &self.contract
    }

    /// Get current peer statistics.
    #[must_use]
    pub fn stats(&self) -> PeerStats {
        self.stats.read().clone()
    }

    /// Run one request through `entry` and commit or discard its writes.
    ///
    /// A missing transaction id is filled with a fresh UUID for log
    /// correlation.
    #[instrument(
        skip(self, request),
        fields(function = %request.function, tx_id = tracing::field::Empty)
    )]
    pub async fn submit(
        &self,
        entry: EntryPoint,
        request: OperationRequest,
    ) -> InvokeResponsePayload {
        let tx_id = request
            .tx_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        tracing::Span::current().record("tx_id", tx_id.as_str());

        let timer = InvocationTimer::start();
        let serialized = self.commit_lock.lock().await;
        let scope = TransactionScope::new(&self.world);

        let outcome = match entry {
            EntryPoint::Init => InvocationOutcome {
                operation: Some(Operation::Initialize),
                result: self
                    .contract
                    .execute(&scope, Operation::Initialize, &request.args)
                    .await,
            },
            EntryPoint::Invoke => {
                self.contract
                    .dispatch(&scope, &request.function, &request.args)
                    .await
            }
        };
        let changes = scope.into_changes();

        let operation = outcome.operation;
        let error_kind = outcome.error_kind();
        let response = self.settle(operation, outcome.into_response(), changes);
        drop(serialized);

        let label = operation.map_or(UNKNOWN_OPERATION_LABEL, Operation::name);
        {
            let mut stats = self.stats.write();
            stats.invocations += 1;
            if response.is_success() {
                stats.successes += 1;
            } else {
                stats.failures += 1;
            }
        }
        if let Some(kind) = error_kind {
            record_error(kind.as_str());
        }
        let outcome_label = if response.is_success() {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        record_invocation(label, outcome_label, timer.elapsed());

        InvokeResponsePayload::new(Some(tx_id), &response)
    }

    /// Run a regular invocation.
    pub async fn invoke(&self, request: OperationRequest) -> InvokeResponsePayload {
        self.submit(EntryPoint::Invoke, request).await
    }

    /// Run the instantiation entry point with `args`.
    pub async fn init(&self, args: Vec<String>) -> InvokeResponsePayload {
        let request = OperationRequest::new(Operation::Initialize.name(), args);
        self.submit(EntryPoint::Init, request).await
    }

    /// Run `requests` in order, one transaction each.
    pub async fn run_batch(&self, requests: Vec<OperationRequest>) -> Vec<InvokeResponsePayload> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.invoke(request).await);
        }
        responses
    }

    /// Commit `changes` for a successful response, discard them otherwise.
    fn settle(
        &self,
        operation: Option<Operation>,
        response: Response,
        changes: Vec<StateChange>,
    ) -> Response {
        let Some(operation) = operation.filter(|_| response.is_success()) else {
            if !changes.is_empty() {
                debug!(discarded = changes.len(), "Discarding staged changes");
            }
            return response;
        };

        let entity_count = self.contract.config().entity_count();
        if let InvariantCheckResult::Invalid(violations) =
            check_all_invariants(operation, entity_count, &response, &changes)
        {
            let detail = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            error!(%operation, violations = %detail, "Write set rejected");
            self.stats.write().invariant_violations += 1;
            return Response::failure(format!("Invariant violation: {detail}"));
        }

        if changes.is_empty() {
            return response;
        }

        match self.world.apply(&changes) {
            Ok(()) => {
                self.stats.write().commits += 1;
                record_commit();
                info!(%operation, changes = changes.len(), "Write set committed");
                response
            }
            Err(e) => {
                warn!(%operation, error = %e, "Commit failed");
                Response::failure(e.to_string())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
