//! # Entity Contract Service
//!
//! The dispatcher. Maps a function name to its handler through the closed
//! `Operation` enum and renders the handler result into a `Response` at
//! the invocation boundary.
//!
//! ## Determinism
//!
//! - No process-wide mutable state; `EntityContract` is immutable after
//!   construction and shareable behind `Arc`
//! - The only suspension points are `LedgerAccess` awaits
//! - No timeouts or retries; a `LedgerError` aborts the invocation

use crate::domain::entities::{ErrorPayload, OperationRequest, Response};
use crate::domain::operation::Operation;
use crate::domain::value_objects::ValueKind;
use crate::errors::{ConfigError, ContractError, ErrorKind};
use crate::handlers::{self, HandlerResult};
use crate::ports::inbound::ChaincodeApi;
use crate::ports::outbound::LedgerAccess;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

/// Environment variable holding a comma-separated Initialize schema.
pub const INIT_SCHEMA_ENV: &str = "EL_INIT_SCHEMA";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Contract configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Value kind of each entity Initialize writes, in argument order.
    pub init_schema: Vec<ValueKind>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            // key1 int key2 string
            init_schema: vec![ValueKind::Integer, ValueKind::Text],
        }
    }
}

impl ContractConfig {
    /// Configuration with a custom Initialize schema.
    #[must_use]
    pub fn with_schema(init_schema: Vec<ValueKind>) -> Self {
        Self { init_schema }
    }

    /// Parse a comma-separated schema such as `integer,text`.
    ///
    /// # Errors
    ///
    /// `UnknownValueKind` for an unrecognised name, `EmptyInitSchema` if no
    /// kinds are listed.
    pub fn from_schema_str(schema: &str) -> Result<Self, ConfigError> {
        let init_schema = schema
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ValueKind>, _>>()?;
        let config = Self { init_schema };
        config.validate()?;
        Ok(config)
    }

    /// Read `EL_INIT_SCHEMA`, falling back to the default schema.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(INIT_SCHEMA_ENV) {
            Ok(schema) => Self::from_schema_str(&schema),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// `EmptyInitSchema` if Initialize would write nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.init_schema.is_empty() {
            return Err(ConfigError::EmptyInitSchema);
        }
        Ok(())
    }

    /// Number of entities Initialize writes.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.init_schema.len()
    }

    /// Argument count Initialize requires.
    #[must_use]
    pub fn init_arity(&self) -> usize {
        2 * self.init_schema.len()
    }
}

// =============================================================================
// INVOCATION OUTCOME
// =============================================================================

/// Handler result before it is rendered into a `Response`.
///
/// Hosts that need the typed error (for metrics or logs) dispatch through
/// [`EntityContract::dispatch`] and render afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// Resolved operation; `None` for an unknown function name.
    pub operation: Option<Operation>,
    /// Handler output.
    pub result: HandlerResult,
}

impl InvocationOutcome {
    /// Returns true if the handler succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Classification of the failure, if any.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.result.as_ref().err().map(ContractError::kind)
    }

    /// Render into the boundary response.
    ///
    /// Query failures render structured messages:
    /// `{"Error":"Nil amount for <key>"}` for an absent key and
    /// `{"Error":"Failed to get state for <key>"}` for a ledger failure.
    /// Every other error renders its display string.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self.result {
            Ok(payload) => Response::success(payload),
            Err(ContractError::NotFound { key }) if self.operation == Some(Operation::Query) => {
                Response::failure(ErrorPayload::missing_entity(&key).to_json())
            }
            Err(ContractError::StateRead { key, .. })
                if self.operation == Some(Operation::Query) =>
            {
                Response::failure(ErrorPayload::failed_read(&key).to_json())
            }
            Err(err) => Response::failure(err.to_string()),
        }
    }
}

// =============================================================================
// ENTITY CONTRACT
// =============================================================================

/// The entity ledger chaincode.
#[derive(Debug, Clone, Default)]
pub struct EntityContract {
    config: ContractConfig,
}

impl EntityContract {
    /// Create a contract.
    ///
    /// # Errors
    ///
    /// Returns the validation error for an invalid configuration.
    pub fn new(config: ContractConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Contract configuration.
    #[must_use]
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Run the handler for `operation`.
    pub async fn execute(
        &self,
        ledger: &dyn LedgerAccess,
        operation: Operation,
        args: &[String],
    ) -> HandlerResult {
        match operation {
            Operation::Initialize => {
                handlers::initialize(ledger, &self.config.init_schema, args).await
            }
            Operation::Transfer => handlers::transfer(ledger, args).await,
            Operation::TransferBalance => handlers::transfer_balance(ledger, args).await,
            Operation::Delete => handlers::delete(ledger, args).await,
            Operation::Query => handlers::query(ledger, args).await,
        }
    }

    /// Resolve `function` and run its handler, keeping the typed result.
    ///
    /// An unknown name fails before any ledger call.
    pub async fn dispatch(
        &self,
        ledger: &dyn LedgerAccess,
        function: &str,
        args: &[String],
    ) -> InvocationOutcome {
        let outcome = match function.parse::<Operation>() {
            Ok(operation) => InvocationOutcome {
                operation: Some(operation),
                result: self.execute(ledger, operation, args).await,
            },
            Err(err) => InvocationOutcome {
                operation: None,
                result: Err(err),
            },
        };
        log_outcome(function, &outcome);
        outcome
    }
}

fn log_outcome(function: &str, outcome: &InvocationOutcome) {
    match &outcome.result {
        Ok(payload) => {
            debug!(function, payload_len = payload.len(), "Invocation succeeded");
        }
        Err(err) if err.is_infrastructure() => {
            error!(function, error = %err, "Ledger failure, invocation aborted");
        }
        Err(err) => {
            warn!(function, kind = %err.kind(), error = %err, "Invocation rejected");
        }
    }
}

#[async_trait]
impl ChaincodeApi for EntityContract {
    #[instrument(skip(self, ledger, args), fields(function = "init"))]
    async fn init(&self, ledger: &dyn LedgerAccess, args: &[String]) -> Response {
        let outcome = InvocationOutcome {
            operation: Some(Operation::Initialize),
            result: self.execute(ledger, Operation::Initialize, args).await,
        };
        log_outcome(Operation::Initialize.name(), &outcome);
        outcome.into_response()
    }

    #[instrument(skip(self, ledger, args))]
    async fn invoke(
        &self,
        ledger: &dyn LedgerAccess,
        function: &str,
        args: &[String],
    ) -> Response {
        self.dispatch(ledger, function, args).await.into_response()
    }

    #[instrument(
        skip_all,
        fields(function = %request.function, tx_id = request.tx_id.as_deref().unwrap_or("-"))
    )]
    async fn handle(&self, ledger: &dyn LedgerAccess, request: &OperationRequest) -> Response {
        self.dispatch(ledger, &request.function, &request.args)
            .await
            .into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================
