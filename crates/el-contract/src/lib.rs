//! # Entity Ledger Chaincode
//!
//! A deterministic state-transition contract executed against a replicated
//! key-value ledger. Every replica running the same invocation against the
//! same ledger state computes the same response and the same write set.
//!
//! ## Operations
//!
//! | Wire name | Operation | Arguments |
//! |-----------|-----------|-----------|
//! | `init` | Initialize | `2 * n` key/value pairs for the configured schema |
//! | `invoke` | Transfer (assign) | `from to amount label` |
//! | `transferBalance` | Transfer (debit/credit) | `from to amount` |
//! | `delete` | Delete | `key` |
//! | `query` | Query | `key` |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Arguments validated before the first ledger call | `domain/args.rs` - `Arguments::expect()` |
//! | Transfers read both operands before writing either | `handlers/transfer.rs` |
//! | Failed invocations commit nothing | `domain/invariants.rs` - `check_failure_rollback_invariant()` |
//! | Transfers write both entities or neither | `domain/invariants.rs` - `check_paired_write_invariant()` |
//! | Integers round-trip through decimal encoding | `domain/value_objects.rs` - `LedgerValue::decode()` |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Ledger runtime | `LedgerAccess` | Point read, write and delete in the invocation's transaction |
//!
//! ## Usage Example
//!
//! ```ignore
//! use el_contract::prelude::*;
//!
//! let world = InMemoryLedger::new();
//! let contract = EntityContract::default();
//!
//! let scope = TransactionScope::new(&world);
//! let response = contract.init(&scope, &args(["alice", "30", "bob", "Name=Bob"])).await;
//! if response.is_success() {
//!     world.apply(&scope.into_changes())?;
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ErrorPayload, OperationRequest, QueryRecord, Response, StateChange,
    };

    // Value objects
    pub use crate::domain::value_objects::{LedgerValue, ValueKind};

    // Operations and arguments
    pub use crate::domain::args::{parse_args, Arguments};
    pub use crate::domain::operation::Operation;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::ChaincodeApi;
    pub use crate::ports::outbound::LedgerAccess;

    // Adapters
    pub use crate::adapters::{
        InMemoryLedger, LedgerCall, LedgerCallKind, RecordingLedger, TransactionScope,
    };

    // Events
    pub use crate::events::{InvokeRequestPayload, InvokeResponsePayload};

    // Errors
    pub use crate::errors::{ConfigError, ContractError, DecodeError, ErrorKind, LedgerError};

    // Service
    pub use crate::service::{ContractConfig, EntityContract, InvocationOutcome};
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chaincode name reported by hosts.
pub const CONTRACT_NAME: &str = "entity-ledger";
