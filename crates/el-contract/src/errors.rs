//! # Error Types
//!
//! All error types for chaincode execution.

use crate::domain::operation::Operation;
use crate::domain::value_objects::ValueKind;
use thiserror::Error;

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors returned by the chaincode handlers.
///
/// Every variant is returned, never panicked. The service renders them into a
/// `Response::Failure` at the invocation boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Wrong number of arguments for an operation.
    #[error("Incorrect number of arguments for {operation}. Expecting {expected}, got {actual}")]
    Arity {
        /// Operation being invoked.
        operation: Operation,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// An argument could not be parsed as its declared kind.
    #[error("Invalid argument at position {position} for {operation}: expecting {expected} value, got {value:?}")]
    Type {
        /// Operation being invoked.
        operation: Operation,
        /// Zero-based argument position.
        position: usize,
        /// Kind the position requires.
        expected: ValueKind,
        /// Offending raw argument.
        value: String,
    },

    /// A referenced entity is absent where existence is required.
    #[error("Entity not found: {key}")]
    NotFound {
        /// Missing entity key.
        key: String,
    },

    /// The function name does not match any operation.
    #[error("Invalid function name {name:?}. Expecting {}", Operation::expected_names())]
    UnknownOperation {
        /// Name supplied by the caller.
        name: String,
    },

    /// Infrastructure failure from the ledger accessor.
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    /// Ledger read failed while Query fetched `key`.
    #[error("Failed to get state for {key}: {source}")]
    StateRead {
        /// Entity key being read.
        key: String,
        /// Underlying ledger failure.
        source: LedgerError,
    },

    /// A counter argument is negative.
    #[error("Invalid amount {amount} at position {position} for {operation}: counter values must not be negative")]
    InvalidAmount {
        /// Operation being invoked.
        operation: Operation,
        /// Zero-based argument position.
        position: usize,
        /// Rejected value.
        amount: i64,
    },

    /// Source balance is lower than the requested amount.
    #[error("Insufficient balance in {key}: required {required}, available {available}")]
    InsufficientBalance {
        /// Source entity key.
        key: String,
        /// Requested amount.
        required: i64,
        /// Current balance.
        available: i64,
    },

    /// Crediting the destination would overflow `i64`.
    #[error("Balance overflow for {key}")]
    Overflow {
        /// Destination entity key.
        key: String,
    },

    /// Stored bytes do not decode as the kind the operation requires.
    #[error("Corrupted value for {key}: {reason}")]
    Corrupted {
        /// Entity key.
        key: String,
        /// Decode failure description.
        reason: String,
    },
}

impl ContractError {
    /// Stable classification used for logging and metrics labels.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Arity { .. } => ErrorKind::Arity,
            Self::Type { .. } => ErrorKind::Type,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            Self::Ledger(_) | Self::StateRead { .. } => ErrorKind::Ledger,
            Self::InvalidAmount { .. }
            | Self::InsufficientBalance { .. }
            | Self::Overflow { .. }
            | Self::Corrupted { .. } => ErrorKind::Validation,
        }
    }

    /// Returns true if the failure came from the ledger, not the request.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Ledger(_) | Self::StateRead { .. })
    }
}

/// Error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count.
    Arity,
    /// Unparseable argument.
    Type,
    /// Missing entity.
    NotFound,
    /// Unknown function name.
    UnknownOperation,
    /// Wrapped ledger failure.
    Ledger,
    /// Balance or decode validation failure.
    Validation,
}

impl ErrorKind {
    /// Label form of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arity => "ArityError",
            Self::Type => "TypeError",
            Self::NotFound => "NotFoundError",
            Self::UnknownOperation => "UnknownOperation",
            Self::Ledger => "LedgerError",
            Self::Validation => "ValidationError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from ledger access operations.
///
/// Absence of a key is not an error; `get_state` returns `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Key rejected by the ledger.
    #[error("invalid ledger key {key:?}: {reason}")]
    InvalidKey {
        /// Rejected key.
        key: String,
        /// Reason for rejection.
        reason: &'static str,
    },

    /// Connection to the ledger lost.
    #[error("ledger unavailable")]
    Unavailable,

    /// Ledger call timed out.
    #[error("ledger access timeout")]
    Timeout,

    /// Ledger rejected the call.
    #[error("ledger access denied")]
    AccessDenied,

    /// Other ledger failure.
    #[error("ledger error: {0}")]
    Other(String),
}

// =============================================================================
// DECODE ERRORS
// =============================================================================

/// Errors decoding stored bytes into a `LedgerValue`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Stored bytes are not valid UTF-8.
    #[error("stored bytes are not valid UTF-8")]
    NotUtf8,

    /// Stored text is not a decimal integer.
    #[error("expecting a decimal integer, found {0:?}")]
    NotInteger(String),

    /// Stored counter is below zero.
    #[error("counter value {0} is negative")]
    NegativeCounter(i64),
}

impl DecodeError {
    /// Attach the entity key.
    #[must_use]
    pub fn for_key(self, key: &str) -> ContractError {
        ContractError::Corrupted {
            key: key.to_string(),
            reason: self.to_string(),
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors in contract configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Initialize needs at least one entity.
    #[error("init schema must declare at least one entity")]
    EmptyInitSchema,

    /// Unrecognised value kind name.
    #[error("unknown value kind {0:?}: expecting \"integer\" or \"text\"")]
    UnknownValueKind(String),
}

// =============================================================================
// TESTS
// =============================================================================
