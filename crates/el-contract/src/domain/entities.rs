//! # Core Domain Entities
//!
//! Requests, responses, query records and staged state changes.

use serde::{Deserialize, Serialize};

// =============================================================================
// OPERATION REQUEST
// =============================================================================

/// The unit of work: a function name plus ordered string arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Function name (`init`, `invoke`, `delete`, ...).
    pub function: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Transaction id assigned by the runtime. Used for log correlation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

impl OperationRequest {
    /// Creates a request without a transaction id.
    #[must_use]
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
            tx_id: None,
        }
    }

    /// Attach a transaction id.
    #[must_use]
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Result of one invocation, returned to the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The invocation succeeded; the runtime may commit staged writes.
    Success {
        /// Operation output (empty for writes).
        payload: Vec<u8>,
    },
    /// The invocation failed; staged writes must be discarded.
    Failure {
        /// Human-readable message.
        message: String,
    },
}

impl Response {
    /// Status code of a successful response.
    pub const OK: u16 = 200;
    /// Status code of a failed response.
    pub const ERROR: u16 = 500;

    /// Success with a payload.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self::Success { payload }
    }

    /// Success with no payload.
    #[must_use]
    pub fn empty() -> Self {
        Self::Success {
            payload: Vec::new(),
        }
    }

    /// Failure with a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns true for `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status code (200 or 500).
    #[must_use]
    pub fn status(&self) -> u16 {
        if self.is_success() {
            Self::OK
        } else {
            Self::ERROR
        }
    }

    /// Success payload; empty for failures.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Success { payload } => payload,
            Self::Failure { .. } => &[],
        }
    }

    /// Failure message; empty for successes.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { .. } => "",
            Self::Failure { message } => message,
        }
    }
}

// =============================================================================
// QUERY PAYLOADS
// =============================================================================

/// Record returned by a successful query: `{"Name":..,"Value":..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Entity key.
    #[serde(rename = "Name")]
    pub key: String,
    /// Stored value, exactly as held by the ledger.
    #[serde(rename = "Value")]
    pub value: String,
}

impl QueryRecord {
    /// JSON encoding of the record, `Name` before `Value`.
    #[must_use]
    pub fn to_json(&self) -> Vec<u8> {
        serde_json::json!({ "Name": self.key, "Value": self.value })
            .to_string()
            .into_bytes()
    }
}

/// Structured failure payload: `{"Error":..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Failure description.
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorPayload {
    /// Payload for a query on an absent key.
    #[must_use]
    pub fn missing_entity(key: &str) -> Self {
        Self {
            error: format!("Nil amount for {key}"),
        }
    }

    /// Payload for a query whose ledger read failed.
    #[must_use]
    pub fn failed_read(key: &str) -> Self {
        Self {
            error: format!("Failed to get state for {key}"),
        }
    }

    /// JSON encoding of the payload.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "Error": self.error }).to_string()
    }
}

// =============================================================================
// STATE CHANGES
// =============================================================================

/// A staged ledger mutation, in the order it was issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Write `value` under `key`.
    Put {
        /// Entity key.
        key: String,
        /// Encoded value.
        value: Vec<u8>,
    },
    /// Remove `key`.
    Delete {
        /// Entity key.
        key: String,
    },
}

impl StateChange {
    /// Key touched by this change.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }

    /// Returns true for writes.
    #[must_use]
    pub fn is_put(&self) -> bool {
        matches!(self, Self::Put { .. })
    }
}
