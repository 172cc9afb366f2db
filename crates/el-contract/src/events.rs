//! # Invocation Events
//!
//! Wire payloads exchanged between a host and the chaincode. The peer host
//! reads requests and writes responses as JSON lines.
//!
//! ## Correlation
//!
//! `tx_id` is echoed from request to response unchanged. It never affects
//! the result of an invocation.

use crate::domain::entities::{OperationRequest, Response};
use serde::{Deserialize, Serialize};

// =============================================================================
// INBOUND EVENTS
// =============================================================================

/// Request to run one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeRequestPayload {
    /// Transaction id assigned by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Function name.
    pub function: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl From<InvokeRequestPayload> for OperationRequest {
    fn from(payload: InvokeRequestPayload) -> Self {
        Self {
            function: payload.function,
            args: payload.args,
            tx_id: payload.tx_id,
        }
    }
}

// =============================================================================
// OUTBOUND EVENTS
// =============================================================================

/// Result of one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponsePayload {
    /// Transaction id from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// 200 on success, 500 on failure.
    pub status: u16,
    /// Failure message (empty on success).
    pub message: String,
    /// Success payload as text (empty on failure).
    pub payload: String,
}

impl InvokeResponsePayload {
    /// Build the payload for `response`.
    #[must_use]
    pub fn new(tx_id: Option<String>, response: &Response) -> Self {
        Self {
            tx_id,
            status: response.status(),
            message: response.message().to_string(),
            payload: String::from_utf8_lossy(response.payload()).into_owned(),
        }
    }

    /// Returns true for status 200.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Response::OK
    }
}

impl From<Response> for InvokeResponsePayload {
    fn from(response: Response) -> Self {
        Self::new(None, &response)
    }
}
