//! # Driving Ports (API - Inbound)
//!
//! The invocation boundary exposed to the runtime. The runtime supplies the
//! ledger accessor for each call; the chaincode keeps nothing between calls.

use crate::domain::entities::{OperationRequest, Response};
use crate::ports::outbound::LedgerAccess;
use async_trait::async_trait;

/// Chaincode entry points.
///
/// ## Usage
///
/// ```ignore
/// let response = chaincode.invoke(&scope, "query", &["alice".to_string()]).await;
/// if response.is_success() {
///     commit(scope.into_changes());
/// }
/// ```
#[async_trait]
pub trait ChaincodeApi: Send + Sync {
    /// Instantiate the chaincode. Always runs Initialize.
    async fn init(&self, ledger: &dyn LedgerAccess, args: &[String]) -> Response;

    /// Dispatch `function` with `args`.
    ///
    /// Unknown function names fail without touching the ledger.
    async fn invoke(&self, ledger: &dyn LedgerAccess, function: &str, args: &[String])
        -> Response;

    /// Dispatch a request value.
    async fn handle(&self, ledger: &dyn LedgerAccess, request: &OperationRequest) -> Response {
        self.invoke(ledger, &request.function, &request.args).await
    }
}
