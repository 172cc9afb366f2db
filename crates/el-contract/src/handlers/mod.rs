//! # Entity Store Handlers
//!
//! One async function per operation. Each validates its arguments through
//! `domain::args` before the first ledger call and returns the success
//! payload, or the error the service renders into a failure response.
//!
//! Handlers never retry. A `LedgerError` aborts the handler; Query wraps it
//! with the key it was reading.

pub mod delete;
pub mod initialize;
pub mod query;
pub mod transfer;

pub use delete::delete;
pub use initialize::initialize;
pub use query::query;
pub use transfer::{transfer, transfer_balance};

use crate::errors::ContractError;
use crate::ports::outbound::LedgerAccess;

/// Output of a handler: the success payload (empty for writes).
pub type HandlerResult = Result<Vec<u8>, ContractError>;

/// Read `key`, failing with `NotFound` if it is absent.
pub(crate) async fn require_entity(
    ledger: &dyn LedgerAccess,
    key: &str,
) -> Result<Vec<u8>, ContractError> {
    ledger
        .get_state(key)
        .await?
        .ok_or_else(|| ContractError::NotFound {
            key: key.to_string(),
        })
}
