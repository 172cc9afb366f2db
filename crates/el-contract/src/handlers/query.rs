//! Query: read one entity.

use super::HandlerResult;
use crate::domain::args::Arguments;
use crate::domain::entities::QueryRecord;
use crate::domain::operation::Operation;
use crate::domain::value_objects::ValueKind;
use crate::errors::ContractError;
use crate::ports::outbound::LedgerAccess;
use tracing::debug;

/// Return `{"Name":key,"Value":stored}` for the single argument.
///
/// The stored bytes are returned exactly, never lossily converted.
///
/// # Errors
///
/// `Arity` unless exactly one argument, `NotFound` if the key is absent,
/// `Corrupted` if the stored bytes are not UTF-8, or `StateRead` carrying
/// the key for a ledger failure.
pub async fn query(ledger: &dyn LedgerAccess, args: &[String]) -> HandlerResult {
    let args = Arguments::expect(Operation::Query, args, 1)?;
    let key = args.text(0);

    let value = ledger
        .read_value(key, ValueKind::Text)
        .await
        .map_err(|err| match err {
            ContractError::Ledger(source) => ContractError::StateRead {
                key: key.to_string(),
                source,
            },
            other => other,
        })?
        .ok_or_else(|| ContractError::NotFound {
            key: key.to_string(),
        })?;
    debug!(key, value = %value, "Entity read");

    Ok(QueryRecord {
        key: key.to_string(),
        value: value.to_string(),
    }
    .to_json())
}
