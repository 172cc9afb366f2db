//! Initialize: write `n` entities unconditionally.

use super::HandlerResult;
use crate::domain::args::parse_args;
use crate::domain::operation::Operation;
use crate::domain::value_objects::ValueKind;
use crate::ports::outbound::LedgerAccess;
use tracing::{debug, info};

/// Positional argument kinds for `schema`: a text key before each value.
#[must_use]
pub fn argument_kinds(schema: &[ValueKind]) -> Vec<ValueKind> {
    schema
        .iter()
        .flat_map(|kind| [ValueKind::Text, *kind])
        .collect()
}

/// Write every `key value` pair in argument order.
///
/// All values are parsed before the first write, so a type error never
/// leaves a partial initialization behind. Existing keys are overwritten.
///
/// # Errors
///
/// `Arity` unless exactly `2 * schema.len()` arguments are supplied,
/// `Type` for the first value that does not parse as its kind, or the
/// first `Ledger` failure.
pub async fn initialize(
    ledger: &dyn LedgerAccess,
    schema: &[ValueKind],
    args: &[String],
) -> HandlerResult {
    let values = parse_args(Operation::Initialize, args, &argument_kinds(schema))?;

    for pair in values.chunks_exact(2) {
        let key = pair[0].to_string();
        debug!(key = %key, value = %pair[1], "Writing entity");
        ledger.write_value(&key, &pair[1]).await?;
    }

    info!(entities = schema.len(), "Entities initialized");
    Ok(Vec::new())
}
