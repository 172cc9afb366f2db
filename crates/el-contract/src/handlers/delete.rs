//! Delete: remove one entity.

use super::HandlerResult;
use crate::domain::args::Arguments;
use crate::domain::operation::Operation;
use crate::ports::outbound::LedgerAccess;
use tracing::info;

/// Delete the entity named by the single argument.
///
/// No existence check: deleting an absent key succeeds.
///
/// # Errors
///
/// `Arity` unless exactly one argument, or a `Ledger` failure.
pub async fn delete(ledger: &dyn LedgerAccess, args: &[String]) -> HandlerResult {
    let args = Arguments::expect(Operation::Delete, args, 1)?;
    let key = args.text(0);

    ledger.del_state(key).await?;

    info!(key, "Entity deleted");
    Ok(Vec::new())
}
