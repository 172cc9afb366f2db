//! # Transfer Handlers
//!
//! Two operations move state between a source and a destination entity:
//!
//! | Wire name | Rule |
//! |-----------|------|
//! | `invoke` | `to` takes the amount, `from` takes the new label |
//! | `transferBalance` | `from` is debited and `to` credited by the amount |
//!
//! Both read the two operands before writing either, and write `from`
//! before `to`. A self-transfer validates fully and then writes nothing.

use super::{require_entity, HandlerResult};
use crate::domain::args::Arguments;
use crate::domain::operation::Operation;
use crate::domain::value_objects::LedgerValue;
use crate::errors::ContractError;
use crate::ports::outbound::LedgerAccess;
use tracing::{debug, info};

// =============================================================================
// ASSIGN FORM
// =============================================================================

/// Arguments: `from`, `to`, counter amount, label.
///
/// # Errors
///
/// `Arity` unless exactly 4 arguments, `NotFound` if either entity is
/// absent, `Type` or `InvalidAmount` for a bad amount, or a `Ledger`
/// failure.
pub async fn transfer(ledger: &dyn LedgerAccess, args: &[String]) -> HandlerResult {
    let args = Arguments::expect(Operation::Transfer, args, 4)?;
    let from = args.text(0);
    let to = args.text(1);

    require_entity(ledger, from).await?;
    require_entity(ledger, to).await?;
    debug!(from, to, "Both transfer operands exist");

    let amount = args.counter(2)?;
    let label = LedgerValue::Text(args.text(3).to_string());

    if from == to {
        debug!(key = from, "Self-transfer, nothing to write");
        return Ok(Vec::new());
    }

    ledger.write_value(from, &label).await?;
    ledger.write_value(to, &LedgerValue::Integer(amount)).await?;

    info!(from, to, amount, "Transfer applied");
    Ok(Vec::new())
}

// =============================================================================
// BALANCE FORM
// =============================================================================

/// Arguments: `from`, `to`, non-negative integer amount.
///
/// Successful calls preserve the sum of the two balances.
///
/// # Errors
///
/// `Arity` unless exactly 3 arguments, `Type` or `InvalidAmount` for a bad
/// amount, `NotFound` if either entity is absent, `Corrupted` if a stored
/// balance is not an integer, `InsufficientBalance` on overdraft, `Overflow`
/// if the credit does not fit, or a `Ledger` failure.
pub async fn transfer_balance(ledger: &dyn LedgerAccess, args: &[String]) -> HandlerResult {
    let args = Arguments::expect(Operation::TransferBalance, args, 3)?;
    let from = args.text(0);
    let to = args.text(1);

    let amount = args.counter(2)?;

    let from_balance = require_balance(ledger, from).await?;
    let to_balance = require_balance(ledger, to).await?;
    debug!(from, from_balance, to, to_balance, "Balances read");

    if from_balance < amount {
        return Err(ContractError::InsufficientBalance {
            key: from.to_string(),
            required: amount,
            available: from_balance,
        });
    }
    let debited = from_balance - amount;
    let credited = if from == to {
        to_balance
    } else {
        to_balance
            .checked_add(amount)
            .ok_or_else(|| ContractError::Overflow { key: to.to_string() })?
    };

    if from == to {
        debug!(key = from, "Self-transfer, nothing to write");
        return Ok(Vec::new());
    }

    ledger
        .write_value(from, &LedgerValue::Integer(debited))
        .await?;
    ledger
        .write_value(to, &LedgerValue::Integer(credited))
        .await?;

    info!(from, to, amount, "Balance transfer applied");
    Ok(Vec::new())
}

async fn require_balance(ledger: &dyn LedgerAccess, key: &str) -> Result<i64, ContractError> {
    ledger
        .read_counter(key)
        .await?
        .ok_or_else(|| ContractError::NotFound {
            key: key.to_string(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
