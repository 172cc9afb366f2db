//! # Argument Parser
//!
//! Validates argument count and positional types before any handler touches
//! the ledger. Pure: no I/O, no knowledge of ledger content.

use crate::domain::operation::Operation;
use crate::domain::value_objects::{LedgerValue, ValueKind};
use crate::errors::ContractError;

/// Arguments whose count has been checked against an operation's arity.
#[derive(Clone, Copy, Debug)]
pub struct Arguments<'a> {
    operation: Operation,
    args: &'a [String],
}

impl<'a> Arguments<'a> {
    /// Check that exactly `arity` arguments were supplied.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Arity` with the expected and actual counts.
    pub fn expect(
        operation: Operation,
        args: &'a [String],
        arity: usize,
    ) -> Result<Self, ContractError> {
        if args.len() != arity {
            return Err(ContractError::Arity {
                operation,
                expected: arity,
                actual: args.len(),
            });
        }
        Ok(Self { operation, args })
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns true if no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Raw string argument.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not below the checked arity.
    #[must_use]
    pub fn text(&self, position: usize) -> &'a str {
        &self.args[position]
    }

    /// Argument parsed as a counter: a non-negative decimal `i64`.
    ///
    /// # Errors
    ///
    /// `ContractError::Type` if the argument is not a decimal `i64`,
    /// `ContractError::InvalidAmount` if it is negative.
    pub fn counter(&self, position: usize) -> Result<i64, ContractError> {
        let amount = self
            .text(position)
            .parse::<i64>()
            .map_err(|_| self.type_error(position, ValueKind::Integer))?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount {
                operation: self.operation,
                position,
                amount,
            });
        }
        Ok(amount)
    }

    /// Argument parsed as `kind`. Text accepts any string.
    ///
    /// # Errors
    ///
    /// Same as [`Arguments::counter`] for `ValueKind::Integer`.
    pub fn typed(&self, position: usize, kind: ValueKind) -> Result<LedgerValue, ContractError> {
        match kind {
            ValueKind::Integer => self.counter(position).map(LedgerValue::Integer),
            ValueKind::Text => Ok(LedgerValue::Text(self.text(position).to_string())),
        }
    }

    fn type_error(&self, position: usize, expected: ValueKind) -> ContractError {
        ContractError::Type {
            operation: self.operation,
            position,
            expected,
            value: self.text(position).to_string(),
        }
    }
}

/// Validate arity and parse every argument against a list of positional kinds.
///
/// The arity is `kinds.len()`. All positions are parsed before returning, so
/// a caller that writes only after this succeeds never writes partially.
///
/// # Errors
///
/// `ContractError::Arity` on a count mismatch, otherwise the error for the
/// first position that does not parse.
pub fn parse_args(
    operation: Operation,
    args: &[String],
    kinds: &[ValueKind],
) -> Result<Vec<LedgerValue>, ContractError> {
    let checked = Arguments::expect(operation, args, kinds.len())?;
    kinds
        .iter()
        .enumerate()
        .map(|(position, kind)| checked.typed(position, *kind))
        .collect()
}
