//! # Operations
//!
//! The closed set of chaincode operations and their wire names.

use crate::errors::ContractError;
use std::fmt;
use std::str::FromStr;

/// A chaincode operation selected by function name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Write `n` key/value pairs unconditionally (`init`).
    Initialize,
    /// Assign an amount to `to` and a label to `from` (`invoke`).
    Transfer,
    /// Debit `from` and credit `to` by an amount (`transferBalance`).
    TransferBalance,
    /// Remove one entity (`delete`).
    Delete,
    /// Read one entity (`query`).
    Query,
}

impl Operation {
    /// Every operation, in the order error messages list them.
    pub const ALL: [Self; 5] = [
        Self::Initialize,
        Self::Transfer,
        Self::TransferBalance,
        Self::Delete,
        Self::Query,
    ];

    /// Function name on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialize => "init",
            Self::Transfer => "invoke",
            Self::TransferBalance => "transferBalance",
            Self::Delete => "delete",
            Self::Query => "query",
        }
    }

    /// Returns true if the operation never writes.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Query)
    }

    /// Valid names, quoted and space separated.
    #[must_use]
    pub fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|op| format!("\"{}\"", op.name()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ContractError;

    /// Exact, case-sensitive name match.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "init" => Ok(Self::Initialize),
            "invoke" => Ok(Self::Transfer),
            "transferBalance" => Ok(Self::TransferBalance),
            "delete" => Ok(Self::Delete),
            "query" => Ok(Self::Query),
            _ => Err(ContractError::UnknownOperation {
                name: name.to_string(),
            }),
        }
    }
}
