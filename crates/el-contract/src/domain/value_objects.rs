//! # Value Objects
//!
//! Typed ledger values and the encode/decode boundary between them and the
//! raw bytes held by the ledger.

use crate::errors::{ConfigError, DecodeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// VALUE KIND
// =============================================================================

/// Declared kind of an argument or stored entity value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Decimal integer (`i64`).
    Integer,
    /// Opaque UTF-8 string.
    Text,
}

impl ValueKind {
    /// Lowercase name used in messages and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(Self::Integer),
            "text" | "string" => Ok(Self::Text),
            other => Err(ConfigError::UnknownValueKind(other.to_string())),
        }
    }
}

// =============================================================================
// LEDGER VALUE
// =============================================================================

/// A typed entity value.
///
/// `Integer` encodes as canonical decimal ASCII, `Text` as its UTF-8 bytes.
/// Decoding always names the expected kind, so bytes are never silently
/// reinterpreted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerValue {
    /// Counter entity value.
    Integer(i64),
    /// Label entity value.
    Text(String),
}

impl LedgerValue {
    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Encode for storage.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Integer(n) => n.to_string().into_bytes(),
            Self::Text(s) => s.as_bytes().to_vec(),
        }
    }

    /// Decode stored bytes as `kind`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the bytes are not UTF-8, or not a counter
    /// when `kind` is `Integer`.
    pub fn decode(kind: ValueKind, bytes: &[u8]) -> Result<Self, DecodeError> {
        match kind {
            ValueKind::Integer => Self::decode_counter(bytes).map(Self::Integer),
            ValueKind::Text => std::str::from_utf8(bytes)
                .map(|text| Self::Text(text.to_string()))
                .map_err(|_| DecodeError::NotUtf8),
        }
    }

    /// Decode stored bytes as a counter: a non-negative decimal `i64`.
    ///
    /// # Errors
    ///
    /// `NotUtf8`, `NotInteger`, or `NegativeCounter` for a value below zero.
    pub fn decode_counter(bytes: &[u8]) -> Result<i64, DecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
        let n = text
            .parse::<i64>()
            .map_err(|_| DecodeError::NotInteger(text.to_string()))?;
        if n < 0 {
            return Err(DecodeError::NegativeCounter(n));
        }
        Ok(n)
    }
}

impl fmt::Display for LedgerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LedgerValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for LedgerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LedgerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
