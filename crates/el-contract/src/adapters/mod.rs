//! # Adapters Layer (Outer Hexagon)
//!
//! Reference implementations of `LedgerAccess`.
//!
//! - `InMemoryLedger`: committed world state
//! - `TransactionScope`: per-invocation staging over any accessor
//! - `RecordingLedger`: call-recording test double with failure injection

pub mod memory;
pub mod recording;
pub mod scope;

pub use memory::{validate_key, InMemoryLedger};
pub use recording::{LedgerCall, LedgerCallKind, RecordingLedger};
pub use scope::TransactionScope;
