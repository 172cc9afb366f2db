//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the chaincode and its runtime.
//!
//! - **Driving Port (Inbound)**: `ChaincodeApi`
//! - **Driven Port (Outbound)**: `LedgerAccess`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
