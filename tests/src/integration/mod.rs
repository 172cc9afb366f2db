//! Integration flows across the contract, its adapters and the peer.

pub mod determinism;
pub mod failure_injection;
pub mod scenarios;
