//! # Entity Ledger Test Suite
//!
//! Cross-crate tests for the chaincode and its peer host.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Shared request and world builders
//! └── integration/
//!     ├── scenarios.rs   # Reference invocation sequences
//!     ├── determinism.rs # Independent replicas agree
//!     └── failure_injection.rs # Ledger faults never reach the world state
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p el-tests
//! cargo bench -p el-tests
//! ```

pub mod fixtures;
pub mod integration;
