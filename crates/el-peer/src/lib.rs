//! # Entity Ledger Peer
//!
//! Host process for the entity ledger chaincode: keeps the committed world
//! state, runs each invocation in its own transaction scope and commits the
//! write set of successful invocations.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `peer` | Invocation flow, invariant check, commit |
//! | `script` | JSON-lines request scripts |
//! | `state_file` | World state snapshots on disk |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod peer;
pub mod script;
pub mod state_file;

pub use peer::{EntryPoint, Peer, PeerStats};
pub use script::{load_script, parse_script};
pub use state_file::{load, save, StoredValue, WorldSnapshot};

use anyhow::Result;
use el_contract::events::InvokeResponsePayload;
use std::io::Write;

/// Write one JSON line per response.
///
/// # Errors
///
/// Fails on serialization or I/O errors.
pub fn write_responses<W: Write>(out: &mut W, responses: &[InvokeResponsePayload]) -> Result<()> {
    for response in responses {
        serde_json::to_writer(&mut *out, response)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
