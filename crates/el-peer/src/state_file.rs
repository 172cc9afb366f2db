//! World state snapshots on disk.
//!
//! Format: `{"entries":{"<key>":"<utf-8 value>", "<key>":{"hex":"<bytes>"}}}`.
//! UTF-8 values are stored as plain strings, anything else as hex.

use anyhow::{Context, Result};
use el_contract::adapters::InMemoryLedger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// One stored value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// Valid UTF-8 bytes.
    Text(String),
    /// Arbitrary bytes.
    Bytes {
        /// Hex encoding of the bytes.
        hex: String,
    },
}

impl StoredValue {
    /// Choose the representation for `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(e) => Self::Bytes {
                hex: hex::encode(e.into_bytes()),
            },
        }
    }

    /// Raw bytes.
    ///
    /// # Errors
    ///
    /// Fails for malformed hex.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Text(text) => Ok(text.as_bytes().to_vec()),
            Self::Bytes { hex } => hex::decode(hex).context("invalid hex value"),
        }
    }
}

/// Serializable copy of the world state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Entities in key order.
    #[serde(default)]
    pub entries: BTreeMap<String, StoredValue>,
}

impl WorldSnapshot {
    /// Capture `world`.
    #[must_use]
    pub fn capture(world: &InMemoryLedger) -> Self {
        Self {
            entries: world
                .snapshot()
                .into_iter()
                .map(|(key, bytes)| (key, StoredValue::from_bytes(bytes)))
                .collect(),
        }
    }

    /// Rebuild a world state.
    ///
    /// # Errors
    ///
    /// Fails for an empty key or malformed hex.
    pub fn restore(&self) -> Result<InMemoryLedger> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            el_contract::adapters::validate_key(key)?;
            let bytes = value
                .to_bytes()
                .with_context(|| format!("entity {key:?}"))?;
            entries.push((key.clone(), bytes));
        }
        Ok(InMemoryLedger::from_entries(entries))
    }
}

/// Load the world state from `path`. A missing file is an empty world.
///
/// # Errors
///
/// Fails on I/O errors or malformed content.
pub fn load(path: &Path) -> Result<InMemoryLedger> {
    if !path.exists() {
        debug!(path = %path.display(), "No state file, starting empty");
        return Ok(InMemoryLedger::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    let snapshot: WorldSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file {}", path.display()))?;
    let world = snapshot.restore()?;
    info!(path = %path.display(), entities = world.len(), "World state loaded");
    Ok(world)
}

/// Save `world` to `path`, replacing it atomically.
///
/// # Errors
///
/// Fails on I/O or serialization errors.
pub fn save(path: &Path, world: &InMemoryLedger) -> Result<()> {
    let snapshot = WorldSnapshot::capture(world);
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode world state")?;

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("Failed to write state file {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace state file {}", path.display()))?;

    info!(path = %path.display(), entities = world.len(), "World state saved");
    Ok(())
}
