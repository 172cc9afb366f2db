//! JSON-lines invocation scripts.
//!
//! One `InvokeRequestPayload` per line. Blank lines and lines starting with
//! `#` are skipped.

use anyhow::{Context, Result};
use el_contract::domain::entities::OperationRequest;
use el_contract::events::InvokeRequestPayload;
use std::path::Path;

/// Parse script text into requests, in order.
///
/// # Errors
///
/// Names the 1-based line of the first malformed request.
pub fn parse_script(text: &str) -> Result<Vec<OperationRequest>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<InvokeRequestPayload>(line)
                .map(OperationRequest::from)
                .with_context(|| format!("Invalid request on line {}", index + 1))
        })
        .collect()
}

/// Read and parse the script at `path`.
///
/// # Errors
///
/// Fails on I/O errors or a malformed line.
pub fn load_script(path: &Path) -> Result<Vec<OperationRequest>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text)
}
