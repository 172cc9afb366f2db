//! # Entity Ledger Telemetry
//!
//! Logging and metrics for hosts running the entity ledger chaincode. The
//! chaincode itself only emits `tracing` events; installing a subscriber and
//! counting invocations is the host's job.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use el_telemetry::{init_logging, register_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! register_metrics()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EL_SERVICE_NAME` | `entity-ledger` | Service name in logs |
//! | `EL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `EL_JSON_LOGS` | `false` | JSON log format |
//! | `EL_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, record_commit, record_error, record_invocation, register_metrics,
    InvocationTimer, Outcome,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Prometheus registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register metrics.
///
/// # Errors
///
/// Returns the first initialization failure.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}
