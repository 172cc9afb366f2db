//! Prometheus metrics for chaincode invocations.
//!
//! All metrics follow the naming convention: `el_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: invocations by operation and outcome, errors by kind,
//!   committed write sets
//! - **Histogram**: invocation duration

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::{Duration, Instant};

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Invocations by operation and outcome
    pub static ref INVOCATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("el_chaincode_invocations_total", "Chaincode invocations"),
        &["operation", "outcome"]  // outcome: success/failure
    ).expect("metric creation failed");

    /// Failed invocations by error kind
    pub static ref ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("el_chaincode_errors_total", "Failed invocations by error kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// Write sets committed to the world state
    pub static ref COMMITS: IntCounter = IntCounter::new(
        "el_ledger_commits_total",
        "Write sets committed to the world state"
    ).expect("metric creation failed");

    /// Invocation duration histogram
    pub static ref INVOCATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "el_chaincode_invocation_duration_seconds",
            "Time spent in one invocation, commit included"
        ).buckets(vec![
            0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
        ])
    ).expect("metric creation failed");
}

/// Invocation outcome label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Response status 200.
    Success,
    /// Response status 500.
    Failure,
}

impl Outcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Register all metrics with the registry. Safe to call more than once.
///
/// # Errors
///
/// `MetricsInit` if a collector is rejected for a reason other than being
/// registered already.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(INVOCATIONS.clone()),
        Box::new(ERRORS.clone()),
        Box::new(COMMITS.clone()),
        Box::new(INVOCATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Record one finished invocation.
pub fn record_invocation(operation: &str, outcome: Outcome, elapsed: Duration) {
    INVOCATIONS
        .with_label_values(&[operation, outcome.as_str()])
        .inc();
    INVOCATION_DURATION.observe(elapsed.as_secs_f64());
}

/// Record a failed invocation's error kind.
pub fn record_error(kind: &str) {
    ERRORS.with_label_values(&[kind]).inc();
}

/// Record a committed write set.
pub fn record_commit() {
    COMMITS.inc();
}

/// Encode all metrics as Prometheus text format.
///
/// # Errors
///
/// `MetricsInit` if encoding fails.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Elapsed-time helper for invocation timing.
#[derive(Debug)]
pub struct InvocationTimer {
    start: Instant,
}

impl InvocationTimer {
    /// Start timing.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
