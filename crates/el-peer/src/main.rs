//! # Entity Ledger Peer
//!
//! Command-line host for the entity ledger chaincode.
//!
//! ```text
//! el-peer [--state <file>] init <args...>
//! el-peer [--state <file>] invoke <function> <args...>
//! el-peer [--state <file>] run <script.jsonl>
//! ```
//!
//! Responses are written to stdout as JSON lines; logs go to stderr. The
//! state file is rewritten only if an invocation committed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use el_contract::adapters::InMemoryLedger;
use el_contract::domain::entities::OperationRequest;
use el_contract::service::{ContractConfig, EntityContract};
use el_peer::{load_script, state_file, write_responses, Peer};
use el_telemetry::TelemetryConfig;

#[derive(Parser, Debug)]
#[command(name = "el-peer", version)]
#[command(about = "Run entity ledger chaincode invocations against a local world state")]
struct Cli {
    /// World state file (JSON); created on first commit
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the run
    #[arg(long, global = true)]
    metrics: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Instantiate the chaincode: key/value pairs for the init schema
    Init {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Invoke a chaincode function
    Invoke {
        /// Function name (init, invoke, transferBalance, delete, query)
        function: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a JSON-lines script of requests, one transaction per line
    Run {
        /// Script path
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.json_logs {
        telemetry = telemetry.with_json_logs(true);
    }
    el_telemetry::init_telemetry(&telemetry)?;

    let contract = EntityContract::new(ContractConfig::from_env()?)?;
    let world = match &cli.state {
        Some(path) => state_file::load(path)?,
        None => InMemoryLedger::new(),
    };
    let peer = Peer::new(contract, world);
    info!(
        version = el_contract::VERSION,
        contract = el_contract::CONTRACT_NAME,
        entities = peer.world().len(),
        "Peer ready"
    );

    let responses = match cli.command {
        Command::Init { args } => vec![peer.init(args).await],
        Command::Invoke { function, args } => {
            vec![peer.invoke(OperationRequest::new(function, args)).await]
        }
        Command::Run { script } => peer.run_batch(load_script(&script)?).await,
    };

    let mut stdout = std::io::stdout().lock();
    write_responses(&mut stdout, &responses)?;

    let stats = peer.stats();
    if stats.commits > 0 {
        if let Some(path) = &cli.state {
            state_file::save(path, peer.world())?;
        }
    }
    info!(
        invocations = stats.invocations,
        failures = stats.failures,
        commits = stats.commits,
        "Run complete"
    );

    if cli.metrics {
        let text = el_telemetry::encode_metrics().context("Failed to encode metrics")?;
        eprint!("{text}");
    }

    Ok(if stats.failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
