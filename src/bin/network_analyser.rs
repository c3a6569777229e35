//! Network Analyser Binary
//!
//! Runs one analysis request against a network read from disk and prints
//! the response as JSON on stdout. Logs go to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `NETWORK_PATH`: JSON array of connection records (required)
//! - `REQUEST_PATH`: JSON analysis request (required)
//! - `BLOCKED_PATH`: JSON blocked-vertex file; in-memory store if unset
//! - `CONFIG_PATH`: JSON analyser config; defaults if unset
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! NETWORK_PATH=network.json REQUEST_PATH=request.json cargo run --bin network_analyser
//! ```

use std::time::Instant;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use network_analysis_kernel::{
    AnalyserConfig, Analyser, AnalysisRequest, BlockedVertexStore, ConnectionRecord,
    InMemoryBlockedStore, JsonFileBlockedStore,
};

type BoxError = Box<dyn std::error::Error>;

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "network_analyser=info,network_analysis_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn required_env(name: &str) -> Result<String, BoxError> {
    std::env::var(name).map_err(|_| format!("{name} must be set").into())
}

fn run<S: BlockedVertexStore>(
    store: S,
    config: AnalyserConfig,
    records: Vec<ConnectionRecord>,
    request: &AnalysisRequest,
) -> Result<String, BoxError> {
    let mut analyser = Analyser::new(store, config);
    info!(
        params_hash = %analyser.config().params_hash(),
        max_k = analyser.config().max_k,
        "Config loaded"
    );

    let report = analyser.prepare_graph(records)?;
    if !report.is_clean() {
        info!(
            failures = report.failures.len(),
            report = %serde_json::to_string(&report)?,
            "Some connection records were rejected"
        );
    }

    let started = Instant::now();
    let response = request.execute(&mut analyser)?;
    info!(latency_ms = started.elapsed().as_millis() as u64, "Request completed");

    Ok(serde_json::to_string_pretty(&response)?)
}

fn main() -> Result<(), BoxError> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting network analyser");

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => AnalyserConfig::from_file(&path)?,
        Err(_) => AnalyserConfig::default(),
    };

    let network_path = required_env("NETWORK_PATH")?;
    let records: Vec<ConnectionRecord> =
        serde_json::from_str(&std::fs::read_to_string(&network_path)?)?;
    info!(path = %network_path, records = records.len(), "Network loaded");

    let request: AnalysisRequest =
        serde_json::from_str(&std::fs::read_to_string(required_env("REQUEST_PATH")?)?)?;

    let output = match std::env::var("BLOCKED_PATH") {
        Ok(path) => run(JsonFileBlockedStore::open(path)?, config, records, &request)?,
        Err(_) => run(InMemoryBlockedStore::new(), config, records, &request)?,
    };

    println!("{output}");
    Ok(())
}
