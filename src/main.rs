// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use app_health_monitor::{
    config::{self, default_endpoints, parse_endpoints, CheckerConfig},
    fetch::{ReqwestFetcher, TlsMode},
    health::EndpointChecker,
    logging::{self, LogHandle, CHECKER_LOG},
    output::{render, ReportStore},
    retry::RetryStrategy,
};

/// Checks HTTP endpoints and exits 0 only when every one of them is UP.
#[derive(Parser, Debug)]
#[command(name = "app-health-checker", version)]
struct Cli {
    /// JSON array of endpoints, e.g. '[{"url":"http://localhost:8080","expected_status":200}]'
    endpoints: Option<String>,

    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip TLS certificate verification (self-signed dev endpoints only)
    #[arg(long)]
    insecure: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config: CheckerConfig = match config::load_or_default(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log = match logging::init(&config.logging, &CHECKER_LOG) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match AssertUnwindSafe(run(cli, config, &log)).catch_unwind().await {
        Ok(Ok(true)) => ExitCode::SUCCESS,
        Ok(Ok(false)) => ExitCode::FAILURE,
        Ok(Err(e)) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
        Err(_) => {
            error!("Health check aborted by an unexpected panic");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: CheckerConfig, log: &LogHandle) -> Result<bool> {
    // Parse before touching the network so bad input never produces a report.
    let endpoints = match cli.endpoints.as_deref() {
        Some(raw) => parse_endpoints(raw)?,
        None => config.endpoints.clone().unwrap_or_else(default_endpoints),
    };

    let tls = if cli.insecure || config.accept_invalid_certs {
        TlsMode::AcceptInvalidCerts
    } else {
        TlsMode::Verify
    };
    let fetcher = ReqwestFetcher::new(tls)?;
    let checker = EndpointChecker::new(
        fetcher,
        RetryStrategy::new(config.retry.clone()),
        config.timeout(),
    );

    let run_id = Uuid::new_v4();
    let report = checker
        .check_all(&endpoints)
        .instrument(info_span!("check_cycle", %run_id))
        .await;
    let healthy = render(&report);

    let store = match &config.results_file {
        Some(path) => ReportStore::new(path),
        None => ReportStore::in_directory(&log.directory),
    };
    store.save(&report).context("Failed to save results")?;
    info!("Results saved to {}", store.path().display());

    Ok(healthy)
}
