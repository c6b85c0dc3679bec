// src/bin/system-monitor.rs
use anyhow::Result;
use clap::Parser;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info_span};
use uuid::Uuid;

use app_health_monitor::{
    config::{self, MonitorConfig},
    error::MetricsError,
    logging::{self, MONITOR_LOG},
    system::{render_system, SysinfoSource, SystemSampler},
};

/// Samples CPU, memory, disk and process count against fixed thresholds.
#[derive(Parser, Debug)]
#[command(name = "system-monitor", version)]
struct Cli {
    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
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

    let config: MonitorConfig = match config::load_or_default(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log = match logging::init(&config.logging, &MONITOR_LOG) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match AssertUnwindSafe(run(config)).catch_unwind().await {
        Ok(Ok(true)) => ExitCode::SUCCESS,
        Ok(Ok(false)) => ExitCode::FAILURE,
        Ok(Err(e)) => {
            error!("Error during health check: {:#}", e);
            ExitCode::FAILURE
        }
        Err(_) => {
            error!("Error during health check: unexpected panic");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: MonitorConfig) -> Result<bool> {
    let span = info_span!("system_check", run_id = %Uuid::new_v4());

    // Sampling sleeps for the CPU window, keep it off the runtime thread.
    let report = tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        SystemSampler::new(SysinfoSource::new(), config).sample()
    })
    .await
    .map_err(|e| MetricsError::Task(e.to_string()))??;

    Ok(render_system(&report))
}
