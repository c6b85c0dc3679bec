// src/logging.rs
use crate::config::{LogDestination, LoggingConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where a tool keeps its log file when the config does not say otherwise.
#[derive(Debug, Clone, Copy)]
pub struct LogTarget {
    /// Directory name under the user's home directory.
    pub app_dir: &'static str,
    pub file_name: &'static str,
}

pub const CHECKER_LOG: LogTarget = LogTarget {
    app_dir: ".app_health_checker",
    file_name: "app_health.log",
};

pub const MONITOR_LOG: LogTarget = LogTarget {
    app_dir: ".system_monitor",
    file_name: "system_health.log",
};

/// Keeps the file writer alive; dropping it flushes pending lines.
pub struct LogHandle {
    pub directory: PathBuf,
    _guard: Option<WorkerGuard>,
}

pub fn log_directory(config: &LoggingConfig, target: &LogTarget) -> Result<PathBuf> {
    match &config.directory {
        Some(dir) => Ok(dir.clone()),
        None => dirs::home_dir()
            .map(|home| home.join(target.app_dir))
            .context("Could not determine the home directory"),
    }
}

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init(config: &LoggingConfig, target: &LogTarget) -> Result<LogHandle> {
    let directory = log_directory(config, target)?;
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level '{}'", config.level))?,
    };

    let console = config
        .writes_to(LogDestination::Console)
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stdout));

    let (file, guard) = if config.writes_to(LogDestination::File) {
        let appender = tracing_appender::rolling::never(&directory, target.file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogHandle {
        directory,
        _guard: guard,
    })
}
