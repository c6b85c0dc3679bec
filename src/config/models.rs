// src/config/models.rs
use super::Validate;
use crate::error::InputError;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

fn default_expected_status() -> u16 {
    DEFAULT_EXPECTED_STATUS
}

/// One monitored endpoint as supplied by the caller.
///
/// `url` stays optional so that entries without one can be skipped
/// during the check cycle instead of rejecting the whole input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

impl EndpointSpec {
    pub fn new(url: impl Into<String>, expected_status: u16) -> Self {
        Self {
            url: Some(url.into()),
            expected_status,
        }
    }

    /// The URL to check, or `None` when absent or empty.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Parses the JSON array given on the command line.
pub fn parse_endpoints(raw: &str) -> Result<Vec<EndpointSpec>, InputError> {
    Ok(serde_json::from_str(raw)?)
}

/// Endpoints checked when neither the command line nor the config names any.
pub fn default_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("http://localhost:8080", 200),
        EndpointSpec::new("http://localhost:4499", 200),
        EndpointSpec::new("https://www.google.com", 200),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    File,
    Console,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub destinations: Vec<LogDestination>,
    /// Overrides the per-tool directory under the home directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            destinations: vec![LogDestination::File, LogDestination::Console],
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn writes_to(&self, destination: LogDestination) -> bool {
        self.destinations.contains(&destination)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub timeout_secs: u64,
    pub retry: RetryConfig,
    /// Skip TLS certificate verification. Only meant for internal or
    /// development endpoints with self-signed certificates.
    pub accept_invalid_certs: bool,
    pub endpoints: Option<Vec<EndpointSpec>>,
    pub results_file: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            retry: RetryConfig::default(),
            accept_invalid_certs: false,
            endpoints: None,
            results_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl CheckerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for CheckerConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.retry.max_attempts == 0 {
            bail!("retry.max_attempts must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub disk_percent: f32,
    pub process_count: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_percent: 80.0,
            memory_percent: 80.0,
            disk_percent: 80.0,
            process_count: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub thresholds: Thresholds,
    pub disk_mount: PathBuf,
    pub cpu_sample_ms: u64,
    pub top_processes: usize,
    pub logging: LoggingConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            disk_mount: PathBuf::from("/"),
            cpu_sample_ms: 1000,
            top_processes: 5,
            logging: LoggingConfig::default(),
        }
    }
}

impl MonitorConfig {
    pub fn cpu_window(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if t.cpu_percent <= 0.0 || t.memory_percent <= 0.0 || t.disk_percent <= 0.0 {
            bail!("percentage thresholds must be positive");
        }
        if t.process_count == 0 {
            bail!("thresholds.process_count must be positive");
        }
        if self.cpu_sample_ms == 0 {
            bail!("cpu_sample_ms must be greater than zero");
        }
        Ok(())
    }
}
