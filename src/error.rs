// src/error.rs
use std::path::PathBuf;

/// Transport-level failure reported by a [`crate::fetch::Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection refused or host unreachable")]
    ConnectionRefused,

    #[error("{0}")]
    Other(String),
}

/// Why a single attempt against an endpoint did not succeed.
///
/// The `Display` output is the message stored in the report when the
/// attempt budget runs out on this failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckFailure {
    #[error("Connection timeout")]
    Timeout,

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Error: {0}")]
    Other(String),
}

impl CheckFailure {
    /// HTTP status observed on the failing attempt, 0 when no response came back.
    pub fn http_status(&self) -> u16 {
        match self {
            CheckFailure::UnexpectedStatus(status) => *status,
            _ => 0,
        }
    }
}

impl From<FetchError> for CheckFailure {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => CheckFailure::Timeout,
            FetchError::ConnectionRefused => CheckFailure::ConnectionRefused,
            FetchError::Other(description) => CheckFailure::Other(description),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid JSON format for endpoints: {0}")]
    MalformedEndpoints(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize health report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("total memory reported as zero")]
    NoMemoryInfo,

    #[error("no disk mounted at {0}")]
    DiskNotFound(PathBuf),

    #[error("process table unavailable: {0}")]
    Processes(String),

    #[error("metric sampling task failed: {0}")]
    Task(String),
}
