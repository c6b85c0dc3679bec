// src/system/mod.rs
mod sampler;
mod source;

pub use sampler::{render_system, MetricCheck, MetricKind, SystemReport, SystemSampler};
pub use source::SysinfoSource;

use crate::error::MetricsError;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageStat {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub percent: f32,
}

impl UsageStat {
    pub fn from_bytes(used_bytes: u64, total_bytes: u64) -> Self {
        let percent = if total_bytes == 0 {
            0.0
        } else {
            (used_bytes as f64 / total_bytes as f64 * 100.0) as f32
        };
        Self {
            used_bytes,
            total_bytes,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStat {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// Operating-system metrics consumed by [`SystemSampler`].
pub trait MetricSource {
    /// Average CPU usage across all cores measured over `window`.
    fn cpu_percent(&mut self, window: Duration) -> Result<f32, MetricsError>;

    fn memory(&mut self) -> Result<UsageStat, MetricsError>;

    fn disk(&mut self, mount: &Path) -> Result<UsageStat, MetricsError>;

    fn process_count(&mut self) -> Result<usize, MetricsError>;

    fn processes(&mut self) -> Result<Vec<ProcessStat>, MetricsError>;
}
