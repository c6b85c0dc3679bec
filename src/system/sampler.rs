// src/system/sampler.rs
use super::{MetricSource, ProcessStat, UsageStat};
use crate::config::MonitorConfig;
use crate::error::MetricsError;
use chrono::Local;
use std::fmt;
use tracing::{info, warn};

const RULE: &str = "============================================================";
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Processes,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "memory",
            MetricKind::Disk => "disk",
            MetricKind::Processes => "processes",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCheck {
    pub metric: MetricKind,
    pub value: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl MetricCheck {
    fn new(metric: MetricKind, value: f64, threshold: f64) -> Self {
        Self {
            metric,
            value,
            threshold,
            passed: value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemReport {
    pub checks: Vec<MetricCheck>,
    pub top_cpu: Vec<ProcessStat>,
    pub top_memory: Vec<ProcessStat>,
}

impl SystemReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.checks.iter().filter(|c| !c.passed).map(|c| c.metric)
    }
}

/// Samples each metric once and compares it with its threshold.
pub struct SystemSampler<M> {
    source: M,
    config: MonitorConfig,
}

impl<M: MetricSource> SystemSampler<M> {
    pub fn new(source: M, config: MonitorConfig) -> Self {
        Self { source, config }
    }

    pub fn sample(&mut self) -> Result<SystemReport, MetricsError> {
        info!("{}", RULE);
        info!(
            "System Health Report - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        info!("{}", RULE);

        let checks = vec![
            self.check_cpu()?,
            self.check_memory()?,
            self.check_disk()?,
            self.check_processes()?,
        ];

        let (top_cpu, top_memory) = self.top_processes();

        Ok(SystemReport {
            checks,
            top_cpu,
            top_memory,
        })
    }

    fn check_cpu(&mut self) -> Result<MetricCheck, MetricsError> {
        let cpu = self.source.cpu_percent(self.config.cpu_window())?;
        let threshold = self.config.thresholds.cpu_percent;
        info!("CPU Usage: {:.1}%", cpu);

        let check = MetricCheck::new(MetricKind::Cpu, cpu as f64, threshold as f64);
        if !check.passed {
            warn!("ALERT: CPU usage is {:.1}% (threshold: {}%)", cpu, threshold);
        }
        Ok(check)
    }

    fn check_memory(&mut self) -> Result<MetricCheck, MetricsError> {
        let memory = self.source.memory()?;
        let threshold = self.config.thresholds.memory_percent;
        info!("Memory Usage: {}", describe_usage(&memory));

        let check = MetricCheck::new(MetricKind::Memory, memory.percent as f64, threshold as f64);
        if !check.passed {
            warn!(
                "ALERT: Memory usage is {:.1}% (threshold: {}%)",
                memory.percent, threshold
            );
        }
        Ok(check)
    }

    fn check_disk(&mut self) -> Result<MetricCheck, MetricsError> {
        let disk = self.source.disk(&self.config.disk_mount)?;
        let threshold = self.config.thresholds.disk_percent;
        info!("Disk Usage: {}", describe_usage(&disk));

        let check = MetricCheck::new(MetricKind::Disk, disk.percent as f64, threshold as f64);
        if !check.passed {
            warn!(
                "ALERT: Disk usage is {:.1}% (threshold: {}%)",
                disk.percent, threshold
            );
        }
        Ok(check)
    }

    fn check_processes(&mut self) -> Result<MetricCheck, MetricsError> {
        let count = self.source.process_count()?;
        let threshold = self.config.thresholds.process_count;
        info!("Running Processes: {}", count);

        let check = MetricCheck::new(MetricKind::Processes, count as f64, threshold as f64);
        if !check.passed {
            warn!(
                "ALERT: Number of processes is {} (threshold: {})",
                count, threshold
            );
        }
        Ok(check)
    }

    /// Ranking is informational; a failure here never fails the run.
    fn top_processes(&mut self) -> (Vec<ProcessStat>, Vec<ProcessStat>) {
        let n = self.config.top_processes;
        let processes = match self.source.processes() {
            Ok(processes) => processes,
            Err(e) => {
                warn!("Could not retrieve process info: {}", e);
                return (Vec::new(), Vec::new());
            }
        };

        let top_cpu = top_by(&processes, n, |p| p.cpu_percent);
        info!("--- Top {} Processes by CPU Usage ---", n);
        for p in &top_cpu {
            info!("  {}: {:.1}%", p.name, p.cpu_percent);
        }

        let top_memory = top_by(&processes, n, |p| p.memory_percent);
        info!("--- Top {} Processes by Memory Usage ---", n);
        for p in &top_memory {
            info!("  {}: {:.1}%", p.name, p.memory_percent);
        }

        (top_cpu, top_memory)
    }
}

fn describe_usage(usage: &UsageStat) -> String {
    format!(
        "{:.1}% ({:.2}GB / {:.2}GB)",
        usage.percent,
        usage.used_bytes as f64 / GIB,
        usage.total_bytes as f64 / GIB
    )
}

fn top_by(processes: &[ProcessStat], n: usize, key: impl Fn(&ProcessStat) -> f32) -> Vec<ProcessStat> {
    let mut ranked: Vec<ProcessStat> = processes
        .iter()
        .filter(|p| !key(p).is_nan())
        .cloned()
        .collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.truncate(n);
    ranked
}

/// Logs the verdict and returns whether every metric was within bounds.
pub fn render_system(report: &SystemReport) -> bool {
    info!("{}", RULE);

    let healthy = report.all_passed();
    if healthy {
        info!("✅ All systems healthy!");
    } else {
        let failed: Vec<String> = report.failed().map(|m| m.to_string()).collect();
        warn!("❌ Issues detected in: {}", failed.join(", "));
    }

    info!("{}", RULE);
    healthy
}
