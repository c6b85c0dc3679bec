// src/system/source.rs
use super::{MetricSource, ProcessStat, UsageStat};
use crate::error::MetricsError;
use std::path::Path;
use std::time::Duration;
use sysinfo::{Disks, Process, System, MINIMUM_CPU_UPDATE_INTERVAL};

/// [`MetricSource`] backed by `sysinfo`.
pub struct SysinfoSource {
    system: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_processes();

        Self { system }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysinfoSource {
    fn cpu_percent(&mut self, window: Duration) -> Result<f32, MetricsError> {
        // Usage is a delta between two refreshes. Processes are refreshed
        // over the same window so their CPU share is measured too.
        self.system.refresh_cpu();
        self.system.refresh_processes();
        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.system.refresh_cpu();
        self.system.refresh_processes();

        Ok(self.system.global_cpu_info().cpu_usage())
    }

    fn memory(&mut self) -> Result<UsageStat, MetricsError> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(MetricsError::NoMemoryInfo);
        }

        Ok(UsageStat::from_bytes(self.system.used_memory(), total))
    }

    fn disk(&mut self, mount: &Path) -> Result<UsageStat, MetricsError> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| MetricsError::DiskNotFound(mount.to_path_buf()))?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Ok(UsageStat::from_bytes(used, total))
    }

    fn process_count(&mut self) -> Result<usize, MetricsError> {
        Ok(self.system.processes().values().filter(|p| is_process(p)).count())
    }

    fn processes(&mut self) -> Result<Vec<ProcessStat>, MetricsError> {
        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(MetricsError::Processes("total memory unknown".to_string()));
        }

        Ok(self
            .system
            .processes()
            .iter()
            .filter(|(_, process)| is_process(process))
            .map(|(pid, process)| ProcessStat {
                pid: pid.as_u32(),
                name: process.name().to_string(),
                cpu_percent: process.cpu_usage(),
                memory_percent: (process.memory() as f64 / total_memory as f64 * 100.0) as f32,
            })
            .collect())
    }
}

/// On Linux the process table also lists every thread as its own task.
fn is_process(process: &Process) -> bool {
    process.thread_kind().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_memory_usage() {
        let mut source = SysinfoSource::new();
        let memory = source.memory().unwrap();
        assert!((0.0..=100.0).contains(&memory.percent));
        assert!(memory.used_bytes <= memory.total_bytes);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_threads_are_not_counted_as_processes() {
        use std::sync::mpsc;

        let own_pid = std::process::id();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let stop_rx = std::sync::Arc::new(std::sync::Mutex::new(stop_rx));
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let stop_rx = stop_rx.clone();
                std::thread::spawn(move || {
                    let _ = stop_rx.lock().map(|rx| rx.recv());
                })
            })
            .collect();

        let task_ids: Vec<u32> = std::fs::read_dir("/proc/self/task")
            .unwrap()
            .filter_map(|entry| entry.ok()?.file_name().to_str()?.parse().ok())
            .filter(|tid| *tid != own_pid)
            .collect();
        assert!(!task_ids.is_empty());

        let mut source = SysinfoSource::new();
        let processes = source.processes().unwrap();
        let count = source.process_count().unwrap();

        drop(stop_tx);
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(count, processes.len());
        assert!(processes.iter().any(|p| p.pid == own_pid));
        assert!(processes.iter().all(|p| !task_ids.contains(&p.pid)));
    }

    #[test]
    fn test_unknown_mount_point() {
        let mut source = SysinfoSource::new();
        let err = source
            .disk(Path::new("/definitely/not/a/mount/point"))
            .unwrap_err();
        assert!(matches!(err, MetricsError::DiskNotFound(_)));
    }
}
