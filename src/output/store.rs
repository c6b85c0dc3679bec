// src/output/store.rs
use crate::error::StoreError;
use crate::health::HealthReport;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE_NAME: &str = "latest_results.json";

/// The single on-disk copy of the latest report. Each save replaces it.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(RESULTS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pretty-prints the report into a sibling temp file and renames it
    /// over the previous results.
    pub fn save(&self, report: &HealthReport) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(report)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    #[cfg(test)]
    pub fn load(&self) -> Option<HealthReport> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{CheckOutcome, EndpointResult};
    use chrono::Local;

    #[test]
    fn save_overwrites_previous_results() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::in_directory(dir.path());

        let mut first = HealthReport::new(Local::now());
        first.record(EndpointResult::new("http://old", CheckOutcome::up(200), Local::now()));
        store.save(&first).unwrap();

        let second = HealthReport::new(Local::now());
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.endpoints().is_empty());
        assert!(!dir.path().join("latest_results.json.tmp").exists());
    }

    #[test]
    fn saved_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::in_directory(dir.path());
        store.save(&HealthReport::new(Local::now())).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("\n  \"overall_status\": \"UP\""));
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::in_directory(dir.path().join("missing"));

        let err = store.save(&HealthReport::new(Local::now())).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
