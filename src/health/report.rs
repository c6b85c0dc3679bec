// src/health/report.rs
use super::HealthStatus;
use crate::error::CheckFailure;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const UP_MESSAGE: &str = "Application is UP";

/// Final verdict for one endpoint after its whole retry sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub healthy: bool,
    /// 0 when no response was obtained.
    pub http_status: u16,
    pub message: String,
}

impl CheckOutcome {
    pub fn up(http_status: u16) -> Self {
        Self {
            healthy: true,
            http_status,
            message: UP_MESSAGE.to_string(),
        }
    }

    pub fn down(failure: &CheckFailure) -> Self {
        Self {
            healthy: false,
            http_status: failure.http_status(),
            message: failure.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    pub url: String,
    pub status: HealthStatus,
    pub http_status: u16,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl EndpointResult {
    pub fn new(url: impl Into<String>, outcome: CheckOutcome, timestamp: DateTime<Local>) -> Self {
        Self {
            url: url.into(),
            status: HealthStatus::from_healthy(outcome.healthy),
            http_status: outcome.http_status,
            message: outcome.message,
            timestamp,
        }
    }
}

/// Results of one check cycle, in input order.
///
/// Only [`HealthReport::record`] mutates the counters so that
/// `healthy_count + unhealthy_count == endpoints.len()` always holds and
/// `overall_status` is `Down` exactly when something was unhealthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub timestamp: DateTime<Local>,
    endpoints: Vec<EndpointResult>,
    overall_status: HealthStatus,
    healthy_count: usize,
    unhealthy_count: usize,
}

impl HealthReport {
    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            endpoints: Vec::new(),
            overall_status: HealthStatus::Up,
            healthy_count: 0,
            unhealthy_count: 0,
        }
    }

    pub fn record(&mut self, result: EndpointResult) {
        match result.status {
            HealthStatus::Up => self.healthy_count += 1,
            HealthStatus::Down => {
                self.unhealthy_count += 1;
                self.overall_status = HealthStatus::Down;
            }
        }
        self.endpoints.push(result);
    }

    pub fn endpoints(&self) -> &[EndpointResult] {
        &self.endpoints
    }

    pub fn overall_status(&self) -> HealthStatus {
        self.overall_status
    }

    pub fn healthy_count(&self) -> usize {
        self.healthy_count
    }

    pub fn unhealthy_count(&self) -> usize {
        self.unhealthy_count
    }

    pub fn is_healthy(&self) -> bool {
        self.overall_status.is_up()
    }

    pub fn failing(&self) -> impl Iterator<Item = &EndpointResult> {
        self.endpoints
            .iter()
            .filter(|e| e.status == HealthStatus::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, healthy: bool) -> EndpointResult {
        let outcome = if healthy {
            CheckOutcome::up(200)
        } else {
            CheckOutcome::down(&CheckFailure::Timeout)
        };
        EndpointResult::new(url, outcome, Local::now())
    }

    #[test]
    fn empty_report_is_up() {
        let report = HealthReport::new(Local::now());
        assert!(report.is_healthy());
        assert_eq!(report.healthy_count() + report.unhealthy_count(), 0);
    }

    #[test]
    fn down_is_one_way() {
        let mut report = HealthReport::new(Local::now());
        report.record(result("http://a", true));
        assert_eq!(report.overall_status(), HealthStatus::Up);

        report.record(result("http://b", false));
        report.record(result("http://c", true));
        report.record(result("http://d", true));

        assert_eq!(report.overall_status(), HealthStatus::Down);
        assert_eq!(report.healthy_count(), 3);
        assert_eq!(report.unhealthy_count(), 1);
        let failing: Vec<_> = report.failing().map(|e| e.url.as_str()).collect();
        assert_eq!(failing, vec!["http://b"]);
    }

    #[test]
    fn down_outcome_carries_failure_details() {
        let outcome = CheckOutcome::down(&CheckFailure::UnexpectedStatus(500));
        assert!(!outcome.healthy);
        assert_eq!(outcome.http_status, 500);
        assert_eq!(outcome.message, "Unexpected status code: 500");
    }

    #[test]
    fn serializes_with_report_field_names() {
        let mut report = HealthReport::new(Local::now());
        report.record(result("http://a", true));
        report.record(result("http://b", false));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["overall_status"], "DOWN");
        assert_eq!(value["healthy_count"], 1);
        assert_eq!(value["unhealthy_count"], 1);
        assert_eq!(value["endpoints"][0]["status"], "UP");
        assert_eq!(value["endpoints"][0]["message"], UP_MESSAGE);
        assert_eq!(value["endpoints"][1]["http_status"], 0);
        assert_eq!(value["endpoints"][1]["message"], "Connection timeout");
        assert!(value["timestamp"].is_string());
    }
}
