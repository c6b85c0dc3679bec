// src/health/checker.rs
use super::report::{CheckOutcome, EndpointResult, HealthReport};
use crate::config::EndpointSpec;
use crate::error::{CheckFailure, FetchError};
use crate::fetch::Fetcher;
use crate::retry::{RetryStrategy, Sleeper, TokioSleeper};
use chrono::Local;
use std::time::Duration;
use tracing::{error, info, warn};

pub const BANNER_RULE: &str =
    "======================================================================";

/// Checks endpoints one after another, each with its own retry budget.
pub struct EndpointChecker<F, S = TokioSleeper> {
    fetcher: F,
    retry: RetryStrategy<S>,
    timeout: Duration,
}

impl<F: Fetcher, S: Sleeper> EndpointChecker<F, S> {
    pub fn new(fetcher: F, retry: RetryStrategy<S>, timeout: Duration) -> Self {
        Self {
            fetcher,
            retry,
            timeout,
        }
    }

    pub fn retry(&self) -> &RetryStrategy<S> {
        &self.retry
    }

    /// Runs the retry sequence for one endpoint.
    ///
    /// Transport errors and unexpected statuses are retried until the
    /// budget is spent; they always end up in the returned outcome.
    pub async fn check_endpoint(&self, url: &str, expected_status: u16) -> CheckOutcome {
        let max_attempts = self.retry.max_attempts();
        let fetcher = &self.fetcher;
        let timeout = self.timeout;

        let result = self
            .retry
            .execute(|attempt| async move {
                info!("Checking {} (attempt {}/{})", url, attempt, max_attempts);

                match fetcher.fetch(url, timeout).await {
                    Ok(response) if response.status == expected_status => Ok(response.status),
                    Ok(response) => {
                        warn!(
                            url,
                            expected_status,
                            "{} returned unexpected status: {}",
                            url,
                            response.status
                        );
                        Err(CheckFailure::UnexpectedStatus(response.status))
                    }
                    Err(err) => {
                        match &err {
                            FetchError::Timeout => warn!("Timeout connecting to {}", url),
                            FetchError::ConnectionRefused => {
                                warn!("Connection error to {}", url)
                            }
                            FetchError::Other(description) => {
                                error!("Error checking {}: {}", url, description)
                            }
                        }
                        Err(CheckFailure::from(err))
                    }
                }
            })
            .await;

        match result {
            Ok(status) => {
                info!("{} is UP (Status: {})", url, status);
                CheckOutcome::up(status)
            }
            Err(failure) => {
                warn!(
                    "{} is DOWN after {} attempts: {}",
                    url, max_attempts, failure
                );
                CheckOutcome::down(&failure)
            }
        }
    }

    /// Checks every endpoint in order and folds the outcomes into a report.
    ///
    /// Entries without a URL are skipped and leave no trace in the report.
    pub async fn check_all(&self, endpoints: &[EndpointSpec]) -> HealthReport {
        let started = Local::now();
        info!("{}", BANNER_RULE);
        info!(
            "Application Health Check - {}",
            started.format("%Y-%m-%d %H:%M:%S")
        );
        info!("{}", BANNER_RULE);

        let mut report = HealthReport::new(started);

        for endpoint in endpoints {
            let Some(url) = endpoint.target() else {
                warn!("Skipping endpoint without URL");
                continue;
            };

            let outcome = self.check_endpoint(url, endpoint.expected_status).await;
            report.record(EndpointResult::new(url, outcome, Local::now()));
        }

        info!(
            "Health check complete: {} healthy, {} unhealthy",
            report.healthy_count(),
            report.unhealthy_count()
        );

        report
    }
}
