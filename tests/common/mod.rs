// tests/common/mod.rs
#![allow(dead_code)]

use app_health_monitor::config::RetryConfig;
use app_health_monitor::error::FetchError;
use app_health_monitor::fetch::{FetchResponse, Fetcher};
use app_health_monitor::health::EndpointChecker;
use app_health_monitor::retry::{RecordingSleeper, RetryStrategy};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Answers every request for a URL with the same fixed reply.
#[derive(Default)]
pub struct FixedFetcher {
    replies: HashMap<String, Result<u16, FetchError>>,
}

impl FixedFetcher {
    pub fn reply(mut self, url: &str, reply: Result<u16, FetchError>) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }
}

#[async_trait]
impl Fetcher for FixedFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchResponse, FetchError> {
        self.replies
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::ConnectionRefused))
            .map(|status| FetchResponse {
                status,
                body: String::new(),
            })
    }
}

pub fn checker(fetcher: FixedFetcher) -> EndpointChecker<FixedFetcher, RecordingSleeper> {
    let retry = RetryStrategy::with_sleeper(RetryConfig::default(), RecordingSleeper::default());
    EndpointChecker::new(fetcher, retry, Duration::from_secs(5))
}
