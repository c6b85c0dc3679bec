// src/fetch/client.rs
use super::{FetchResponse, Fetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Verify,
    /// Accepts any certificate. For self-signed internal or dev endpoints only.
    AcceptInvalidCerts,
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(tls: TlsMode) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if tls == TlsMode::AcceptInvalidCerts {
            warn!("TLS certificate verification is disabled; only use this against trusted endpoints");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_connect() {
        FetchError::ConnectionRefused
    } else {
        FetchError::Other(format!("{:#}", anyhow::Error::from(err)))
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        debug!(url, status, bytes = body.len(), "fetched");

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(503)
            .with_body("starting")
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new(TlsMode::Verify).unwrap();
        let url = format!("{}/health", server.url());
        let response = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.body, "starting");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn closed_port_is_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = ReqwestFetcher::new(TlsMode::Verify).unwrap();
        let err = fetcher
            .fetch(&format!("http://{addr}/"), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::ConnectionRefused);
    }

    #[tokio::test]
    async fn malformed_url_is_other_error() {
        let fetcher = ReqwestFetcher::new(TlsMode::Verify).unwrap();
        let err = fetcher
            .fetch("not a url", Duration::from_secs(1))
            .await
            .unwrap_err();

        match err {
            FetchError::Other(description) => {
                assert!(description.contains("relative URL without a base"), "{description}");
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }
}
