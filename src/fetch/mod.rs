// src/fetch/mod.rs
mod client;

pub use client::{ReqwestFetcher, TlsMode};

use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a single HTTP GET. Implementations classify transport failures
/// into [`FetchError`] and never retry on their own.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError>;
}
