// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Configuration types that can be checked after loading.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned + Validate,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: T = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml")
    {
        serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

/// Loads `path` when given, otherwise falls back to the type's defaults.
pub async fn load_or_default<T, P>(path: Option<P>) -> Result<T>
where
    T: DeserializeOwned + Validate + Default,
    P: AsRef<Path>,
{
    match path {
        Some(path) => load_config(path).await,
        None => Ok(T::default()),
    }
}
