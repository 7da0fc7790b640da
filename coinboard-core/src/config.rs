//! Fetch-layer configuration.
//!
//! Every field has a default, so a TOML file only needs to override what it
//! changes. The library reads no environment variables; callers decide where
//! configuration comes from.

use crate::data::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration for the fetch layer: endpoint, client, retry, cache TTLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the upstream API.
    pub api_base: String,
    /// Per-request timeout, seconds. Bounds how long any single call blocks.
    pub request_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    pub retry: RetryConfig,
    pub cache: CacheConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.coingecko.com/api/v3".to_string(),
            request_timeout_secs: 10,
            user_agent: concat!("coinboard/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl FetchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Retry knobs for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub rate_limit_backoff_secs: u64,
    pub transient_backoff_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff_secs: 20,
            transient_backoff_secs: 5,
        }
    }
}

impl RetryConfig {
    /// Materialize the policy the retry loop consumes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            rate_limit_backoff: Duration::from_secs(self.rate_limit_backoff_secs),
            transient_backoff: Duration::from_secs(self.transient_backoff_secs),
        }
    }
}

/// TTLs for the fetch cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub snapshot_ttl_secs: u64,
    pub history_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: 30 * 60,
            history_ttl_secs: 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn snapshot_ttl(&self) -> Duration {
        Duration::from_secs(self.snapshot_ttl_secs)
    }

    pub fn history_ttl(&self) -> Duration {
        Duration::from_secs(self.history_ttl_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
