//! Provider trait, query types, and structured error types.
//!
//! The MarketDataProvider trait abstracts over the upstream API so callers
//! and tests can swap implementations (live CoinGecko client, stubs).

use crate::domain::{HistorySeries, MarketTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw snapshot row as deserialized from the markets endpoint, before
/// validation.
///
/// Every field is optional here; `normalize` decides what is required and
/// fails the whole batch on the first absence. Unknown upstream fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarketRecord {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
}

/// Parameters for the markets (snapshot) endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotQuery {
    pub vs_currency: String,
    pub page: u32,
    pub per_page: u32,
}

impl Default for SnapshotQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".into(),
            page: 1,
            per_page: 5,
        }
    }
}

impl SnapshotQuery {
    pub fn new(vs_currency: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            vs_currency: vs_currency.into(),
            page,
            per_page,
        }
    }
}

/// Parameters for the historical chart endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub asset_id: String,
    pub vs_currency: String,
    pub days: u32,
}

impl HistoryQuery {
    pub fn new(asset_id: impl Into<String>, days: u32) -> Self {
        Self {
            asset_id: asset_id.into(),
            vs_currency: "usd".into(),
            days,
        }
    }
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("missing required field '{field}' in market payload")]
    MissingField { field: &'static str },
}

/// Trait for market-data providers.
///
/// Implementations handle the specifics of one upstream API. The cache layer
/// sits above this trait — providers don't know about the cache.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch and normalize the current market snapshot.
    ///
    /// Single attempt: any transport or HTTP failure is surfaced as an error,
    /// never retried.
    fn fetch_snapshot(&self, query: &SnapshotQuery) -> Result<MarketTable, DataError>;

    /// Fetch a per-day price series, best effort.
    ///
    /// Rate limits and transient failures are retried internally; an
    /// exhausted retry budget yields an empty series, not an error.
    fn fetch_history(&self, query: &HistoryQuery) -> HistorySeries;
}
