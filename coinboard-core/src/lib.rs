//! Coinboard Core — data layer for a market dashboard.
//!
//! This crate contains the reusable logic behind the dashboard UI:
//! - Typed domain rows: a market snapshot table and per-asset price history
//! - CoinGecko fetcher with bounded timeouts, plus a retry policy that
//!   absorbs rate limits on the history endpoint
//! - Payload validation and display normalization (billions/millions
//!   rescaling, "Others" bucketing, sort-and-limit)
//! - Caller-owned TTL memoization of fetch results
//!
//! No UI, charting, or CLI lives here; callers hand `MarketTable` and
//! `HistorySeries` to whatever rendering surface they use.

pub mod config;
pub mod data;
pub mod domain;

pub use config::{CacheConfig, ConfigError, FetchConfig, RetryConfig};
pub use data::cache::FetchCache;
pub use data::coingecko::CoinGeckoProvider;
pub use data::normalize::{bucket_tail, normalize, sort_and_limit, SortKey};
pub use data::provider::{DataError, HistoryQuery, MarketDataProvider, SnapshotQuery};
pub use data::retry::RetryPolicy;
pub use domain::{HistorySeries, MarketRecord, MarketTable, NormalizedRecord, PricePoint};
