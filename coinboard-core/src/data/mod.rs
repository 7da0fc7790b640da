//! Fetching, normalization, and caching of market data.

pub mod cache;
pub mod coingecko;
pub mod normalize;
pub mod provider;
pub mod retry;

pub use cache::FetchCache;
pub use coingecko::CoinGeckoProvider;
pub use normalize::{bucket_tail, normalize, sort_and_limit, SortKey, OTHERS_LABEL};
pub use provider::{DataError, HistoryQuery, MarketDataProvider, RawMarketRecord, SnapshotQuery};
pub use retry::{AttemptError, RetryPolicy, Sleeper, ThreadSleeper};
