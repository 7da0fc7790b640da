//! CoinGecko data provider.
//!
//! Fetches the current market snapshot and per-asset daily price history from
//! the CoinGecko v3 API. The snapshot path is a single shot; the history path
//! runs through the retry policy, absorbing rate limits and transient
//! failures into a best-effort empty series.

use crate::config::FetchConfig;
use crate::data::normalize;
use crate::data::provider::{
    DataError, HistoryQuery, MarketDataProvider, RawMarketRecord, SnapshotQuery,
};
use crate::data::retry::{AttemptError, RetryPolicy, Sleeper, ThreadSleeper};
use crate::domain::{HistorySeries, MarketTable, PricePoint};
use serde::Deserialize;

/// Historical chart response: `prices` is a list of
/// `[timestamp_millis, price]` pairs, oldest first.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    prices: Vec<(i64, f64)>,
}

/// CoinGecko market-data provider.
pub struct CoinGeckoProvider {
    client: reqwest::blocking::Client,
    api_base: String,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl CoinGeckoProvider {
    pub fn new(config: &FetchConfig) -> Self {
        Self::with_sleeper(config, Box::new(ThreadSleeper))
    }

    /// Provider with a custom sleeper, so tests can observe backoff waits
    /// instead of serving them.
    pub fn with_sleeper(config: &FetchConfig, sleeper: Box<dyn Sleeper>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            retry: config.retry.policy(),
            sleeper,
        }
    }

    fn markets_url(&self, query: &SnapshotQuery) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false",
            self.api_base, query.vs_currency, query.per_page, query.page
        )
    }

    fn chart_url(&self, query: &HistoryQuery) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}&interval=daily",
            self.api_base, query.asset_id, query.vs_currency, query.days
        )
    }

    /// One GET against the markets endpoint. No retry.
    fn fetch_markets_once(&self, query: &SnapshotQuery) -> Result<Vec<RawMarketRecord>, DataError> {
        let url = self.markets_url(query);
        tracing::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after(&resp),
            });
        }
        if !status.is_success() {
            return Err(DataError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        resp.json::<Vec<RawMarketRecord>>()
            .map_err(|e| DataError::MalformedResponse(format!("markets payload: {e}")))
    }

    /// One GET against the chart endpoint, classified for the retry loop.
    fn fetch_chart_once(&self, query: &HistoryQuery) -> Result<Vec<PricePoint>, AttemptError> {
        let url = self.chart_url(query);
        tracing::debug!("GET {url}");

        match self.client.get(&url).send() {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(AttemptError::RateLimited {
                        retry_after_secs: retry_after(&resp),
                    });
                }
                if !status.is_success() {
                    return Err(AttemptError::Transient(format!("HTTP {status}")));
                }

                let chart: ChartResponse = resp
                    .json()
                    .map_err(|e| AttemptError::Transient(format!("chart payload: {e}")))?;
                Ok(parse_chart(chart))
            }
            Err(e) => Err(AttemptError::Transient(e.to_string())),
        }
    }
}

impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_snapshot(&self, query: &SnapshotQuery) -> Result<MarketTable, DataError> {
        let raw = self.fetch_markets_once(query)?;
        normalize::normalize(raw)
    }

    fn fetch_history(&self, query: &HistoryQuery) -> HistorySeries {
        match self
            .retry
            .run(self.sleeper.as_ref(), |_| self.fetch_chart_once(query))
        {
            Ok(points) => HistorySeries::new(points),
            Err(error) => {
                tracing::warn!(
                    "history fetch for '{}' exhausted {} attempts ({error}); returning empty series",
                    query.asset_id,
                    self.retry.max_attempts
                );
                HistorySeries::empty()
            }
        }
    }
}

/// Convert raw `[millis, price]` pairs into points, keeping source order.
fn parse_chart(chart: ChartResponse) -> Vec<PricePoint> {
    chart
        .prices
        .into_iter()
        .filter_map(|(millis, price)| {
            chrono::DateTime::from_timestamp_millis(millis)
                .map(|timestamp| PricePoint { timestamp, price })
        })
        .collect()
}

/// Upstream's suggested wait from the `retry-after` header, defaulting to 60s.
fn retry_after(resp: &reqwest::blocking::Response) -> u64 {
    resp.headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
