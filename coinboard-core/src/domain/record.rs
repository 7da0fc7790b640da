//! Market snapshot rows — the fundamental tabular unit.

use serde::{Deserialize, Serialize};

/// Validated snapshot row for a single asset, in raw currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
}

/// Snapshot row rescaled for display: market cap in billions, volume in millions.
///
/// Serialized field names are camelCase because this struct is the contract
/// handed to table and chart widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap_billions: f64,
    pub volume_millions: f64,
}

impl From<MarketRecord> for NormalizedRecord {
    fn from(record: MarketRecord) -> Self {
        Self {
            id: record.id,
            symbol: record.symbol,
            current_price: record.current_price,
            market_cap_billions: record.market_cap / 1e9,
            volume_millions: record.total_volume / 1e6,
        }
    }
}

/// Ordered table of normalized rows.
///
/// Row order is the upstream response order (market cap descending) unless
/// re-sorted by the caller via `sort_and_limit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTable {
    rows: Vec<NormalizedRecord>,
}

impl MarketTable {
    /// Column labels for the rendering surface, in row field order.
    pub const COLUMN_LABELS: [&'static str; 5] =
        ["Coin", "Symbol", "Price", "Market Cap (B)", "Volume (M)"];

    pub fn new(rows: Vec<NormalizedRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[NormalizedRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<NormalizedRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total market cap across all rows, in billions.
    pub fn total_market_cap_billions(&self) -> f64 {
        self.rows.iter().map(|r| r.market_cap_billions).sum()
    }
}
