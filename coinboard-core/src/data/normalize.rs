//! Payload validation and table reshaping.
//!
//! `normalize` is the single validation boundary: raw rows are checked once
//! here and never re-validated downstream. `bucket_tail` and `sort_and_limit`
//! reshape an already-validated table for display.

use crate::data::provider::{DataError, RawMarketRecord};
use crate::domain::{MarketRecord, MarketTable, NormalizedRecord};

/// Symbol carried by the synthetic aggregate row produced by `bucket_tail`.
pub const OTHERS_LABEL: &str = "Others";

/// Validate raw rows and apply the display scale transform.
///
/// Fails on the first missing required field; the whole batch is rejected,
/// never individual rows. Row order is preserved.
pub fn normalize(raw: Vec<RawMarketRecord>) -> Result<MarketTable, DataError> {
    let mut rows = Vec::with_capacity(raw.len());
    for record in raw {
        rows.push(NormalizedRecord::from(validate(record)?));
    }
    Ok(MarketTable::new(rows))
}

fn validate(raw: RawMarketRecord) -> Result<MarketRecord, DataError> {
    Ok(MarketRecord {
        id: raw.id.ok_or(DataError::MissingField { field: "id" })?,
        symbol: raw.symbol.ok_or(DataError::MissingField { field: "symbol" })?,
        current_price: raw
            .current_price
            .ok_or(DataError::MissingField { field: "current_price" })?,
        market_cap: raw
            .market_cap
            .ok_or(DataError::MissingField { field: "market_cap" })?,
        total_volume: raw
            .total_volume
            .ok_or(DataError::MissingField { field: "total_volume" })?,
    })
}

/// Collapse everything past the first `top_n` rows into one "Others" row.
///
/// Only market cap is aggregated; the synthetic row carries an empty id and
/// zeros elsewhere. Keeps pie-chart cardinality bounded. A `top_n` at or past
/// the end of the table returns it unchanged.
pub fn bucket_tail(table: &MarketTable, top_n: usize) -> MarketTable {
    let rows = table.rows();
    if rows.len() <= top_n {
        return table.clone();
    }

    let (head, tail) = rows.split_at(top_n);
    let mut bucketed = head.to_vec();
    bucketed.push(NormalizedRecord {
        id: String::new(),
        symbol: OTHERS_LABEL.to_string(),
        current_price: 0.0,
        market_cap_billions: tail.iter().map(|r| r.market_cap_billions).sum(),
        volume_millions: 0.0,
    });
    MarketTable::new(bucketed)
}

/// Numeric column to sort a table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    MarketCap,
    Volume,
}

impl SortKey {
    fn value(self, row: &NormalizedRecord) -> f64 {
        match self {
            SortKey::Price => row.current_price,
            SortKey::MarketCap => row.market_cap_billions,
            SortKey::Volume => row.volume_millions,
        }
    }
}

/// Stable sort by `key`, then truncate to `limit` rows.
pub fn sort_and_limit(
    table: &MarketTable,
    key: SortKey,
    descending: bool,
    limit: usize,
) -> MarketTable {
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let ord = key.value(a).total_cmp(&key.value(b));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    rows.truncate(limit);
    MarketTable::new(rows)
}
