//! Historical price series for a single asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical price sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Time-ordered price samples, possibly empty.
///
/// Emptiness is the "no data available" sentinel: a series whose fetch
/// exhausted its retry budget is indistinguishable from a genuinely empty
/// upstream response. Callers branch on `is_empty`, never on an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    points: Vec<PricePoint>,
}

impl HistorySeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if timestamps are monotonically non-decreasing.
    ///
    /// Upstream sends samples oldest-first and the fetch path preserves that
    /// order; this never re-sorts.
    pub fn is_time_ordered(&self) -> bool {
        self.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
    }
}
