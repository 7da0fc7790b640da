//! TTL memoization for fetch results.
//!
//! An explicit, caller-owned cache keyed by request parameters. Entries are
//! recomputed synchronously on expiry. The map lock is not held across the
//! network call, so concurrent callers past expiry may both refetch — an
//! accepted race under the read-mostly, low-concurrency usage pattern.

use crate::config::CacheConfig;
use crate::data::provider::{DataError, HistoryQuery, MarketDataProvider, SnapshotQuery};
use crate::domain::{HistorySeries, MarketTable};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T: Clone> Entry<T> {
    fn fresh_value(&self, ttl: Duration) -> Option<T> {
        (self.fetched_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

/// Caller-owned TTL cache over a provider's fetch calls.
///
/// Only successfully computed values are stored; a snapshot fetch error is
/// surfaced and leaves the cache untouched. An empty history series counts as
/// a successfully computed value under the best-effort contract and is cached
/// like any other.
pub struct FetchCache {
    snapshot_ttl: Duration,
    history_ttl: Duration,
    snapshots: Mutex<HashMap<SnapshotQuery, Entry<MarketTable>>>,
    histories: Mutex<HashMap<HistoryQuery, Entry<HistorySeries>>>,
}

impl FetchCache {
    pub fn new(snapshot_ttl: Duration, history_ttl: Duration) -> Self {
        Self {
            snapshot_ttl,
            history_ttl,
            snapshots: Mutex::new(HashMap::new()),
            histories: Mutex::new(HashMap::new()),
        }
    }

    /// Default TTLs: snapshots stay fresh for 30 minutes, histories for 60.
    pub fn with_default_ttls() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.snapshot_ttl(), config.history_ttl())
    }

    /// Snapshot for `query`, reusing a fresh cached table when present.
    pub fn snapshot(
        &self,
        provider: &dyn MarketDataProvider,
        query: &SnapshotQuery,
    ) -> Result<MarketTable, DataError> {
        if let Some(table) = self.fresh_snapshot(query) {
            return Ok(table);
        }

        let table = provider.fetch_snapshot(query)?;
        self.snapshots.lock().unwrap().insert(
            query.clone(),
            Entry {
                value: table.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(table)
    }

    /// History for `query`, reusing a fresh cached series when present.
    pub fn history(
        &self,
        provider: &dyn MarketDataProvider,
        query: &HistoryQuery,
    ) -> HistorySeries {
        if let Some(series) = self.fresh_history(query) {
            return series;
        }

        let series = provider.fetch_history(query);
        self.histories.lock().unwrap().insert(
            query.clone(),
            Entry {
                value: series.clone(),
                fetched_at: Instant::now(),
            },
        );
        series
    }

    /// True when no fresh snapshot entry exists for `query`.
    pub fn snapshot_expired(&self, query: &SnapshotQuery) -> bool {
        self.fresh_snapshot(query).is_none()
    }

    /// True when no fresh history entry exists for `query`.
    pub fn history_expired(&self, query: &HistoryQuery) -> bool {
        self.fresh_history(query).is_none()
    }

    /// Drop the cached snapshot for `query`, forcing the next call to refetch.
    pub fn invalidate_snapshot(&self, query: &SnapshotQuery) {
        self.snapshots.lock().unwrap().remove(query);
    }

    /// Drop the cached history for `query`, forcing the next call to refetch.
    pub fn invalidate_history(&self, query: &HistoryQuery) {
        self.histories.lock().unwrap().remove(query);
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.snapshots.lock().unwrap().clear();
        self.histories.lock().unwrap().clear();
    }

    fn fresh_snapshot(&self, query: &SnapshotQuery) -> Option<MarketTable> {
        self.snapshots
            .lock()
            .unwrap()
            .get(query)
            .and_then(|e| e.fresh_value(self.snapshot_ttl))
    }

    fn fresh_history(&self, query: &HistoryQuery) -> Option<HistorySeries> {
        self.histories
            .lock()
            .unwrap()
            .get(query)
            .and_then(|e| e.fresh_value(self.history_ttl))
    }
}
