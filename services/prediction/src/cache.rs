//! Per-symbol prediction result cache

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashboard_common::Clock;
use dashmap::DashMap;
use tracing::debug;

use crate::predictor::PredictionResult;

/// Default time-to-live for cached predictions
pub const DEFAULT_TTL_MINUTES: i64 = 15;

#[derive(Debug, Clone)]
struct CacheEntry {
    result: PredictionResult,
    created_at: DateTime<Utc>,
}

/// TTL cache keyed by symbol.
///
/// Entries are overwritten on refresh and never evicted; staleness alone
/// bounds reuse. Concurrent writers for the same symbol race
/// last-write-wins, which is acceptable because either result is fresh.
#[derive(Debug)]
pub struct PredictionCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl PredictionCache {
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Fresh cached result for `symbol`, if any. An entry exactly `ttl` old
    /// is already stale.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<PredictionResult> {
        let entry = self.entries.get(symbol)?;
        let age = self.clock.now() - entry.created_at;
        if age < self.ttl {
            Some(entry.result.clone())
        } else {
            debug!(symbol, "cached prediction expired");
            None
        }
    }

    pub fn put(&self, symbol: &str, result: PredictionResult) {
        self.entries.insert(
            symbol.to_string(),
            CacheEntry {
                result,
                created_at: self.clock.now(),
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
