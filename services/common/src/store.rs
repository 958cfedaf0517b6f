//! Persistence collaborator interface
//!
//! The dashboard services never talk to a database directly; they consume
//! the narrow `MarketStore` contract ("resolve a symbol", "fetch bars in a
//! date range, ascending"). `InMemoryMarketStore` implements it for tests
//! and self-contained deployments seeded with synthetic history.

use crate::errors::StoreError;
use crate::types::{Company, PriceBar};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Read access to companies and their price history
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Resolve a ticker symbol to its company record
    async fn resolve_symbol(&self, symbol: &str) -> Result<Company, StoreError>;

    /// All bars for a company with `from <= date <= to`, ascending by date
    async fn price_history(
        &self,
        company_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>, StoreError>;
}

/// Process-local market store
#[derive(Debug)]
pub struct InMemoryMarketStore {
    companies: RwLock<Vec<Company>>,
    bars: RwLock<FxHashMap<i64, Vec<PriceBar>>>,
    next_id: AtomicI64,
}

impl Default for InMemoryMarketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMarketStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(Vec::new()),
            bars: RwLock::new(FxHashMap::default()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Register a company and return its record
    pub fn add_company(&self, symbol: &str, name: &str) -> Company {
        let company = Company {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            symbol: symbol.to_string(),
            name: name.to_string(),
        };
        self.companies.write().push(company.clone());
        company
    }

    /// Insert or replace bars for a company, keeping the series date-sorted
    /// with at most one bar per date (the incoming bar wins).
    pub fn upsert_bars(&self, company_id: i64, incoming: Vec<PriceBar>) {
        let mut all = self.bars.write();
        let series = all.entry(company_id).or_default();
        for bar in incoming {
            match series.binary_search_by_key(&bar.date, |b| b.date) {
                Ok(pos) => series[pos] = bar,
                Err(pos) => series.insert(pos, bar),
            }
        }
        debug!(
            company_id,
            bars = series.len(),
            "upserted price history"
        );
    }

    /// Number of bars stored for a company
    #[must_use]
    pub fn bar_count(&self, company_id: i64) -> usize {
        self.bars
            .read()
            .get(&company_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl MarketStore for InMemoryMarketStore {
    async fn resolve_symbol(&self, symbol: &str) -> Result<Company, StoreError> {
        self.companies
            .read()
            .iter()
            .find(|c| c.symbol == symbol)
            .cloned()
            .ok_or_else(|| StoreError::SymbolNotFound(symbol.to_string()))
    }

    async fn price_history(
        &self,
        company_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>, StoreError> {
        let all = self.bars.read();
        let series = all.get(&company_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(series
            .iter()
            .filter(|b| b.date >= from && b.date <= to)
            .cloned()
            .collect())
    }
}
