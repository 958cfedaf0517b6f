//! Core market data records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session for a single symbol.
///
/// Bars are immutable once stored and strictly ordered by date within a
/// symbol; the ingestion side is responsible for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day this bar covers
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Shares traded during the session
    pub volume: u64,
}

impl PriceBar {
    /// Whether the bar carries usable price data.
    ///
    /// Prices must be positive and the low must not exceed the high.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.open > 0.0
            && self.high > 0.0
            && self.low > 0.0
            && self.close > 0.0
            && self.low <= self.high
    }
}

/// A listed company known to the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Internal identifier assigned by the store
    pub id: i64,
    /// Ticker symbol (e.g. "RELIANCE.NS")
    pub symbol: String,
    /// Display name
    pub name: String,
}
