//! Trailing summary statistics over a bar series

use chrono::NaiveDate;
use dashboard_common::PriceBar;
use serde::{Deserialize, Serialize};

use crate::predictor::round2;

/// 52-week style summary over whatever range the caller loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolStats {
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    /// Mean daily volume rounded to the nearest share
    pub average_volume: u64,
    /// Date of the latest bar in the range
    pub as_of: NaiveDate,
}

/// Stats payload served over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub symbol: String,
    #[serde(flatten)]
    pub stats: SymbolStats,
    pub data_points: usize,
    pub period: String,
}

/// Mean daily volume rounded to the nearest share; zero for an empty series.
#[must_use]
pub fn average_volume(bars: &[PriceBar]) -> u64 {
    if bars.is_empty() {
        return 0;
    }
    let total: u128 = bars.iter().map(|b| u128::from(b.volume)).sum();
    ((total as f64) / bars.len() as f64).round() as u64
}

/// Summary statistics over a bar series, `None` when the series is empty.
#[must_use]
pub fn compute(bars: &[PriceBar]) -> Option<SymbolStats> {
    let last = bars.last()?;
    let high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    Some(SymbolStats {
        fifty_two_week_high: round2(high),
        fifty_two_week_low: round2(low),
        average_volume: average_volume(bars),
        as_of: last.date,
    })
}
