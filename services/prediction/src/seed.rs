//! Synthetic OHLCV history for self-contained deployments
//!
//! Without an upstream market data source the service seeds its store with
//! a plausible random walk so every endpoint works out of the box.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use dashboard_common::{InMemoryMarketStore, PriceBar};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::predictor::round2;

/// Trading days in roughly two calendar years
pub const SEED_TRADING_DAYS: usize = 504;

/// Symbols seeded by default with their display names
pub const DEFAULT_COMPANIES: &[(&str, &str)] = &[
    ("RELIANCE.NS", "Reliance Industries"),
    ("TCS.NS", "Tata Consultancy Services"),
    ("INFY.NS", "Infosys"),
    ("HDFCBANK.NS", "HDFC Bank"),
    ("ICICIBANK.NS", "ICICI Bank"),
    ("SBIN.NS", "State Bank of India"),
    ("LT.NS", "Larsen & Toubro"),
    ("ITC.NS", "ITC"),
    ("HINDUNILVR.NS", "Hindustan Unilever"),
    ("ASIANPAINT.NS", "Asian Paints"),
];

fn jitter(base: f64, max_pct: f64, rng: &mut StdRng) -> f64 {
    base * (1.0 + (rng.r#gen::<f64>() - 0.5) * 2.0 * max_pct)
}

/// Random-walk daily series ending on the last weekday at or before `end`.
///
/// Each open moves up to 2% from the previous close, each close up to 4%
/// from the open, wicks extend up to 3% beyond the body, and volume is
/// uniform in 200k..5M. Weekends are skipped.
#[must_use]
pub fn synthetic_history(
    start_close: f64,
    end: NaiveDate,
    trading_days: usize,
    rng: &mut StdRng,
) -> Vec<PriceBar> {
    let mut dates = Vec::with_capacity(trading_days);
    let mut day = end;
    while dates.len() < trading_days {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        day -= Duration::days(1);
    }
    dates.reverse();

    let mut bars = Vec::with_capacity(trading_days);
    let mut previous_close = start_close;
    for date in dates {
        let open = round2(jitter(previous_close, 0.02, rng));
        let close = round2(jitter(open, 0.04, rng));
        let body_high = open.max(close);
        let body_low = open.min(close);
        let high = round2(body_high * (1.0 + rng.r#gen::<f64>() * 0.03));
        let low = round2(body_low * (1.0 - rng.r#gen::<f64>() * 0.03));
        let volume = rng.gen_range(200_000..5_000_000);

        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
        previous_close = close;
    }
    bars
}

fn display_name(symbol: &str) -> &str {
    DEFAULT_COMPANIES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map_or(symbol, |(_, name)| name)
}

/// Register `symbols` and give each two years of synthetic history ending
/// at `end`.
pub fn seed_store(store: &InMemoryMarketStore, symbols: &[String], end: NaiveDate, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for symbol in symbols {
        let company = store.add_company(symbol, display_name(symbol));
        let start_close = rng.gen_range(100.0..4_000.0);
        let bars = synthetic_history(start_close, end, SEED_TRADING_DAYS, &mut rng);
        store.upsert_bars(company.id, bars);
    }
    info!(companies = symbols.len(), "seeded synthetic market history");
}
