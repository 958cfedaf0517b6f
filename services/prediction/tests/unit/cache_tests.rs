//! TTL behavior of the prediction cache

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dashboard_common::ManualClock;
use prediction_service::predictor::{FeatureSnapshot, PredictionResult, MODEL_NAME};
use prediction_service::PredictionCache;

fn result_for(symbol: &str, predicted: f64) -> PredictionResult {
    PredictionResult {
        symbol: symbol.to_string(),
        prediction_date: NaiveDate::from_ymd_opt(2024, 6, 4).expect("valid date"),
        predicted_close: predicted,
        lower: predicted - 10.0,
        upper: predicted + 10.0,
        model: MODEL_NAME.to_string(),
        confidence: 95.0,
        features: FeatureSnapshot {
            last_close: predicted - 1.0,
            sma5: predicted,
            sma20: predicted,
            rsi14: 55.0,
            volatility: 0.21,
        },
    }
}

fn cache_with_clock() -> (PredictionCache, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0)
            .single()
            .expect("valid time"),
    ));
    let cache = PredictionCache::new(Duration::minutes(15), Arc::clone(&clock) as _);
    (cache, clock)
}

#[test]
fn fresh_entry_is_returned() {
    let (cache, clock) = cache_with_clock();
    cache.put("TCS.NS", result_for("TCS.NS", 4000.0));

    clock.advance(Duration::minutes(14) + Duration::seconds(59));
    let hit = cache.get("TCS.NS").expect("still fresh");
    assert_eq!(hit.predicted_close, 4000.0);
}

#[test]
fn entry_exactly_ttl_old_is_stale() {
    let (cache, clock) = cache_with_clock();
    cache.put("TCS.NS", result_for("TCS.NS", 4000.0));

    clock.advance(Duration::minutes(15));
    assert!(cache.get("TCS.NS").is_none());
}

#[test]
fn unknown_symbol_misses() {
    let (cache, _clock) = cache_with_clock();
    assert!(cache.get("INFY.NS").is_none());
}

#[test]
fn put_overwrites_and_refreshes_the_entry() {
    let (cache, clock) = cache_with_clock();
    cache.put("TCS.NS", result_for("TCS.NS", 4000.0));

    clock.advance(Duration::minutes(10));
    cache.put("TCS.NS", result_for("TCS.NS", 4100.0));

    // Ten more minutes would expire the first write but not the second.
    clock.advance(Duration::minutes(10));
    let hit = cache.get("TCS.NS").expect("refreshed entry");
    assert_eq!(hit.predicted_close, 4100.0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn symbols_are_cached_independently() {
    let (cache, _clock) = cache_with_clock();
    cache.put("TCS.NS", result_for("TCS.NS", 4000.0));
    cache.put("INFY.NS", result_for("INFY.NS", 1500.0));

    assert_eq!(cache.get("TCS.NS").expect("hit").predicted_close, 4000.0);
    assert_eq!(cache.get("INFY.NS").expect("hit").predicted_close, 1500.0);
}
