//! Summary statistics over bar series

use chrono::NaiveDate;
use dashboard_common::PriceBar;
use prediction_service::stats::{average_volume, compute};
use pretty_assertions::assert_eq;

fn bar(day: u32, high: f64, low: f64, volume: u64) -> PriceBar {
    PriceBar {
        date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date"),
        open: (high + low) / 2.0,
        high,
        low,
        close: (high + low) / 2.0,
        volume,
    }
}

fn sample_week() -> Vec<PriceBar> {
    vec![
        bar(4, 110.0, 99.0, 1_000_000),
        bar(5, 112.0, 100.0, 1_200_000),
        bar(6, 108.0, 98.0, 900_000),
        bar(7, 115.0, 101.0, 1_100_000),
        bar(8, 113.0, 100.0, 1_300_000),
    ]
}

#[test]
fn average_volume_is_the_rounded_mean() {
    assert_eq!(average_volume(&sample_week()), 1_100_000);
}

#[test]
fn average_volume_rounds_to_nearest_share() {
    let bars = vec![bar(4, 100.0, 99.0, 1), bar(5, 100.0, 99.0, 2)];
    assert_eq!(average_volume(&bars), 2);
}

#[test]
fn average_volume_of_empty_series_is_zero() {
    assert_eq!(average_volume(&[]), 0);
}

#[test]
fn high_and_low_span_the_whole_range() {
    let stats = compute(&sample_week()).expect("non-empty series");
    assert_eq!(stats.fifty_two_week_high, 115.0);
    assert_eq!(stats.fifty_two_week_low, 98.0);
}

#[test]
fn as_of_is_the_latest_bar_date() {
    let stats = compute(&sample_week()).expect("non-empty series");
    assert_eq!(stats.as_of, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
}

#[test]
fn empty_series_yields_no_stats() {
    assert!(compute(&[]).is_none());
}

#[test]
fn stats_serialize_with_camel_case_fields() {
    let stats = compute(&sample_week()).expect("non-empty series");
    let json = serde_json::to_value(&stats).expect("serializes");

    assert_eq!(json["fiftyTwoWeekHigh"], 115.0);
    assert_eq!(json["fiftyTwoWeekLow"], 98.0);
    assert_eq!(json["averageVolume"], 1_100_000);
}
