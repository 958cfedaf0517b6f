//! Forecast assembly: dates, rounding, confidence band

use approx::assert_relative_eq;
use chrono::NaiveDate;
use prediction_service::features::build_training_set;
use prediction_service::indicators::annualized_volatility;
use prediction_service::model::{train, TrainedModel, TrainingConfig};
use prediction_service::predictor::{
    next_trading_day, predict_next_close, round2, round4, MODEL_NAME,
};
use prediction_service::PredictionError;
use rstest::*;
use test_utils::BarSeriesFactory;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn trained_on(series: &[dashboard_common::PriceBar]) -> TrainedModel {
    let set = build_training_set(series);
    let config = TrainingConfig {
        epochs: 30,
        seed: Some(17),
        ..TrainingConfig::default()
    };
    train(&set, &config).expect("training succeeds")
}

#[rstest]
#[case(date(2024, 6, 5), date(2024, 6, 6))] // Wed -> Thu
#[case(date(2024, 6, 7), date(2024, 6, 10))] // Fri -> Mon
#[case(date(2024, 6, 8), date(2024, 6, 10))] // Sat -> Mon
#[case(date(2024, 6, 9), date(2024, 6, 10))] // Sun -> Mon
fn next_trading_day_skips_weekends(#[case] from: NaiveDate, #[case] expected: NaiveDate) {
    assert_eq!(next_trading_day(from), expected);
}

#[rstest]
#[case(3.14159, 3.14)]
#[case(2.718, 2.72)]
#[case(100.0, 100.0)]
fn round2_keeps_two_decimals(#[case] input: f64, #[case] expected: f64) {
    assert_relative_eq!(round2(input), expected);
}

#[test]
fn round4_keeps_four_decimals() {
    assert_relative_eq!(round4(0.123_456), 0.1235);
}

#[test]
fn forecast_carries_the_model_name_and_symbol() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    assert_eq!(result.model, MODEL_NAME);
    assert_eq!(result.symbol, "TCS.NS");
}

#[test]
fn prediction_date_is_the_next_weekday_after_the_latest_bar() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    let last_date = series.last().expect("non-empty").date;
    assert_eq!(result.prediction_date, next_trading_day(last_date));
}

#[test]
fn confidence_band_is_symmetric_around_the_point_estimate() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    assert!(result.lower <= result.predicted_close);
    assert!(result.predicted_close <= result.upper);
    // Each bound is rounded independently, so allow a cent of slack.
    let below = result.predicted_close - result.lower;
    let above = result.upper - result.predicted_close;
    assert!((below - above).abs() <= 0.02);
}

#[test]
fn confidence_stays_within_percent_bounds() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    assert!(result.confidence >= 0.0);
    assert!(result.confidence <= 100.0);
}

#[test]
fn snapshot_reports_the_unrounded_last_close() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    let last_close = series.last().expect("non-empty").close;
    assert_relative_eq!(result.features.last_close, last_close);
}

#[test]
fn snapshot_indicators_use_the_trailing_window() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");

    let closes: Vec<f64> = series.iter().map(|b| b.close).collect();
    let window = &closes[closes.len() - 30..];
    let expected_sma5 = round2(window[25..].iter().sum::<f64>() / 5.0);
    assert_relative_eq!(result.features.sma5, expected_sma5);

    let expected_vol = round4(annualized_volatility(window, 20));
    assert_relative_eq!(result.features.volatility, expected_vol);
}

#[test]
fn zero_rmse_collapses_the_band_to_the_point_estimate() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let mut model = trained_on(&series);
    model.rmse = 0.0;

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    assert_relative_eq!(result.lower, result.predicted_close);
    assert_relative_eq!(result.upper, result.predicted_close);
}

#[test]
fn forecast_refuses_an_empty_history() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let err = predict_next_close(&model, "TCS.NS", &[]).unwrap_err();
    assert!(matches!(err, PredictionError::InsufficientHistory { .. }));
}

#[test]
fn payload_serializes_with_camel_case_fields() {
    let series = BarSeriesFactory::new().random_walk(100, 800.0, 4);
    let model = trained_on(&series);

    let result = predict_next_close(&model, "TCS.NS", &series).expect("forecast succeeds");
    let json = serde_json::to_value(&result).expect("serializes");

    assert!(json.get("predictionDate").is_some());
    assert!(json.get("predictedClose").is_some());
    assert!(json["features"].get("lastClose").is_some());
}
