//! Next-day close forecast from a trained model

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use dashboard_common::PriceBar;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::features::{RSI_PERIOD, SMA_LONG, SMA_SHORT, VOLATILITY_PERIOD};
use crate::indicators::{annualized_volatility, rsi, sma};
use crate::model::TrainedModel;

/// Algorithm identifier reported in prediction payloads
pub const MODEL_NAME: &str = "neural_network_regression";
/// Trailing sessions used to build the inference-time feature vector
pub const INFERENCE_WINDOW: usize = 30;
/// Half-width of the confidence band in multiples of training RMSE
pub const BAND_RMSE_MULTIPLIER: f64 = 1.5;

/// Indicator snapshot reported alongside the point estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSnapshot {
    /// Latest close, unrounded
    pub last_close: f64,
    pub sma5: f64,
    pub sma20: f64,
    pub rsi14: f64,
    pub volatility: f64,
}

/// Point forecast with a heuristic confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub symbol: String,
    /// Next trading day after the latest input bar, weekends skipped
    pub prediction_date: NaiveDate,
    pub predicted_close: f64,
    pub lower: f64,
    pub upper: f64,
    pub model: String,
    /// 0-100 signal-to-noise heuristic, not a calibrated probability
    pub confidence: f64,
    pub features: FeatureSnapshot,
}

/// Next weekday strictly after `date`.
#[must_use]
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}

/// Round to two decimal places (money).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to four decimal places (ratios).
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Build the current-day feature vector over the trailing window and run
/// one forward pass.
///
/// Indicators are recomputed over the last [`INFERENCE_WINDOW`] bars only;
/// short windows fall back to the early-index indicator defaults instead of
/// failing.
pub fn predict_next_close(
    model: &TrainedModel,
    symbol: &str,
    bars: &[PriceBar],
) -> Result<PredictionResult, PredictionError> {
    if bars.is_empty() {
        return Err(PredictionError::InsufficientHistory {
            bars: 0,
            required: 1,
        });
    }

    let start = bars.len().saturating_sub(INFERENCE_WINDOW);
    let window = &bars[start..];
    let closes: Vec<f64> = window.iter().map(|b| b.close).collect();
    let sma_short = sma(&closes, SMA_SHORT);
    let sma_long = sma(&closes, SMA_LONG);
    let rsi_series = rsi(&closes, RSI_PERIOD);
    let volatility = annualized_volatility(&closes, VOLATILITY_PERIOD);

    let last = window.len() - 1;
    let lag1 = if last >= 1 { closes[last - 1] } else { closes[0] };
    let lag5 = if last >= 5 { closes[last - 5] } else { closes[0] };
    let raw = Array1::from(vec![
        closes[last],
        lag1,
        lag5,
        sma_short[last],
        sma_long[last],
        rsi_series[last],
        volatility,
        window[last].volume as f64 / 1.0e6,
        (window[last].high - window[last].low) / closes[last],
    ]);

    let input = model.stats.normalize_row(&raw);
    let predicted = model.network.predict(&input);
    if !predicted.is_finite() {
        return Err(PredictionError::TrainingFailed(
            "non-finite forecast".to_string(),
        ));
    }

    let half_band = BAND_RMSE_MULTIPLIER * model.rmse;
    let confidence = (100.0 - model.rmse / predicted * 100.0).clamp(0.0, 100.0);

    Ok(PredictionResult {
        symbol: symbol.to_string(),
        prediction_date: next_trading_day(window[last].date),
        predicted_close: round2(predicted),
        lower: round2(predicted - half_band),
        upper: round2(predicted + half_band),
        model: MODEL_NAME.to_string(),
        confidence: round2(confidence),
        features: FeatureSnapshot {
            last_close: closes[last],
            sma5: round2(sma_short[last]),
            sma20: round2(sma_long[last]),
            rsi14: round2(rsi_series[last]),
            volatility: round4(volatility),
        },
    })
}
