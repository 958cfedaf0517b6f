//! Feature engineering for the next-day close model
//!
//! Each training row describes one trading day with nine features; the
//! target is the following day's close. The first [`WARMUP_BARS`] bars are
//! skipped so the slower indicators have real lookback, and the last bar is
//! excluded because it has no next-day target.

use dashboard_common::PriceBar;
use ndarray::{Array1, Array2, Axis};

use crate::indicators::{annualized_volatility, rsi, sma};

/// Features per training row
pub const FEATURE_COUNT: usize = 9;
/// Bars skipped at the start of the history for indicator warmup
pub const WARMUP_BARS: usize = 21;
/// Minimum bars of history before feature building is attempted
pub const MIN_HISTORY_BARS: usize = 50;
/// Minimum usable training rows below which training is refused
pub const MIN_TRAINING_ROWS: usize = 20;

/// Short moving-average window
pub const SMA_SHORT: usize = 5;
/// Long moving-average window
pub const SMA_LONG: usize = 20;
/// RSI lookback in close-to-close changes
pub const RSI_PERIOD: usize = 14;
/// Closes used for the volatility estimate
pub const VOLATILITY_PERIOD: usize = 20;

/// Feature matrix paired with next-day close targets
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub features: Array2<f64>,
    pub targets: Array1<f64>,
}

impl TrainingSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// One feature row for bar `i`, given full precomputed indicator series.
///
/// Lag features clamp to the first close when the series is too short,
/// mirroring the identity fallback the indicators use.
#[must_use]
pub fn feature_row(
    bars: &[PriceBar],
    closes: &[f64],
    sma_short: &[f64],
    sma_long: &[f64],
    rsi_series: &[f64],
    i: usize,
) -> [f64; FEATURE_COUNT] {
    let lag1 = if i >= 1 { closes[i - 1] } else { closes[0] };
    let lag5 = if i >= 5 { closes[i - 5] } else { closes[0] };
    [
        closes[i],
        lag1,
        lag5,
        sma_short[i],
        sma_long[i],
        rsi_series[i],
        annualized_volatility(&closes[..=i], VOLATILITY_PERIOD),
        bars[i].volume as f64 / 1.0e6,
        (bars[i].high - bars[i].low) / closes[i],
    ]
}

/// Build the supervised training set from a chronological bar series.
///
/// Rows cover indices `[WARMUP_BARS, n - 2]`, so a series of `n` bars
/// yields `max(0, n - WARMUP_BARS - 1)` rows. Callers decide whether that
/// is enough to train on.
#[must_use]
pub fn build_training_set(bars: &[PriceBar]) -> TrainingSet {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let sma_short = sma(&closes, SMA_SHORT);
    let sma_long = sma(&closes, SMA_LONG);
    let rsi_series = rsi(&closes, RSI_PERIOD);

    let n = bars.len();
    let row_count = n.saturating_sub(WARMUP_BARS + 1);
    let mut values = Vec::with_capacity(row_count * FEATURE_COUNT);
    let mut targets = Vec::with_capacity(row_count);
    if n >= WARMUP_BARS + 2 {
        for i in WARMUP_BARS..n - 1 {
            values.extend_from_slice(&feature_row(
                bars, &closes, &sma_short, &sma_long, &rsi_series, i,
            ));
            targets.push(closes[i + 1]);
        }
    }

    let features = Array2::from_shape_vec((targets.len(), FEATURE_COUNT), values)
        .unwrap_or_else(|_| Array2::zeros((0, FEATURE_COUNT)));
    TrainingSet {
        features,
        targets: Array1::from_vec(targets),
    }
}

/// Per-column mean and standard deviation for z-score normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationStats {
    pub means: Array1<f64>,
    pub stds: Array1<f64>,
}

impl NormalizationStats {
    /// Fit column statistics over the training matrix.
    ///
    /// Standard deviations are floored at 1.0 so constant columns map to
    /// zero instead of dividing by zero.
    #[must_use]
    pub fn fit(features: &Array2<f64>) -> Self {
        let cols = features.ncols();
        let n = features.nrows().max(1) as f64;
        let means = features
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(cols));

        let mut stds = Array1::zeros(cols);
        for (j, col) in features.axis_iter(Axis(1)).enumerate() {
            let mean = means[j];
            let variance = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            stds[j] = variance.sqrt().max(1.0);
        }
        Self { means, stds }
    }

    /// Z-score every row of a feature matrix.
    #[must_use]
    pub fn normalize(&self, features: &Array2<f64>) -> Array2<f64> {
        (features - &self.means) / &self.stds
    }

    /// Z-score a single feature row.
    #[must_use]
    pub fn normalize_row(&self, row: &Array1<f64>) -> Array1<f64> {
        (row - &self.means) / &self.stds
    }
}
