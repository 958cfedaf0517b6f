//! Technical indicator series over close prices
//!
//! Windows that have not filled yet fall back to a defined early value
//! instead of NaN: identity SMA, neutral RSI, zero volatility. The charting
//! side relies on the same convention, so it is preserved here.

/// Annualization factor for daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple moving average over `period` closes.
///
/// Indices before the window fills carry the raw close at that index.
#[must_use]
pub fn sma(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i + 1 < period {
            out.push(closes[i]);
        } else {
            let window = &closes[i + 1 - period..=i];
            out.push(window.iter().sum::<f64>() / period as f64);
        }
    }
    out
}

/// Relative strength index from close-to-close average gains and losses.
///
/// `out[i]` covers the `period` changes ending at bar `i`. Indices with
/// fewer than `period` changes of lookback are neutral (50); a zero average
/// loss saturates at 100.
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut out = vec![50.0; n];
    if n < 2 || period == 0 {
        return out;
    }

    let mut gains = Vec::with_capacity(n - 1);
    let mut losses = Vec::with_capacity(n - 1);
    for i in 1..n {
        let change = closes[i] - closes[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    for i in period..n {
        let avg_gain = gains[i - period..i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[i - period..i].iter().sum::<f64>() / period as f64;
        out[i] = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
    }
    out
}

/// Annualized volatility: standard deviation of log returns over the
/// trailing `period` closes, scaled by √252. Zero when fewer than `period`
/// closes are available.
#[must_use]
pub fn annualized_volatility(closes: &[f64], period: usize) -> f64 {
    if closes.len() < period || period < 2 {
        return 0.0;
    }
    let recent = &closes[closes.len() - period..];
    let returns: Vec<f64> = recent.windows(2).map(|w| (w[1] / w[0]).ln()).collect();

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
}
