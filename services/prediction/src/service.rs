//! Request pipeline: cache, history load, feature build, train, forecast

use std::sync::Arc;

use chrono::Duration;
use dashboard_common::{Clock, MarketStore};
use tracing::{debug, info};

use crate::cache::PredictionCache;
use crate::config::ServiceConfig;
use crate::error::PredictionError;
use crate::features::{build_training_set, MIN_HISTORY_BARS, MIN_TRAINING_ROWS};
use crate::model::{train, TrainingConfig};
use crate::predictor::{predict_next_close, PredictionResult};
use crate::stats::{self, StatsReport};

/// Orchestrates the full prediction pipeline for one request.
///
/// Training runs on the blocking pool; concurrent requests for the same
/// symbol may both train, and the later result wins in the cache.
pub struct PredictionService {
    store: Arc<dyn MarketStore>,
    cache: PredictionCache,
    training: TrainingConfig,
    history_days: i64,
    stats_days: i64,
    clock: Arc<dyn Clock>,
}

impl PredictionService {
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>, clock: Arc<dyn Clock>, config: &ServiceConfig) -> Self {
        Self {
            store,
            cache: PredictionCache::new(
                Duration::minutes(config.cache.ttl_minutes),
                Arc::clone(&clock),
            ),
            training: config.training.clone(),
            history_days: config.data.history_days,
            stats_days: config.data.stats_days,
            clock,
        }
    }

    /// Serve a next-day forecast, from cache when fresh.
    pub async fn predict(&self, symbol: &str) -> Result<PredictionResult, PredictionError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(PredictionError::MissingSymbol);
        }

        if let Some(hit) = self.cache.get(symbol) {
            debug!(symbol, "serving cached prediction");
            return Ok(hit);
        }

        let company = self.store.resolve_symbol(symbol).await?;
        let today = self.clock.now().date_naive();
        let from = today - Duration::days(self.history_days);
        let bars = self.store.price_history(company.id, from, today).await?;
        if bars.len() < MIN_HISTORY_BARS {
            return Err(PredictionError::InsufficientHistory {
                bars: bars.len(),
                required: MIN_HISTORY_BARS,
            });
        }

        info!(symbol, bars = bars.len(), "training next-day model");
        let training = self.training.clone();
        let owned_symbol = symbol.to_string();
        let result = tokio::task::spawn_blocking(move || {
            let set = build_training_set(&bars);
            if set.len() < MIN_TRAINING_ROWS {
                return Err(PredictionError::InsufficientData {
                    rows: set.len(),
                    required: MIN_TRAINING_ROWS,
                });
            }
            let model = train(&set, &training)?;
            predict_next_close(&model, &owned_symbol, &bars)
        })
        .await
        .map_err(|e| PredictionError::Internal(format!("training task aborted: {e}")))??;

        self.cache.put(symbol, result.clone());
        info!(
            symbol,
            predicted_close = result.predicted_close,
            confidence = result.confidence,
            "prediction ready"
        );
        Ok(result)
    }

    /// Trailing summary statistics for one symbol.
    pub async fn stats(&self, symbol: &str) -> Result<StatsReport, PredictionError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(PredictionError::MissingSymbol);
        }

        let company = self.store.resolve_symbol(symbol).await?;
        let to = self.clock.now().date_naive();
        let from = to - Duration::days(self.stats_days);
        let bars = self.store.price_history(company.id, from, to).await?;

        let stats =
            stats::compute(&bars).ok_or_else(|| PredictionError::NoData(symbol.to_string()))?;
        Ok(StatsReport {
            symbol: symbol.to_string(),
            period: format!("{from} to {}", stats.as_of),
            data_points: bars.len(),
            stats,
        })
    }

    /// Cached predictions currently held.
    #[must_use]
    pub fn cached_predictions(&self) -> usize {
        self.cache.len()
    }
}
