//! Live quote endpoint
//!
//! Proxies the upstream quote feed behind a minimum-interval throttle so a
//! burst of dashboard refreshes cannot exhaust the upstream quota.

use axum::extract::{Path, State};
use axum::Json;
use dashboard_common::QuoteSnapshot;

use crate::error::PredictionError;
use crate::server::AppState;

/// GET /api/v1/quote/{symbol}
pub async fn quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<QuoteSnapshot>, PredictionError> {
    let feed = state.quotes.as_ref().ok_or(PredictionError::QuoteDisabled)?;
    state
        .quote_throttle
        .try_acquire()
        .map_err(|wait| PredictionError::QuoteThrottled(wait.num_milliseconds()))?;

    let snapshot = feed.last_quote(&symbol).await?;
    Ok(Json(snapshot))
}
