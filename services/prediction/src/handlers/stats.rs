//! Summary statistics endpoint

use axum::extract::{Path, State};
use axum::Json;

use crate::error::PredictionError;
use crate::server::AppState;
use crate::stats::StatsReport;

/// GET /api/v1/stats/{symbol}
pub async fn stats(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StatsReport>, PredictionError> {
    let report = state.service.stats(&symbol).await?;
    Ok(Json(report))
}
