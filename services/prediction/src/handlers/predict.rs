//! Prediction endpoint

use axum::extract::{Path, State};
use axum::Json;

use crate::error::PredictionError;
use crate::predictor::PredictionResult;
use crate::server::AppState;

/// GET /api/v1/predict/{symbol}
pub async fn predict(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PredictionResult>, PredictionError> {
    let result = state.service.predict(&symbol).await?;
    Ok(Json(result))
}
