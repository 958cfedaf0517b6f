//! Service error taxonomy and its HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dashboard_common::{FeedError, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Everything that can go wrong while serving a request
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("symbol parameter is required")]
    MissingSymbol,

    #[error("company with symbol {0} not found")]
    SymbolNotFound(String),

    #[error("no price data available for {0}")]
    NoData(String),

    #[error("insufficient historical data for prediction: {bars} bars, need {required}")]
    InsufficientHistory { bars: usize, required: usize },

    #[error("insufficient data for reliable prediction: {rows} usable rows, need {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("model training failed: {0}")]
    TrainingFailed(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("quote upstream failed: {0}")]
    QuoteUpstream(String),

    #[error("quote requests are throttled, retry in {0} ms")]
    QuoteThrottled(i64),

    #[error("quote feed is not configured")]
    QuoteDisabled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl PredictionError {
    /// Status code and machine-readable error code for the JSON body.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingSymbol => (StatusCode::BAD_REQUEST, "MISSING_SYMBOL"),
            Self::SymbolNotFound(_) => (StatusCode::NOT_FOUND, "SYMBOL_NOT_FOUND"),
            Self::NoData(_) => (StatusCode::NOT_FOUND, "NO_DATA"),
            Self::InsufficientHistory { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_HISTORY"),
            Self::InsufficientData { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_DATA"),
            Self::TrainingFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TRAINING_FAILED"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE"),
            Self::QuoteUpstream(_) => (StatusCode::BAD_GATEWAY, "QUOTE_UPSTREAM_FAILED"),
            Self::QuoteThrottled(_) => (StatusCode::TOO_MANY_REQUESTS, "QUOTE_THROTTLED"),
            Self::QuoteDisabled => (StatusCode::SERVICE_UNAVAILABLE, "QUOTE_FEED_DISABLED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<StoreError> for PredictionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
            StoreError::Storage(message) => Self::Storage(message),
        }
    }
}

impl From<FeedError> for PredictionError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Upstream(message) => Self::QuoteUpstream(message),
            FeedError::InvalidQuote(symbol) => {
                Self::QuoteUpstream(format!("no usable quote for {symbol}"))
            }
            FeedError::Throttled(wait_ms) => Self::QuoteThrottled(wait_ms),
        }
    }
}

/// JSON error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("{self}");
        }
        let body = ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
