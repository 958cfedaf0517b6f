//! HTTP server wiring

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use dashboard_common::{MinIntervalThrottle, QuoteFeed};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::handlers;
use crate::service::PredictionService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub quotes: Option<Arc<dyn QuoteFeed>>,
    pub quote_throttle: Arc<MinIntervalThrottle>,
    pub start_time: Instant,
}

/// Assemble the router with tracing, CORS, compression and a request
/// timeout.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/predict/:symbol", get(handlers::predict::predict))
        .route("/api/v1/stats/:symbol", get(handlers::stats::stats))
        .route("/api/v1/quote/:symbol", get(handlers::quote::quote))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: &ServiceConfig, state: AppState) -> Result<()> {
    let addr: SocketAddr = config.server_address().parse()?;
    let app = build_router(
        state,
        Duration::from_secs(config.server.request_timeout_seconds),
    );

    info!("prediction service listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
