//! Next-day stock price prediction service
//!
//! Each request runs the full pipeline: result cache check, price history
//! load, feature engineering, on-the-fly training of a small regression
//! network, then a forecast with a heuristic confidence band. Results are
//! cached per symbol for a short TTL because training dominates latency.

pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod indicators;
pub mod model;
pub mod predictor;
pub mod seed;
pub mod server;
pub mod service;
pub mod stats;

pub use cache::PredictionCache;
pub use config::ServiceConfig;
pub use error::{ErrorResponse, PredictionError};
pub use features::{build_training_set, NormalizationStats, TrainingSet};
pub use model::{train, TrainedModel, TrainingConfig};
pub use predictor::{predict_next_close, PredictionResult};
pub use server::{build_router, start_server, AppState};
pub use service::PredictionService;
pub use stats::{StatsReport, SymbolStats};
