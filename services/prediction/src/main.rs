//! Prediction service entry point

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::{Arg, Command};
use dashboard_common::{
    HttpQuoteFeed, InMemoryMarketStore, MinIntervalThrottle, QuoteFeed, SystemClock,
};
use prediction_service::config::ServiceConfig;
use prediction_service::seed::seed_store;
use prediction_service::server::{start_server, AppState};
use prediction_service::service::PredictionService;
use rand::Rng;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "prediction_service=info,dashboard_common=info,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("prediction-service")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Next-day stock price prediction API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("prediction.toml"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("prediction.toml");
    let config = match ServiceConfig::from_file(config_path) {
        Ok(config) => {
            info!("loaded configuration from {config_path}");
            config
        }
        Err(e) => {
            warn!("could not load {config_path} ({e}), using defaults");
            ServiceConfig::default()
        }
    };

    let clock = Arc::new(SystemClock);
    let store = Arc::new(InMemoryMarketStore::new());
    if config.data.seed_on_start {
        let today = Utc::now().date_naive();
        seed_store(
            &store,
            &config.data.symbols,
            today,
            rand::thread_rng().r#gen(),
        );
    }

    let service = Arc::new(PredictionService::new(
        Arc::clone(&store) as Arc<dyn dashboard_common::MarketStore>,
        Arc::clone(&clock) as Arc<dyn dashboard_common::Clock>,
        &config,
    ));

    let quotes: Option<Arc<dyn QuoteFeed>> =
        if config.quotes.enabled && !config.quotes.api_key.is_empty() {
            info!("live quote feed enabled via {}", config.quotes.base_url);
            Some(Arc::new(HttpQuoteFeed::new(
                &config.quotes.base_url,
                &config.quotes.api_key,
            )))
        } else {
            None
        };
    let quote_throttle = Arc::new(MinIntervalThrottle::new(
        chrono::Duration::milliseconds(config.quotes.min_interval_ms),
        clock,
    ));

    let state = AppState {
        service,
        quotes,
        quote_throttle,
        start_time: Instant::now(),
    };

    if let Err(e) = start_server(&config, state).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
