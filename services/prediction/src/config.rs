//! Configuration for the prediction service

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL_MINUTES;
use crate::model::TrainingConfig;
use crate::seed::DEFAULT_COMPANIES;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub training: TrainingConfig,
    pub data: DataConfig,
    pub quotes: QuoteFeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Calendar days of history loaded for training
    pub history_days: i64,
    /// Calendar days of history loaded for summary statistics
    pub stats_days: i64,
    /// Symbols seeded into the in-memory store at startup
    pub symbols: Vec<String>,
    pub seed_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteFeedConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: String,
    /// Minimum spacing between upstream quote requests
    pub min_interval_ms: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8090,
                request_timeout_seconds: 60,
            },
            cache: CacheConfig {
                ttl_minutes: DEFAULT_TTL_MINUTES,
            },
            training: TrainingConfig::default(),
            data: DataConfig {
                history_days: 730,
                stats_days: 365,
                symbols: DEFAULT_COMPANIES
                    .iter()
                    .map(|(symbol, _)| (*symbol).to_string())
                    .collect(),
                seed_on_start: true,
            },
            quotes: QuoteFeedConfig {
                enabled: false,
                base_url: "https://finnhub.io/api/v1".to_string(),
                api_key: String::new(),
                min_interval_ms: 1_000,
            },
        }
    }
}

impl ServiceConfig {
    /// Load from a TOML file, with `PREDICTION_*` environment variables
    /// layered on top.
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("PREDICTION").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
