//! Quote-feed collaborator
//!
//! Consumed as "given a symbol, return a last-quote snapshot or failure".
//! The HTTP implementation targets a Finnhub-style quote endpoint.

use crate::errors::FeedError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Last-quote snapshot for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Ticker symbol the quote belongs to
    pub symbol: String,
    /// Last traded price
    pub current: f64,
    /// Session open
    pub open: f64,
    /// Session high so far
    pub high: f64,
    /// Session low so far
    pub low: f64,
    /// Previous session close
    pub previous_close: f64,
    /// Percent change versus previous close
    pub change_percent: f64,
    /// Upstream quote timestamp (unix seconds)
    pub timestamp: i64,
}

/// Source of last-quote snapshots
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    /// Fetch the most recent quote for `symbol`
    async fn last_quote(&self, symbol: &str) -> Result<QuoteSnapshot, FeedError>;
}

/// Quote feed backed by an HTTP market-data API
#[derive(Debug, Clone)]
pub struct HttpQuoteFeed {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Wire shape of the upstream quote payload
#[derive(Debug, Deserialize)]
struct QuoteDto {
    #[serde(default)]
    c: f64,
    #[serde(default)]
    o: f64,
    #[serde(default)]
    h: f64,
    #[serde(default)]
    l: f64,
    #[serde(default)]
    pc: f64,
    #[serde(default)]
    dp: f64,
    #[serde(default)]
    t: i64,
}

impl HttpQuoteFeed {
    /// Create a feed against `base_url` authenticated with `token`
    #[must_use]
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl QuoteFeed for HttpQuoteFeed {
    async fn last_quote(&self, symbol: &str) -> Result<QuoteSnapshot, FeedError> {
        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url, symbol, self.token
        );
        debug!(symbol, "fetching quote from upstream");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Upstream(format!(
                "quote request for {} returned status {}",
                symbol,
                response.status()
            )));
        }

        let dto: QuoteDto = response.json().await?;
        // A zero or missing last price means the upstream has nothing usable.
        if dto.c == 0.0 {
            warn!(symbol, "upstream returned an empty quote");
            return Err(FeedError::InvalidQuote(symbol.to_string()));
        }

        Ok(QuoteSnapshot {
            symbol: symbol.to_string(),
            current: dto.c,
            open: dto.o,
            high: dto.h,
            low: dto.l,
            previous_close: dto.pc,
            change_percent: dto.dp,
            timestamp: dto.t,
        })
    }
}
