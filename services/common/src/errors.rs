//! Error types shared by the dashboard services

use thiserror::Error;

/// Failures raised by the persistence collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    /// No company is registered under the given symbol
    #[error("symbol {0} not found")]
    SymbolNotFound(String),

    /// The backing store failed
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Failures raised by the quote-feed collaborator
#[derive(Debug, Error)]
pub enum FeedError {
    /// The upstream request failed outright
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream answered but the quote is unusable
    #[error("upstream returned an unusable quote for {0}")]
    InvalidQuote(String),

    /// The local throttle refused the request
    #[error("rate limited, retry in {0} ms")]
    Throttled(i64),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}
