//! Provider traits and structured error types.
//!
//! The three fetch surfaces (prices, fundamentals snapshot, news feed)
//! are traits so the TUI, the CLI, and tests can swap implementations.
//! The memo cache sits above these traits; providers don't know about it.

use thiserror::Error;

use crate::domain::PriceBar;
use crate::news::Headline;

/// Structured errors for data operations, displayable in CLI and TUI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("feed error: {0}")]
    FeedError(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Daily OHLCV price history for a ticker.
///
/// An unknown ticker yields an empty vec, not an error; callers must
/// handle short or empty series.
pub trait PriceProvider {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PriceBar>, DataError>;
}

/// Raw fundamentals snapshot for a ticker.
///
/// Keys are provider-defined and loosely typed; the normalizer in
/// [`crate::fundamentals`] owns the coercion. An unknown ticker yields an
/// empty object.
pub trait FundamentalsProvider {
    fn fetch_fundamentals(&self, ticker: &str) -> Result<serde_json::Value, DataError>;
}

/// Recent headlines for a ticker. An empty list is a valid response.
pub trait NewsProvider {
    fn fetch_news(&self, ticker: &str) -> Result<Vec<Headline>, DataError>;
}
