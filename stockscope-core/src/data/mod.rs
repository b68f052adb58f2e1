//! Data acquisition: provider traits, the Yahoo client, and the memo cache.

pub mod memo;
pub mod provider;
pub mod yahoo;

pub use memo::{yahoo_fetcher, CachedFetcher, MemoCache, YahooFetcher, DEFAULT_TTL};
pub use provider::{DataError, FundamentalsProvider, NewsProvider, PriceProvider};
pub use yahoo::YahooClient;
