//! In-memory memoization of fetch results.
//!
//! Key = (operation, ticker), value = the fetched result, expiring after
//! a TTL (default 15 minutes) and clearable on demand. The cache is owned
//! by a single thread (the TUI worker or the CLI main), so there is no
//! locking; re-runs within the TTL reuse the cached result instead of
//! hitting the network again.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use super::provider::{DataError, FundamentalsProvider, NewsProvider, PriceProvider};
use super::yahoo::YahooClient;
use crate::domain::PriceBar;
use crate::news::Headline;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Which fetch operation a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchOp {
    Prices,
    Fundamentals,
    News,
}

#[derive(Debug, Clone)]
enum CachedValue {
    Prices(Vec<PriceBar>),
    Fundamentals(Value),
    News(Vec<Headline>),
}

/// TTL-bounded (operation, ticker) -> result store.
#[derive(Debug)]
pub struct MemoCache {
    ttl: Duration,
    entries: HashMap<(FetchOp, String), (Instant, CachedValue)>,
}

impl MemoCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, op: FetchOp, ticker: &str) -> Option<&CachedValue> {
        let (stored_at, value) = self.entries.get(&(op, ticker.to_string()))?;
        if stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(value)
    }

    fn put(&mut self, op: FetchOp, ticker: &str, value: CachedValue) {
        self.entries
            .insert((op, ticker.to_string()), (Instant::now(), value));
    }
}

/// The three providers behind one memo cache.
#[derive(Debug)]
pub struct CachedFetcher<P, F, N> {
    prices: P,
    fundamentals: F,
    news: N,
    cache: MemoCache,
}

impl<P, F, N> CachedFetcher<P, F, N>
where
    P: PriceProvider,
    F: FundamentalsProvider,
    N: NewsProvider,
{
    pub fn new(prices: P, fundamentals: F, news: N) -> Self {
        Self::with_ttl(prices, fundamentals, news, DEFAULT_TTL)
    }

    pub fn with_ttl(prices: P, fundamentals: F, news: N, ttl: Duration) -> Self {
        Self {
            prices,
            fundamentals,
            news,
            cache: MemoCache::new(ttl),
        }
    }

    /// Drop every cached result; the next calls re-fetch.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn prices(&mut self, ticker: &str) -> Result<Vec<PriceBar>, DataError> {
        if let Some(CachedValue::Prices(bars)) = self.cache.get(FetchOp::Prices, ticker) {
            return Ok(bars.clone());
        }
        let bars = self.prices.fetch_prices(ticker)?;
        self.cache
            .put(FetchOp::Prices, ticker, CachedValue::Prices(bars.clone()));
        Ok(bars)
    }

    pub fn fundamentals(&mut self, ticker: &str) -> Result<Value, DataError> {
        if let Some(CachedValue::Fundamentals(snapshot)) =
            self.cache.get(FetchOp::Fundamentals, ticker)
        {
            return Ok(snapshot.clone());
        }
        let snapshot = self.fundamentals.fetch_fundamentals(ticker)?;
        self.cache.put(
            FetchOp::Fundamentals,
            ticker,
            CachedValue::Fundamentals(snapshot.clone()),
        );
        Ok(snapshot)
    }

    pub fn news(&mut self, ticker: &str) -> Result<Vec<Headline>, DataError> {
        if let Some(CachedValue::News(headlines)) = self.cache.get(FetchOp::News, ticker) {
            return Ok(headlines.clone());
        }
        let headlines = self.news.fetch_news(ticker)?;
        self.cache
            .put(FetchOp::News, ticker, CachedValue::News(headlines.clone()));
        Ok(headlines)
    }
}

/// A fetcher over the live Yahoo endpoints with the default TTL.
pub type YahooFetcher = CachedFetcher<YahooClient, YahooClient, YahooClient>;

/// Build the production fetcher.
pub fn yahoo_fetcher() -> YahooFetcher {
    let client = YahooClient::new();
    CachedFetcher::new(client.clone(), client.clone(), client)
}
