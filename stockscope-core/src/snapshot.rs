//! One full analysis pass: fetch, derive, window, rank, compose.
//!
//! `analyze` is the single entry point shared by the TUI worker and the
//! CLI. Only a price-history failure aborts the pass; fundamentals and
//! news degrade to their empty states so a broken feed never blanks the
//! chart.

use crate::chart::{self, ChartLayout};
use crate::config::DashboardConfig;
use crate::data::{CachedFetcher, DataError, FundamentalsProvider, NewsProvider, PriceProvider};
use crate::domain::PriceSeries;
use crate::fundamentals::{self, FundamentalMetrics};
use crate::indicators::{add_ema, add_macd, add_rsi, RSI_WINDOW};
use crate::news::{rank_news, RankedNews};
use crate::sentiment::SentimentScorer;

/// Everything one analysis pass produces, ready for display.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// The normalized config the pass ran under.
    pub config: DashboardConfig,
    /// Windowed series with indicator columns attached.
    pub series: PriceSeries,
    pub layout: ChartLayout,
    pub metrics: FundamentalMetrics,
    /// `None` when the feed returned no headlines.
    pub news: Option<RankedNews>,
}

/// Run one analysis pass for `config`.
///
/// EMAs are computed over the full fetched history before windowing, so
/// the visible overlay does not depend on where the window starts. RSI
/// and MACD are computed on the windowed series.
pub fn analyze<P, F, N>(
    config: &DashboardConfig,
    fetcher: &mut CachedFetcher<P, F, N>,
    scorer: &dyn SentimentScorer,
) -> Result<DashboardSnapshot, DataError>
where
    P: PriceProvider,
    F: FundamentalsProvider,
    N: NewsProvider,
{
    let mut config = config.clone();
    config.normalize();

    let bars = fetcher.prices(&config.ticker)?;
    let mut full = PriceSeries::new(config.ticker.clone(), bars);
    add_ema(&mut full, &config.ema_periods);

    let mut series = full.tail(config.window_days as usize);
    if config.show_rsi {
        add_rsi(&mut series, RSI_WINDOW);
    }
    if config.show_macd {
        add_macd(&mut series);
    }

    let layout = chart::compose(&series, &config);

    let metrics = match fetcher.fundamentals(&config.ticker) {
        Ok(raw) => fundamentals::normalize(&raw),
        Err(_) => fundamentals::normalize(&serde_json::Value::Null),
    };

    let news = match fetcher.news(&config.ticker) {
        Ok(headlines) => rank_news(headlines, scorer),
        Err(_) => None,
    };

    Ok(DashboardSnapshot {
        config,
        series,
        layout,
        metrics,
        news,
    })
}
