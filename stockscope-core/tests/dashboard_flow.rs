//! End-to-end analysis pass over fake providers: flat price history,
//! canned fundamentals, and a small headline feed.

use chrono::NaiveDate;
use serde_json::json;

use stockscope_core::chart::PanelKind;
use stockscope_core::data::{
    CachedFetcher, DataError, FundamentalsProvider, NewsProvider, PriceProvider,
};
use stockscope_core::domain::PriceBar;
use stockscope_core::fundamentals::{Metric, MetricValue};
use stockscope_core::indicators::{MACD_COLUMN, RSI_COLUMN, RSI_WINDOW};
use stockscope_core::news::{Headline, Sentiment};
use stockscope_core::sentiment::SentimentScorer;
use stockscope_core::{analyze, DashboardConfig};

struct FlatPrices;

impl PriceProvider for FlatPrices {
    fn fetch_prices(&self, _ticker: &str) -> Result<Vec<PriceBar>, DataError> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Ok((0..40)
            .map(|i| PriceBar {
                date: start + chrono::Days::new(i),
                open: 50.0,
                high: 50.0,
                low: 50.0,
                close: 50.0,
                volume: 500,
            })
            .collect())
    }
}

struct CannedFundamentals;

impl FundamentalsProvider for CannedFundamentals {
    fn fetch_fundamentals(&self, _ticker: &str) -> Result<serde_json::Value, DataError> {
        Ok(json!({
            "trailingPE": 31.234,
            "returnOnEquity": 0.187,
            "profitMargins": "0.1055",
        }))
    }
}

struct SmallFeed;

impl NewsProvider for SmallFeed {
    fn fetch_news(&self, _ticker: &str) -> Result<Vec<Headline>, DataError> {
        Ok(vec![
            Headline {
                title: "great quarter".into(),
                link: "https://example.com/1".into(),
                published: "2024-02-10T08:00:00Z".into(),
            },
            Headline {
                title: "lawsuit looming".into(),
                link: "https://example.com/2".into(),
                published: "2024-02-11T08:00:00Z".into(),
            },
            Headline {
                title: "nothing notable".into(),
                link: "https://example.com/3".into(),
                published: "2024-02-12T08:00:00Z".into(),
            },
        ])
    }
}

struct WordScorer;

impl SentimentScorer for WordScorer {
    fn compound(&self, text: &str) -> f64 {
        if text.contains("great") {
            0.6
        } else if text.contains("lawsuit") {
            -0.5
        } else {
            0.0
        }
    }
}

fn flat_config() -> DashboardConfig {
    DashboardConfig {
        ticker: "flat".into(),
        window_days: 30,
        show_rsi: true,
        show_macd: true,
        ..Default::default()
    }
}

#[test]
fn flat_history_yields_neutral_indicators() {
    let mut fetcher = CachedFetcher::new(FlatPrices, CannedFundamentals, SmallFeed);
    let snapshot = analyze(&flat_config(), &mut fetcher, &WordScorer).unwrap();

    assert_eq!(snapshot.config.ticker, "FLAT");
    assert_eq!(snapshot.series.len(), 30);

    // RSI of a flat series is 50 wherever it is defined.
    let rsi = snapshot.series.column(RSI_COLUMN).unwrap();
    for &v in &rsi[..RSI_WINDOW] {
        assert!(v.is_nan());
    }
    for &v in &rsi[RSI_WINDOW..] {
        assert!((v - 50.0).abs() < 1e-9);
    }

    // MACD of a flat series is zero everywhere.
    let macd = snapshot.series.column(MACD_COLUMN).unwrap();
    assert!(macd.iter().all(|v| v.abs() < 1e-9));
}

#[test]
fn layout_covers_all_three_panels() {
    let mut fetcher = CachedFetcher::new(FlatPrices, CannedFundamentals, SmallFeed);
    let snapshot = analyze(&flat_config(), &mut fetcher, &WordScorer).unwrap();

    let kinds: Vec<PanelKind> = snapshot.layout.panels.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [PanelKind::Price, PanelKind::Rsi, PanelKind::Macd]);
    assert_eq!(snapshot.layout.total_height, 800);

    // Flat closes: price range is [47.5, 52.5].
    let (lo, hi) = snapshot.layout.panels[0].y_range;
    assert!((lo - 47.5).abs() < 1e-9);
    assert!((hi - 52.5).abs() < 1e-9);
}

#[test]
fn metrics_and_news_flow_through() {
    let mut fetcher = CachedFetcher::new(FlatPrices, CannedFundamentals, SmallFeed);
    let snapshot = analyze(&flat_config(), &mut fetcher, &WordScorer).unwrap();

    assert_eq!(
        snapshot.metrics.get(&Metric::PeRatio),
        Some(&MetricValue::Value(31.23))
    );
    assert_eq!(
        snapshot.metrics.get(&Metric::ProfitMargin),
        Some(&MetricValue::Value(0.11))
    );
    assert_eq!(
        snapshot.metrics.get(&Metric::DividendYield),
        Some(&MetricValue::NotAvailable)
    );

    let news = snapshot.news.as_ref().unwrap();
    assert_eq!(news.items.len(), 3);
    // Sorted by compound descending.
    assert_eq!(news.items[0].sentiment, Sentiment::Positive);
    assert_eq!(news.items[1].sentiment, Sentiment::Neutral);
    assert_eq!(news.items[2].sentiment, Sentiment::Negative);
    assert!((news.aggregate_score - 0.1).abs() < 1e-9);
}
