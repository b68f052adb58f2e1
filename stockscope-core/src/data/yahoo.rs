//! Yahoo Finance clients: v8 chart API (prices), v10 quoteSummary
//! (fundamentals), and the headline RSS feed (news).
//!
//! Yahoo has no official API and is subject to unannounced format
//! changes; parse failures surface as `ResponseFormatChanged` rather
//! than panics. Requests retry with exponential backoff.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::provider::{DataError, FundamentalsProvider, NewsProvider, PriceProvider};
use crate::domain::PriceBar;
use crate::news::Headline;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// quoteSummary modules holding the metrics the normalizer recognizes.
const QUOTE_SUMMARY_MODULES: &str = "summaryDetail,defaultKeyStatistics,financialData";

/// Shared HTTP client for all three Yahoo surfaces.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn chart_url(ticker: &str) -> String {
        // 5y of daily bars: enough history for a 200-day EMA ahead of a
        // 365-day visible window.
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?range=5y&interval=1d"
        )
    }

    fn quote_summary_url(ticker: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{ticker}\
             ?modules={QUOTE_SUMMARY_MODULES}"
        )
    }

    fn rss_url(ticker: &str) -> String {
        format!("https://finance.yahoo.com/rss/headline?s={ticker}")
    }

    /// GET with retry and exponential backoff. 404s come back as
    /// `Ok(None)` so callers can map "unknown ticker" to empty data.
    fn get_with_retry(&self, url: &str) -> Result<Option<reqwest::blocking::Response>, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status} for {url}")));
                        continue;
                    }

                    return Ok(Some(resp));
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

/// Parse the chart API response into bars, skipping non-trading rows.
fn parse_chart_response(resp: ChartResponse) -> Result<Vec<PriceBar>, DataError> {
    let result = match resp.chart.result {
        Some(r) => r,
        None => {
            // Yahoo reports unknown tickers as an error payload; that is
            // empty data, not a failure.
            return match resp.chart.error {
                Some(err) if err.code == "Not Found" => Ok(Vec::new()),
                Some(err) => Err(DataError::ResponseFormatChanged(format!(
                    "{}: {}",
                    err.code, err.description
                ))),
                None => Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                )),
            };
        }
    };

    let data = match result.into_iter().next() {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };

    let timestamps = match data.timestamp {
        Some(t) => t,
        None => return Ok(Vec::new()),
    };

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        // Holiday / non-trading rows carry no quote values at all.
        if open.is_none() && high.is_none() && low.is_none() && close.is_none() {
            continue;
        }

        bars.push(PriceBar {
            date,
            open: open.unwrap_or(f64::NAN),
            high: high.unwrap_or(f64::NAN),
            low: low.unwrap_or(f64::NAN),
            close: close.unwrap_or(f64::NAN),
            volume: volume.unwrap_or(0),
        });
    }

    Ok(bars)
}

/// Flatten quoteSummary modules into one `{field: scalar}` object.
///
/// Yahoo wraps numbers as `{ "raw": 27.45, "fmt": "27.45" }`; the raw
/// value is kept, everything else passes through untouched for the
/// normalizer to coerce.
fn flatten_quote_summary(value: &Value) -> Value {
    let mut flat = Map::new();

    let results = value
        .pointer("/quoteSummary/result")
        .and_then(Value::as_array);

    if let Some(results) = results {
        for module in results.iter().flat_map(|r| r.as_object()).flatten() {
            let (_, fields) = module;
            if let Some(fields) = fields.as_object() {
                for (key, field) in fields {
                    let scalar = match field {
                        Value::Object(obj) => obj.get("raw").cloned().unwrap_or(Value::Null),
                        other => other.clone(),
                    };
                    if !scalar.is_null() {
                        flat.insert(key.clone(), scalar);
                    }
                }
            }
        }
    }

    Value::Object(flat)
}

impl PriceProvider for YahooClient {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PriceBar>, DataError> {
        let resp = match self.get_with_retry(&Self::chart_url(ticker))? {
            Some(resp) => resp,
            None => return Ok(Vec::new()),
        };
        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("chart response for {ticker}: {e}"))
        })?;
        parse_chart_response(chart)
    }
}

impl FundamentalsProvider for YahooClient {
    fn fetch_fundamentals(&self, ticker: &str) -> Result<Value, DataError> {
        let resp = match self.get_with_retry(&Self::quote_summary_url(ticker))? {
            Some(resp) => resp,
            None => return Ok(Value::Object(Map::new())),
        };
        let raw: Value = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("quoteSummary for {ticker}: {e}"))
        })?;
        Ok(flatten_quote_summary(&raw))
    }
}

impl NewsProvider for YahooClient {
    fn fetch_news(&self, ticker: &str) -> Result<Vec<Headline>, DataError> {
        let resp = match self.get_with_retry(&Self::rss_url(ticker))? {
            Some(resp) => resp,
            None => return Ok(Vec::new()),
        };
        let bytes = resp
            .bytes()
            .map_err(|e| DataError::FeedError(format!("reading feed for {ticker}: {e}")))?;

        let channel = rss::Channel::read_from(&bytes[..])
            .map_err(|e| DataError::FeedError(format!("parsing feed for {ticker}: {e}")))?;

        let headlines = channel
            .items()
            .iter()
            .filter_map(|item| {
                let title = item.title()?.trim();
                if title.is_empty() {
                    return None;
                }
                Some(Headline {
                    title: title.to_string(),
                    link: item.link().unwrap_or("").to_string(),
                    published: item.pub_date().unwrap_or("").to_string(),
                })
            })
            .collect();

        Ok(headlines)
    }
}
