//! Core price types: a daily OHLCV bar and a series with derived columns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one symbol plus derived indicator columns.
///
/// Bars are immutable once fetched. Indicator columns are added by the
/// functions in [`crate::indicators`]; each column is aligned 1:1 with
/// `bars`, with `NaN` marking rows where the value is undefined.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
            columns: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Add (or replace) a derived column. Must match the bar count.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.bars.len(),
            "column length must match bar count"
        );
        self.columns.insert(name.into(), values);
    }

    /// Last `days` bars with the matching tail of every derived column.
    ///
    /// Asking for more bars than exist returns the whole series.
    pub fn tail(&self, days: usize) -> PriceSeries {
        let start = self.bars.len().saturating_sub(days);
        let bars = self.bars[start..].to_vec();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), values[start..].to_vec()))
            .collect();
        Self {
            symbol: self.symbol.clone(),
            bars,
            columns,
        }
    }

    /// Date of the last bar, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
