//! Fundamental ratio normalization.
//!
//! Providers hand back a loosely-typed JSON snapshot (numbers, numeric
//! strings, nulls, missing keys). [`normalize`] coerces that into a fixed
//! map of the ten recognized metrics, each either a value rounded to two
//! decimals or an explicit "N/A". It never fails: malformed input degrades
//! per key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The ten recognized fundamental metrics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Metric {
    PeRatio,
    Roe,
    Roa,
    GrossMargin,
    ProfitMargin,
    DebtToEquity,
    CurrentRatio,
    PriceToBook,
    EarningsPerShare,
    DividendYield,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::PeRatio,
        Metric::Roe,
        Metric::Roa,
        Metric::GrossMargin,
        Metric::ProfitMargin,
        Metric::DebtToEquity,
        Metric::CurrentRatio,
        Metric::PriceToBook,
        Metric::EarningsPerShare,
        Metric::DividendYield,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::PeRatio => "P/E Ratio",
            Metric::Roe => "ROE",
            Metric::Roa => "ROA",
            Metric::GrossMargin => "Gross Margin",
            Metric::ProfitMargin => "Profit Margin",
            Metric::DebtToEquity => "Debt to Equity",
            Metric::CurrentRatio => "Current Ratio",
            Metric::PriceToBook => "Price to Book",
            Metric::EarningsPerShare => "Earnings Per Share",
            Metric::DividendYield => "Dividend Yield",
        }
    }

    /// Key in the provider snapshot.
    pub fn field(self) -> &'static str {
        match self {
            Metric::PeRatio => "trailingPE",
            Metric::Roe => "returnOnEquity",
            Metric::Roa => "returnOnAssets",
            Metric::GrossMargin => "grossMargins",
            Metric::ProfitMargin => "profitMargins",
            Metric::DebtToEquity => "debtToEquity",
            Metric::CurrentRatio => "currentRatio",
            Metric::PriceToBook => "priceToBook",
            Metric::EarningsPerShare => "trailingEps",
            Metric::DividendYield => "dividendYield",
        }
    }
}

/// A normalized metric value: rounded number or explicit "not available".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Value(f64),
    NotAvailable,
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Value(v) => write!(f, "{v:.2}"),
            MetricValue::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// All ten metrics, always fully populated.
pub type FundamentalMetrics = BTreeMap<Metric, MetricValue>;

/// Normalize a raw snapshot into the fixed ten-metric map.
pub fn normalize(raw: &Value) -> FundamentalMetrics {
    Metric::ALL
        .iter()
        .map(|&metric| (metric, coerce(raw.get(metric.field()))))
        .collect()
}

fn coerce(raw: Option<&Value>) -> MetricValue {
    match raw {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => MetricValue::Value(round2(v)),
            _ => MetricValue::NotAvailable,
        },
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => MetricValue::Value(round2(v)),
            _ => MetricValue::NotAvailable,
        },
        _ => MetricValue::NotAvailable,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn all_keys_present_for_empty_snapshot() {
        let metrics = normalize(&json!({}));
        assert_eq!(metrics.len(), 10);
        assert!(metrics.values().all(|v| *v == MetricValue::NotAvailable));
    }

    #[test]
    fn numbers_are_rounded_to_two_decimals() {
        let metrics = normalize(&json!({ "trailingPE": 27.4567 }));
        assert_eq!(metrics[&Metric::PeRatio], MetricValue::Value(27.46));
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let metrics = normalize(&json!({ "returnOnEquity": "0.195" }));
        assert_eq!(metrics[&Metric::Roe], MetricValue::Value(0.2));
    }

    #[test]
    fn garbage_degrades_to_not_available() {
        let metrics = normalize(&json!({
            "trailingPE": "not a number",
            "returnOnEquity": null,
            "returnOnAssets": { "nested": true },
            "grossMargins": [1, 2],
        }));
        for m in [
            Metric::PeRatio,
            Metric::Roe,
            Metric::Roa,
            Metric::GrossMargin,
        ] {
            assert_eq!(metrics[&m], MetricValue::NotAvailable);
        }
    }

    #[test]
    fn non_object_snapshot_degrades_everywhere() {
        let metrics = normalize(&json!("oops"));
        assert_eq!(metrics.len(), 10);
        assert!(metrics.values().all(|v| *v == MetricValue::NotAvailable));
    }

    #[test]
    fn display_formats() {
        assert_eq!(MetricValue::Value(1.5).to_string(), "1.50");
        assert_eq!(MetricValue::NotAvailable.to_string(), "N/A");
    }

    proptest! {
        #[test]
        fn output_always_has_exactly_ten_keys(
            entries in proptest::collection::hash_map("[a-zA-Z]{1,16}", -1e6f64..1e6, 0..12)
        ) {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(k, v)| (k, json!(v)))
                .collect();
            let metrics = normalize(&Value::Object(map));
            prop_assert_eq!(metrics.len(), 10);
            for value in metrics.values() {
                if let MetricValue::Value(v) = value {
                    // rounded to two decimals
                    prop_assert!((v * 100.0 - (v * 100.0).round()).abs() < 1e-6);
                }
            }
        }
    }
}
