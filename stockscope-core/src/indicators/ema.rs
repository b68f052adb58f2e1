//! Exponential Moving Average (EMA) columns.
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! with alpha = 2 / (span + 1).
//! Seed: EMA[0] = close[0] (undamped start), so every row is defined.
//! NaN closes produce a NaN row; the recursion resumes from the last
//! defined value.

use crate::domain::PriceSeries;

/// Column name for a given EMA span.
pub fn ema_column(span: usize) -> String {
    format!("EMA_{span}")
}

/// Raw EMA over a value slice.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        if v.is_nan() {
            out.push(f64::NAN);
            continue;
        }
        let ema = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(ema);
        prev = Some(ema);
    }

    out
}

/// Add one `EMA_{span}` column per requested span.
///
/// An empty span set is a no-op.
pub fn add_ema(series: &mut PriceSeries, spans: &[usize]) {
    if spans.is_empty() {
        return;
    }
    let closes = series.closes();
    for &span in spans {
        series.insert_column(ema_column(span), ema_series(&closes, span));
    }
}
