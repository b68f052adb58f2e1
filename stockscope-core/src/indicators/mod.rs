//! Indicator columns derived from close prices.
//!
//! Each function takes a [`PriceSeries`] and adds named columns aligned to
//! its bars. All are pure over the input closes: no I/O, no provider calls.
//! Empty or too-short input yields all-NaN columns rather than an error.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::{add_ema, ema_column, ema_series};
pub use macd::{add_macd, MACD_COLUMN, SIGNAL_COLUMN};
pub use rsi::{add_rsi, RSI_COLUMN, RSI_WINDOW};

/// Create a series from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first
/// bar), high/low pad by 1.0, volume 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    use crate::domain::{PriceBar, PriceSeries};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect();
    PriceSeries::new("TEST", bars)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
