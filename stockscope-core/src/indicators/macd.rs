//! Moving Average Convergence Divergence (MACD) columns.
//!
//! MACD = EMA(close, 12) - EMA(close, 26); Signal = EMA(MACD, 9).
//! Same first-value seeding as [`super::ema`], so both columns are
//! defined from row 0.

use super::ema::ema_series;
use crate::domain::PriceSeries;

/// Column name for the MACD line.
pub const MACD_COLUMN: &str = "MACD";

/// Column name for the signal line.
pub const SIGNAL_COLUMN: &str = "Signal";

const SHORT_SPAN: usize = 12;
const LONG_SPAN: usize = 26;
const SIGNAL_SPAN: usize = 9;

/// Add the `MACD` and `Signal` columns.
pub fn add_macd(series: &mut PriceSeries) {
    let closes = series.closes();
    let short = ema_series(&closes, SHORT_SPAN);
    let long = ema_series(&closes, LONG_SPAN);
    let macd: Vec<f64> = short.iter().zip(&long).map(|(s, l)| s - l).collect();
    let signal = ema_series(&macd, SIGNAL_SPAN);
    series.insert_column(MACD_COLUMN, macd);
    series.insert_column(SIGNAL_COLUMN, signal);
}
