//! Relative Strength Index (RSI) column.
//!
//! Uses simple rolling means of gains and losses over the window:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! The first `window` rows are NaN (insufficient history).
//! Division convention: avg_loss == 0 with avg_gain > 0 -> 100;
//! both averages zero (flat window) -> 50; avg_gain == 0 -> 0.

use crate::domain::PriceSeries;

/// Column name for the RSI series.
pub const RSI_COLUMN: &str = "RSI";

/// Default lookback window.
pub const RSI_WINDOW: usize = 14;

/// Add the `RSI` column computed over `window` close-to-close deltas.
pub fn add_rsi(series: &mut PriceSeries, window: usize) {
    assert!(window >= 1, "RSI window must be >= 1");
    let closes = series.closes();
    series.insert_column(RSI_COLUMN, rsi_series(&closes, window));
}

fn rsi_series(closes: &[f64], window: usize) -> Vec<f64> {
    let n = closes.len();
    let mut out = vec![f64::NAN; n];
    if n < window + 1 {
        return out;
    }

    // Deltas: gain[i] / loss[i] derived from close[i] - close[i-1].
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta.is_nan() {
            continue;
        }
        gains[i] = if delta > 0.0 { delta } else { 0.0 };
        losses[i] = if delta < 0.0 { -delta } else { 0.0 };
    }

    // Simple rolling means over the last `window` deltas.
    for i in window..n {
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        let mut defined = true;
        for j in (i - window + 1)..=i {
            if gains[j].is_nan() || losses[j].is_nan() {
                defined = false;
                break;
            }
            gain_sum += gains[j];
            loss_sum += losses[j];
        }
        if !defined {
            continue;
        }
        let avg_gain = gain_sum / window as f64;
        let avg_loss = loss_sum / window as f64;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // flat window, no movement either way
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series};
    use proptest::prelude::*;

    #[test]
    fn rsi_all_gains_is_100() {
        let mut series = make_series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        add_rsi(&mut series, 3);
        let rsi = series.column(RSI_COLUMN).unwrap();
        assert_approx(rsi[3], 100.0, 1e-9);
        assert_approx(rsi[5], 100.0, 1e-9);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let mut series = make_series(&[105.0, 104.0, 103.0, 102.0, 101.0]);
        add_rsi(&mut series, 3);
        let rsi = series.column(RSI_COLUMN).unwrap();
        assert_approx(rsi[3], 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_window_is_50() {
        let mut series = make_series(&[10.0; 20]);
        add_rsi(&mut series, RSI_WINDOW);
        let rsi = series.column(RSI_COLUMN).unwrap();
        for &v in &rsi[RSI_WINDOW..] {
            assert_approx(v, 50.0, 1e-9);
        }
    }

    #[test]
    fn rsi_first_window_rows_undefined() {
        let mut series = make_series(&[44.0, 44.34, 44.09, 43.61, 44.33, 44.83]);
        add_rsi(&mut series, 3);
        let rsi = series.column(RSI_COLUMN).unwrap();
        assert!(rsi[0].is_nan());
        assert!(rsi[1].is_nan());
        assert!(rsi[2].is_nan());
        assert!(!rsi[3].is_nan());
    }

    #[test]
    fn rsi_known_value() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Deltas: +0.34, -0.25, -0.48, +0.72
        // Window 3 at index 3: gains mean = 0.34/3, losses mean = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73)
        let mut series = make_series(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        add_rsi(&mut series, 3);
        let rsi = series.column(RSI_COLUMN).unwrap();
        let expected = 100.0 - 100.0 / (1.0 + 0.34 / 0.73);
        assert_approx(rsi[3], expected, 1e-9);
    }

    #[test]
    fn rsi_short_series_is_all_nan() {
        let mut series = make_series(&[100.0, 101.0]);
        add_rsi(&mut series, RSI_WINDOW);
        let rsi = series.column(RSI_COLUMN).unwrap();
        assert!(rsi.iter().all(|v| v.is_nan()));
    }

    proptest! {
        #[test]
        fn rsi_defined_values_within_bounds(
            closes in proptest::collection::vec(1.0f64..1000.0, 2..80),
            window in 1usize..20,
        ) {
            let mut series = make_series(&closes);
            add_rsi(&mut series, window);
            let rsi = series.column(RSI_COLUMN).unwrap();
            prop_assert_eq!(rsi.len(), closes.len());
            for (i, &v) in rsi.iter().enumerate() {
                if i < window || i >= closes.len() {
                    continue;
                }
                prop_assert!(v.is_nan() || (0.0..=100.0).contains(&v),
                    "RSI out of bounds at row {}: {}", i, v);
            }
            for &v in rsi.iter().take(window.min(closes.len())) {
                prop_assert!(v.is_nan());
            }
        }
    }
}
