//! Chart composer: turns a windowed series and the config into a
//! backend-agnostic layout description.
//!
//! The layout carries panel kinds, trace names, axis ranges, and pixel
//! heights; any rendering backend (the TUI, a plotting library) can
//! consume it. The composer holds no state and performs no I/O.

use crate::config::DashboardConfig;
use crate::domain::PriceSeries;
use crate::indicators::{ema_column, MACD_COLUMN, RSI_COLUMN, SIGNAL_COLUMN};

/// Height of the price panel.
pub const BASE_HEIGHT: u32 = 400;

/// Height added per optional panel.
pub const OPTIONAL_PANEL_HEIGHT: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Price,
    Rsi,
    Macd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Drawn from the series' OHLC bars.
    Candlestick,
    /// Drawn from a named series column.
    Line,
}

/// One trace within a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    /// Column in the [`PriceSeries`] for line traces; `None` for candles.
    pub column: Option<String>,
}

/// One vertically stacked panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: &'static str,
    /// (lower, upper) y-axis bounds.
    pub y_range: (f64, f64),
    pub height: u32,
    pub traces: Vec<Trace>,
}

/// The full stacked layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub panels: Vec<Panel>,
    pub total_height: u32,
}

/// Assemble the layout for a windowed series under the given config.
pub fn compose(series: &PriceSeries, config: &DashboardConfig) -> ChartLayout {
    let mut panels = vec![price_panel(series, config)];

    if config.show_rsi {
        panels.push(Panel {
            kind: PanelKind::Rsi,
            title: "RSI",
            y_range: (0.0, 100.0),
            height: OPTIONAL_PANEL_HEIGHT,
            traces: vec![line_trace(RSI_COLUMN)],
        });
    }

    if config.show_macd {
        panels.push(Panel {
            kind: PanelKind::Macd,
            title: "MACD",
            y_range: macd_range(series),
            height: OPTIONAL_PANEL_HEIGHT,
            traces: vec![line_trace(MACD_COLUMN), line_trace(SIGNAL_COLUMN)],
        });
    }

    let total_height = BASE_HEIGHT + OPTIONAL_PANEL_HEIGHT * config.optional_panel_count();
    ChartLayout {
        panels,
        total_height,
    }
}

fn price_panel(series: &PriceSeries, config: &DashboardConfig) -> Panel {
    let mut traces = vec![Trace {
        name: "Candlesticks".to_string(),
        kind: TraceKind::Candlestick,
        column: None,
    }];
    for &period in &config.ema_periods {
        let column = ema_column(period);
        if series.column(&column).is_some() {
            traces.push(line_trace_owned(column));
        }
    }

    Panel {
        kind: PanelKind::Price,
        title: "Price",
        y_range: price_range(series),
        height: BASE_HEIGHT,
        traces,
    }
}

fn line_trace(column: &str) -> Trace {
    line_trace_owned(column.to_string())
}

fn line_trace_owned(column: String) -> Trace {
    Trace {
        name: column.clone(),
        kind: TraceKind::Line,
        column: Some(column),
    }
}

/// Price axis: [min(close) * 0.95, max(close) * 1.05] over the window.
fn price_range(series: &PriceSeries) -> (f64, f64) {
    let (min, max) = finite_min_max(series.closes().iter().copied());
    match (min, max) {
        (Some(lo), Some(hi)) => (lo * 0.95, hi * 1.05),
        _ => (0.0, 1.0),
    }
}

/// MACD axis: min/max across MACD and Signal, expanded 5% away from zero.
fn macd_range(series: &PriceSeries) -> (f64, f64) {
    let values = series
        .column(MACD_COLUMN)
        .into_iter()
        .chain(series.column(SIGNAL_COLUMN))
        .flatten()
        .copied();
    let (min, max) = finite_min_max(values);
    match (min, max) {
        (Some(lo), Some(hi)) => expand_away_from_zero(lo, hi),
        _ => (-1.0, 1.0),
    }
}

/// Expand both bounds 5% outward from zero, so a negative lower bound
/// grows downward instead of shrinking toward zero.
pub fn expand_away_from_zero(lo: f64, hi: f64) -> (f64, f64) {
    (lo - lo.abs() * 0.05, hi + hi.abs() * 0.05)
}

fn finite_min_max(values: impl Iterator<Item = f64>) -> (Option<f64>, Option<f64>) {
    let mut min = None;
    let mut max = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = Some(min.map_or(v, |m: f64| m.min(v)));
        max = Some(max.map_or(v, |m: f64| m.max(v)));
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{add_ema, add_macd, add_rsi, RSI_WINDOW};

    fn series_with_indicators(config: &DashboardConfig) -> PriceSeries {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0).collect();
        let mut series = crate::indicators::make_series(&closes);
        add_ema(&mut series, &config.ema_periods);
        if config.show_rsi {
            add_rsi(&mut series, RSI_WINDOW);
        }
        if config.show_macd {
            add_macd(&mut series);
        }
        series
    }

    #[test]
    fn both_optional_panels_give_three_panels_height_800() {
        let config = DashboardConfig {
            show_rsi: true,
            show_macd: true,
            ..Default::default()
        };
        let layout = compose(&series_with_indicators(&config), &config);
        assert_eq!(layout.panels.len(), 3);
        assert_eq!(layout.total_height, 800);
        assert_eq!(layout.panels[1].kind, PanelKind::Rsi);
        assert_eq!(layout.panels[2].kind, PanelKind::Macd);
    }

    #[test]
    fn no_optional_panels_gives_one_panel_height_400() {
        let config = DashboardConfig::default();
        let layout = compose(&series_with_indicators(&config), &config);
        assert_eq!(layout.panels.len(), 1);
        assert_eq!(layout.total_height, 400);
        assert_eq!(layout.panels[0].kind, PanelKind::Price);
    }

    #[test]
    fn price_panel_has_candles_plus_one_trace_per_ema() {
        let config = DashboardConfig::default();
        let layout = compose(&series_with_indicators(&config), &config);
        let price = &layout.panels[0];
        assert_eq!(price.traces.len(), 1 + config.ema_periods.len());
        assert_eq!(price.traces[0].kind, TraceKind::Candlestick);
    }

    #[test]
    fn price_range_pads_window_extremes() {
        let config = DashboardConfig::default();
        let series = series_with_indicators(&config);
        let (min, max) = finite_min_max(series.closes().into_iter());
        let layout = compose(&series, &config);
        let (lo, hi) = layout.panels[0].y_range;
        assert!((lo - min.unwrap() * 0.95).abs() < 1e-9);
        assert!((hi - max.unwrap() * 1.05).abs() < 1e-9);
    }

    #[test]
    fn rsi_panel_is_fixed_0_to_100() {
        let config = DashboardConfig {
            show_rsi: true,
            ..Default::default()
        };
        let layout = compose(&series_with_indicators(&config), &config);
        assert_eq!(layout.panels[1].y_range, (0.0, 100.0));
    }

    #[test]
    fn expand_away_from_zero_grows_both_signs() {
        let (lo, hi) = expand_away_from_zero(-2.0, 3.0);
        assert!((lo - -2.1).abs() < 1e-12);
        assert!((hi - 3.15).abs() < 1e-12);

        // Entirely negative range still expands outward on both ends.
        let (lo, hi) = expand_away_from_zero(-5.0, -1.0);
        assert!(lo < -5.0);
        assert!(hi > -1.0);

        assert_eq!(expand_away_from_zero(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn empty_series_composes_without_panicking() {
        let config = DashboardConfig {
            show_rsi: true,
            show_macd: true,
            ..Default::default()
        };
        let layout = compose(&PriceSeries::default(), &config);
        assert_eq!(layout.panels.len(), 3);
        assert_eq!(layout.panels[0].y_range, (0.0, 1.0));
        assert_eq!(layout.panels[2].y_range, (-1.0, 1.0));
    }
}
