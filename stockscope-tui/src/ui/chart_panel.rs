//! Panel 1 — Chart: stacked price/RSI/MACD panes.
//!
//! Rendering uses direct buffer writes:
//! - Each candle = 1 terminal column; body block char, wick vertical bars
//! - Indicator overlays and sub-panel traces drawn as dot series
//! - Sub-panels split the area in proportion to the layout's pixel heights

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Widget};
use ratatui::Frame;

use stockscope_core::chart::{Panel as LayoutPanel, PanelKind, TraceKind};
use stockscope_core::domain::PriceBar;
use stockscope_core::DashboardSnapshot;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        let hint = if app.analyzing {
            "Analyzing..."
        } else {
            "No data yet. Press Enter to analyze, t to change ticker."
        };
        f.render_widget(Paragraph::new(Span::styled(hint, theme::muted())), area);
        return;
    };

    if snapshot.series.is_empty() {
        let msg = format!(
            "No price history for {}. Check the ticker symbol (t).",
            snapshot.config.ticker
        );
        f.render_widget(Paragraph::new(Span::styled(msg, theme::warning())), area);
        return;
    }

    // Split vertically in proportion to the layout's panel heights.
    let constraints: Vec<Constraint> = snapshot
        .layout
        .panels
        .iter()
        .map(|p| Constraint::Ratio(p.height, snapshot.layout.total_height))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (panel, chunk) in snapshot.layout.panels.iter().zip(chunks.iter()) {
        match panel.kind {
            PanelKind::Price => {
                f.render_widget(CandlePane::new(snapshot, panel), *chunk);
            }
            PanelKind::Rsi | PanelKind::Macd => {
                f.render_widget(LinePane::new(snapshot, panel), *chunk);
            }
        }
    }
}

/// Map a value to a row in the plot area (0 = top).
fn value_to_y(value: f64, y_min: f64, y_max: f64, plot_height: u16) -> Option<u16> {
    if !value.is_finite() || (y_max - y_min).abs() < 1e-12 || plot_height == 0 {
        return None;
    }
    let frac = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    let y = (plot_height.saturating_sub(1)) as f64 * (1.0 - frac);
    Some(y.round() as u16)
}

/// Left margin reserved for y-axis labels.
const LABEL_WIDTH: u16 = 9;

fn draw_axis_labels(buf: &mut Buffer, inner: Rect, y_min: f64, y_max: f64, plot_height: u16) {
    let labels = [y_max, (y_max + y_min) / 2.0, y_min];
    let rows = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
    for (value, row) in labels.iter().zip(rows.iter()) {
        let y = inner.y + row;
        if y < inner.y + inner.height {
            buf.set_string(
                inner.x,
                y,
                format!("{value:>8.2}"),
                Style::default().fg(theme::MUTED),
            );
        }
    }
}

/// The candlestick pane with EMA overlays.
struct CandlePane<'a> {
    bars: &'a [PriceBar],
    y_range: (f64, f64),
    /// (name, values, color) per line trace, aligned with `bars`.
    overlays: Vec<(&'a str, &'a [f64], Color)>,
    title: String,
}

impl<'a> CandlePane<'a> {
    fn new(snapshot: &'a DashboardSnapshot, panel: &'a LayoutPanel) -> Self {
        let mut overlays = Vec::new();
        for trace in &panel.traces {
            if trace.kind != TraceKind::Line {
                continue;
            }
            if let Some(column) = trace.column.as_deref() {
                if let Some(values) = snapshot.series.column(column) {
                    let color = theme::overlay_color(overlays.len());
                    overlays.push((trace.name.as_str(), values, color));
                }
            }
        }

        let title = format!(
            "{} | {} bars | {} days",
            snapshot.config.ticker,
            snapshot.series.len(),
            snapshot.config.window_days
        );

        Self {
            bars: &snapshot.series.bars,
            y_range: panel.y_range,
            overlays,
            title,
        }
    }
}

impl Widget for CandlePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (y_min, y_max) = self.y_range;
        let plot_left = area.x + LABEL_WIDTH;
        let plot_width = area.width.saturating_sub(LABEL_WIDTH);
        // Top row carries the title/legend.
        let plot_top = area.y + 1;
        let plot_height = area.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        // Title plus an overlay legend.
        buf.set_string(area.x, area.y, &self.title, theme::accent());
        let mut legend_x = area.x + self.title.len() as u16 + 2;
        for (name, _, color) in &self.overlays {
            let tag = format!("·{name}");
            if legend_x + tag.len() as u16 >= area.right() {
                break;
            }
            buf.set_string(legend_x, area.y, &tag, Style::default().fg(*color));
            legend_x += tag.len() as u16 + 1;
        }

        let label_area = Rect::new(area.x, plot_top, LABEL_WIDTH, plot_height);
        draw_axis_labels(buf, label_area, y_min, y_max, plot_height);

        // Show the most recent bars that fit.
        let visible = self.bars.len().min(plot_width as usize);
        let start = self.bars.len() - visible;

        for (i, bar) in self.bars[start..].iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= area.right() {
                break;
            }

            let up = bar.close >= bar.open;
            let style = Style::default().fg(theme::candle_color(up));

            let high_y = value_to_y(bar.high, y_min, y_max, plot_height);
            let low_y = value_to_y(bar.low, y_min, y_max, plot_height);
            let body_top = value_to_y(bar.open.max(bar.close), y_min, y_max, plot_height);
            let body_bot = value_to_y(bar.open.min(bar.close), y_min, y_max, plot_height);
            let (Some(high_y), Some(low_y), Some(body_top), Some(body_bot)) =
                (high_y, low_y, body_top, body_bot)
            else {
                continue;
            };

            for y in high_y..body_top {
                buf.set_string(x, plot_top + y, "|", style);
            }
            let body_char = if up { "\u{2588}" } else { "\u{2593}" };
            for y in body_top..=body_bot {
                buf.set_string(x, plot_top + y, body_char, style);
            }
            for y in (body_bot + 1)..=low_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
        }

        // EMA overlays as dots on top of the candles.
        for (_, values, color) in &self.overlays {
            let style = Style::default().fg(*color);
            for (i, &value) in values[start..].iter().enumerate() {
                let x = plot_left + i as u16;
                if x >= area.right() {
                    break;
                }
                if let Some(y) = value_to_y(value, y_min, y_max, plot_height) {
                    buf.set_string(x, plot_top + y, "·", style);
                }
            }
        }
    }
}

/// A line sub-panel (RSI or MACD) drawn from series columns.
struct LinePane<'a> {
    traces: Vec<(&'a str, &'a [f64], Color)>,
    y_range: (f64, f64),
    title: &'static str,
    bar_count: usize,
    /// Draw a zero reference line (MACD).
    zero_line: bool,
}

impl<'a> LinePane<'a> {
    fn new(snapshot: &'a DashboardSnapshot, panel: &'a LayoutPanel) -> Self {
        let mut traces = Vec::new();
        for trace in &panel.traces {
            if let Some(column) = trace.column.as_deref() {
                if let Some(values) = snapshot.series.column(column) {
                    let color = theme::overlay_color(traces.len());
                    traces.push((trace.name.as_str(), values, color));
                }
            }
        }
        Self {
            traces,
            y_range: panel.y_range,
            title: panel.title,
            bar_count: snapshot.series.len(),
            zero_line: panel.kind == PanelKind::Macd,
        }
    }
}

impl Widget for LinePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (y_min, y_max) = self.y_range;
        let plot_left = area.x + LABEL_WIDTH;
        let plot_width = area.width.saturating_sub(LABEL_WIDTH);
        let plot_top = area.y + 1;
        let plot_height = area.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        // Title with a per-trace legend.
        let mut header = String::from(self.title);
        for (name, _, _) in &self.traces {
            header.push_str("  ·");
            header.push_str(name);
        }
        buf.set_string(area.x, area.y, &header, theme::accent());

        let label_area = Rect::new(area.x, plot_top, LABEL_WIDTH, plot_height);
        draw_axis_labels(buf, label_area, y_min, y_max, plot_height);

        if self.zero_line {
            if let Some(y) = value_to_y(0.0, y_min, y_max, plot_height) {
                for x in plot_left..area.right() {
                    buf.set_string(x, plot_top + y, "-", theme::muted());
                }
            }
        }

        let visible = self.bar_count.min(plot_width as usize);
        let start = self.bar_count - visible;

        for (_, values, color) in &self.traces {
            let style = Style::default().fg(*color);
            for (i, &value) in values[start..].iter().enumerate() {
                let x = plot_left + i as u16;
                if x >= area.right() {
                    break;
                }
                if let Some(y) = value_to_y(value, y_min, y_max, plot_height) {
                    buf.set_string(x, plot_top + y, "·", style);
                }
            }
        }
    }
}
