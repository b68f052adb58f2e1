//! Panel 2 — Metrics: the fundamentals table with a selection cursor.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use stockscope_core::fundamentals::{Metric, MetricValue};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Fundamentals  [j/k] move  [Space] show/hide",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for (row, metric) in Metric::ALL.iter().enumerate() {
        let selected = app.config.selected_metrics.contains(metric);
        let at_cursor = row == app.metrics_cursor;

        let marker = if selected { "[x]" } else { "[ ]" };
        let value = app
            .snapshot
            .as_ref()
            .and_then(|s| s.metrics.get(metric).copied())
            .unwrap_or(MetricValue::NotAvailable);

        let label_style = if at_cursor {
            theme::accent_bold()
        } else if selected {
            theme::accent()
        } else {
            theme::muted()
        };
        let value_style = match value {
            MetricValue::NotAvailable => theme::muted(),
            MetricValue::Value(_) if selected => {
                theme::neutral().add_modifier(Modifier::BOLD)
            }
            MetricValue::Value(_) => theme::neutral(),
        };

        let shown = if selected {
            value.to_string()
        } else {
            String::new()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), label_style),
            Span::styled(format!("{:<20}", metric.label()), label_style),
            Span::styled(shown, value_style),
        ]));
    }

    if app.snapshot.is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No data yet. Press Enter to analyze.",
            theme::muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
