//! Panel 4 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "t", "Enter a new ticker symbol");
    key(&mut lines, "Enter", "Re-run the analysis");
    key(&mut lines, "+ / -", "Widen / narrow window by 10 days (30-365)");
    key(&mut lines, "r", "Toggle RSI sub-panel");
    key(&mut lines, "m", "Toggle MACD sub-panel");
    key(&mut lines, "C", "Clear the fetch cache");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Chart");
    key(&mut lines, "u / i / o", "Toggle EMA 20 / 50 / 200 overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Metrics");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Space", "Show / hide metric");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — News");
    key(&mut lines, "j / k", "Scroll headlines");
    lines.push(Line::from(""));

    section(&mut lines, "Colors");
    key(&mut lines, "Red", "Positive sentiment / up candle");
    key(&mut lines, "Green", "Negative sentiment / down candle");
    key(&mut lines, "Gray", "Neutral sentiment");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>18}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
