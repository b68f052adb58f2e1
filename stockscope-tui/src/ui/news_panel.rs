//! Panel 3 — News: ranked headlines with sentiment colors and the
//! aggregate score.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use stockscope_core::news::Sentiment;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        let hint = Paragraph::new(Span::styled(
            "No data yet. Press Enter to analyze.",
            theme::muted(),
        ));
        f.render_widget(hint, area);
        return;
    };

    let Some(news) = &snapshot.news else {
        let msg = format!("No news found for {}.", snapshot.config.ticker);
        f.render_widget(Paragraph::new(Span::styled(msg, theme::warning())), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Aggregate heading, colored like an individual headline would be.
    let aggregate_sentiment = Sentiment::from_compound(news.aggregate_score);
    lines.push(Line::from(vec![
        Span::styled("Aggregate sentiment: ", theme::muted()),
        Span::styled(
            format!("{:+.3} ({})", news.aggregate_score, aggregate_sentiment.label()),
            Style::default()
                .fg(theme::sentiment_color(aggregate_sentiment))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  over {} headlines", news.items.len()),
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "[j/k] scroll",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for (i, item) in news.items.iter().enumerate().skip(app.news_scroll) {
        let color = theme::sentiment_color(item.sentiment);
        let style = if i == app.news_scroll {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:+.3} ", item.compound), style),
            Span::styled(item.headline.title.clone(), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("       "),
            Span::styled(item.headline.published.clone(), theme::muted()),
            Span::raw("  "),
            Span::styled(item.headline.link.clone(), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
