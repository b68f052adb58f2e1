//! Style tokens for the dashboard.
//!
//! Dark terminal palette with a cyan accent. Sentiment and candle colors
//! follow the Chinese-market convention: red marks positive/up, green
//! marks negative/down.

use ratatui::style::{Color, Modifier, Style};

use stockscope_core::news::Sentiment;

pub const ACCENT: Color = Color::Cyan;
pub const POSITIVE: Color = Color::Red;
pub const NEGATIVE: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const NEUTRAL: Color = Color::Gray;
pub const MUTED: Color = Color::DarkGray;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Color for a classified headline.
pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => POSITIVE,
        Sentiment::Negative => NEGATIVE,
        Sentiment::Neutral => NEUTRAL,
    }
}

/// Candle body/wick color: up bars red, down bars green.
pub fn candle_color(up: bool) -> Color {
    if up {
        POSITIVE
    } else {
        NEGATIVE
    }
}

/// Line colors for EMA overlays, cycled by trace index.
pub fn overlay_color(index: usize) -> Color {
    const CYCLE: [Color; 4] = [Color::Yellow, Color::Magenta, Color::Blue, Color::Cyan];
    CYCLE[index % CYCLE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_colors_follow_red_up_convention() {
        assert_eq!(sentiment_color(Sentiment::Positive), Color::Red);
        assert_eq!(sentiment_color(Sentiment::Negative), Color::Green);
        assert_eq!(sentiment_color(Sentiment::Neutral), Color::Gray);
    }

    #[test]
    fn candle_colors_match_sentiment_convention() {
        assert_eq!(candle_color(true), Color::Red);
        assert_eq!(candle_color(false), Color::Green);
    }
}
