//! Keyboard input dispatch — overlay first, then global keys, then the
//! active panel's handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use stockscope_core::fundamentals::Metric;

use crate::app::{AppState, Overlay, Panel};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::TickerEntry {
        handle_ticker_overlay(app, key);
        return;
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Metrics; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::News; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('t') => {
            app.ticker_input.clear();
            app.overlay = Overlay::TickerEntry;
            return;
        }
        KeyCode::Enter => {
            app.request_analysis();
            return;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_window(true);
            return;
        }
        KeyCode::Char('-') => {
            app.adjust_window(false);
            return;
        }
        KeyCode::Char('r') => {
            app.config.show_rsi = !app.config.show_rsi;
            app.request_analysis();
            return;
        }
        KeyCode::Char('m') => {
            app.config.show_macd = !app.config.show_macd;
            app.request_analysis();
            return;
        }
        KeyCode::Char('C') => {
            let _ = app.worker_tx.send(WorkerCommand::ClearCache);
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Chart => handle_chart_key(app, key),
        Panel::Metrics => handle_metrics_key(app, key),
        Panel::News => handle_news_key(app, key),
        Panel::Help => {} // display only
    }
}

fn handle_ticker_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.ticker_input.clear();
        }
        KeyCode::Enter => {
            let symbol = app.ticker_input.trim().to_uppercase();
            if !symbol.is_empty() {
                app.config.ticker = symbol;
                app.news_scroll = 0;
                app.request_analysis();
            }
            app.ticker_input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.ticker_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == '.' || c == '-' => {
            app.ticker_input.push(c);
        }
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') => app.toggle_ema(20),
        KeyCode::Char('i') => app.toggle_ema(50),
        KeyCode::Char('o') => app.toggle_ema(200),
        _ => {}
    }
}

fn handle_metrics_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.metrics_cursor + 1 < Metric::ALL.len() {
                app.metrics_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.metrics_cursor = app.metrics_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            app.toggle_selected_metric();
        }
        _ => {}
    }
}

fn handle_news_key(app: &mut AppState, key: KeyEvent) {
    let item_count = app
        .snapshot
        .as_ref()
        .and_then(|s| s.news.as_ref())
        .map_or(0, |n| n.items.len());

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.news_scroll + 1 < item_count {
                app.news_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.news_scroll = app.news_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
