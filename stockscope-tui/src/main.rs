//! StockScope TUI — four-panel terminal dashboard for a single ticker.
//!
//! Panels:
//! 1. Chart — candlesticks with EMA overlays, optional RSI/MACD sub-panels
//! 2. Metrics — fundamentals table with show/hide selection
//! 3. News — sentiment-ranked headlines with the aggregate score
//! 4. Help — keyboard shortcuts

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stockscope_core::DashboardConfig;

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "stockscope.toml";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = load_config(Path::new(CONFIG_FILE));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    let mut app = AppState::new(config, cmd_tx.clone(), resp_rx);
    app.request_analysis();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn load_config(path: &Path) -> DashboardConfig {
    if !path.exists() {
        return DashboardConfig::default();
    }
    match DashboardConfig::from_toml_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: ignoring {}: {e}", path.display());
            DashboardConfig::default()
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Snapshot(snapshot) => {
            app.news_scroll = 0;
            match snapshot.series.last_date() {
                Some(date) => app.set_status(format!(
                    "{}: {} bars through {date}",
                    snapshot.config.ticker,
                    snapshot.series.len()
                )),
                None => {
                    app.set_warning(format!("{}: no price history", snapshot.config.ticker))
                }
            }
            app.snapshot = Some(*snapshot);
            app.analysis_finished();
        }
        WorkerResponse::AnalyzeFailed { ticker, message } => {
            app.push_error(message, ticker);
            app.analysis_finished();
        }
        WorkerResponse::CacheCleared => {
            app.set_status("Cache cleared; next analysis re-fetches");
        }
    }
}
