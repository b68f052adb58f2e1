//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! at most one analysis is in flight, and edits made while one runs set a
//! dirty flag so exactly one re-run follows.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use stockscope_core::config::{MAX_WINDOW_DAYS, MIN_WINDOW_DAYS};
use stockscope_core::fundamentals::Metric;
use stockscope_core::{DashboardConfig, DashboardSnapshot};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    Metrics,
    News,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Chart => 0,
            Panel::Metrics => 1,
            Panel::News => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chart),
            1 => Some(Panel::Metrics),
            2 => Some(Panel::News),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chart => "Chart",
            Panel::Metrics => "Metrics",
            Panel::News => "News",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the status history.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    TickerEntry,
}

/// Maximum retained error records.
const ERROR_HISTORY_CAP: usize = 50;

/// Day-window step for the +/- keys.
pub const WINDOW_STEP_DAYS: u32 = 10;

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Dashboard
    pub config: DashboardConfig,
    pub snapshot: Option<DashboardSnapshot>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub analyzing: bool,
    /// Config changed while an analysis was in flight.
    pub dirty: bool,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub overlay: Overlay,
    pub ticker_input: String,

    // Per-panel cursors
    pub news_scroll: usize,
    pub metrics_cursor: usize,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            active_panel: Panel::Chart,
            running: true,
            config,
            snapshot: None,
            worker_tx,
            worker_rx,
            analyzing: false,
            dirty: false,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            overlay: Overlay::None,
            ticker_input: String::new(),
            news_scroll: 0,
            metrics_cursor: 0,
        }
    }

    /// Run (or queue) an analysis for the current config.
    pub fn request_analysis(&mut self) {
        if self.analyzing {
            self.dirty = true;
            return;
        }
        self.analyzing = true;
        self.set_status(format!("Analyzing {}...", self.config.ticker.trim()));
        let _ = self
            .worker_tx
            .send(WorkerCommand::Analyze(self.config.clone()));
    }

    /// Called when an in-flight analysis finishes; re-runs once if the
    /// config changed meanwhile.
    pub fn analysis_finished(&mut self) {
        self.analyzing = false;
        if self.dirty {
            self.dirty = false;
            self.request_analysis();
        }
    }

    /// Grow or shrink the visible window, clamped to its bounds.
    pub fn adjust_window(&mut self, grow: bool) {
        self.config.window_days = if grow {
            (self.config.window_days + WINDOW_STEP_DAYS).min(MAX_WINDOW_DAYS)
        } else {
            self.config
                .window_days
                .saturating_sub(WINDOW_STEP_DAYS)
                .max(MIN_WINDOW_DAYS)
        };
        self.request_analysis();
    }

    /// Toggle an EMA overlay period on the chart.
    pub fn toggle_ema(&mut self, period: usize) {
        if let Some(pos) = self.config.ema_periods.iter().position(|&p| p == period) {
            self.config.ema_periods.remove(pos);
        } else {
            self.config.ema_periods.push(period);
            self.config.ema_periods.sort_unstable();
        }
        self.request_analysis();
    }

    /// Toggle the metric under the cursor on the Metrics panel.
    pub fn toggle_selected_metric(&mut self) {
        let Some(&metric) = Metric::ALL.get(self.metrics_cursor) else {
            return;
        };
        if let Some(pos) = self
            .config
            .selected_metrics
            .iter()
            .position(|&m| m == metric)
        {
            self.config.selected_metrics.remove(pos);
        } else {
            self.config.selected_metrics.push(metric);
        }
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::mpsc;

    fn make_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (
            AppState::new(DashboardConfig::default(), tx, resp_rx),
            cmd_rx,
        )
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Chart.next(), Panel::Metrics);
        assert_eq!(Panel::Help.next(), Panel::Chart);
        assert_eq!(Panel::Chart.prev(), Panel::Help);
        assert_eq!(Panel::Metrics.prev(), Panel::Chart);
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = make_app();
        for i in 0..60 {
            app.push_error(format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn concurrent_requests_coalesce_into_one_rerun() {
        let (mut app, cmd_rx) = make_app();

        app.request_analysis();
        app.request_analysis(); // in flight: marks dirty
        app.request_analysis(); // still just dirty
        assert_eq!(cmd_rx.try_iter().count(), 1);
        assert!(app.dirty);

        app.analysis_finished(); // dirty flag spends itself on one re-run
        assert_eq!(cmd_rx.try_iter().count(), 1);
        assert!(!app.dirty);

        app.analysis_finished();
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }

    #[test]
    fn adjust_window_clamps_at_bounds() {
        let (mut app, _cmd_rx) = make_app();
        app.config.window_days = MAX_WINDOW_DAYS;
        app.adjust_window(true);
        assert_eq!(app.config.window_days, MAX_WINDOW_DAYS);

        app.analyzing = false;
        app.config.window_days = MIN_WINDOW_DAYS;
        app.adjust_window(false);
        assert_eq!(app.config.window_days, MIN_WINDOW_DAYS);
    }

    #[test]
    fn toggle_ema_adds_and_removes() {
        let (mut app, _cmd_rx) = make_app();
        assert!(app.config.ema_periods.contains(&50));
        app.toggle_ema(50);
        assert!(!app.config.ema_periods.contains(&50));
        app.analyzing = false;
        app.toggle_ema(50);
        assert_eq!(app.config.ema_periods, vec![20, 50, 200]);
    }

    #[test]
    fn toggle_metric_under_cursor() {
        let (mut app, _cmd_rx) = make_app();
        app.metrics_cursor = 0; // PeRatio, selected by default
        app.toggle_selected_metric();
        assert!(!app.config.selected_metrics.contains(&Metric::PeRatio));
        app.toggle_selected_metric();
        assert!(app.config.selected_metrics.contains(&Metric::PeRatio));
    }

    proptest! {
        #[test]
        fn panel_index_roundtrips(i in 0usize..4) {
            let panel = Panel::from_index(i).unwrap();
            prop_assert_eq!(panel.index(), i);
        }
    }
}
