//! Dashboard configuration.
//!
//! An explicit struct with named fields and documented defaults, passed
//! into the analysis pass. Loadable from a TOML file; missing fields take
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fundamentals::Metric;

/// Day-window bounds for the visible chart period.
pub const MIN_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 365;
pub const DEFAULT_WINDOW_DAYS: u32 = 180;

/// EMA periods offered by the dashboard.
pub const EMA_CHOICES: [usize; 3] = [20, 50, 200];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All user-tunable dashboard inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ticker symbol (US equities).
    pub ticker: String,
    /// Visible window in days, clamped to [30, 365].
    pub window_days: u32,
    /// EMA overlay periods.
    pub ema_periods: Vec<usize>,
    /// Show the RSI panel.
    pub show_rsi: bool,
    /// Show the MACD panel.
    pub show_macd: bool,
    /// Which fundamental metrics to display.
    pub selected_metrics: Vec<Metric>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ticker: "TSLA".to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            ema_periods: EMA_CHOICES.to_vec(),
            show_rsi: false,
            show_macd: false,
            selected_metrics: vec![Metric::PeRatio, Metric::Roe, Metric::ProfitMargin],
        }
    }
}

impl DashboardConfig {
    /// Load from a TOML file, applying defaults for missing fields.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.normalize();
        Ok(config)
    }

    /// Clamp and clean the fields in place: ticker uppercased and trimmed,
    /// window clamped to its bounds, zero EMA periods dropped.
    pub fn normalize(&mut self) {
        self.ticker = self.ticker.trim().to_uppercase();
        self.window_days = self.window_days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS);
        self.ema_periods.retain(|&p| p > 0);
        self.ema_periods.dedup();
    }

    /// Number of optional chart panels currently enabled.
    pub fn optional_panel_count(&self) -> u32 {
        u32::from(self.show_rsi) + u32::from(self.show_macd)
    }
}
