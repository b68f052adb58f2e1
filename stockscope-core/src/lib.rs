//! StockScope Core — data fetching, indicators, fundamentals, news ranking,
//! and chart composition for the dashboard.
//!
//! This crate contains everything the frontends share:
//! - Domain types (daily bars, a series with derived columns)
//! - Indicator columns (EMA overlays, RSI, MACD + signal)
//! - Fundamentals normalization into a fixed ten-metric table
//! - News scoring and ranking over a sentiment-scorer seam
//! - Backend-agnostic chart layout composition
//! - Yahoo Finance providers behind a TTL memo cache
//! - The single `analyze` pass producing a [`snapshot::DashboardSnapshot`]

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod fundamentals;
pub mod indicators;
pub mod news;
pub mod sentiment;
pub mod snapshot;

pub use config::DashboardConfig;
pub use snapshot::{analyze, DashboardSnapshot};
