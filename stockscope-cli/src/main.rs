//! StockScope CLI — one-shot dashboard queries without the TUI.
//!
//! Commands:
//! - `snapshot` — run the full analysis pass and print every section
//! - `metrics` — print the normalized fundamentals table
//! - `news` — print sentiment-ranked headlines and the aggregate score

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stockscope_core::chart::PanelKind;
use stockscope_core::data::yahoo_fetcher;
use stockscope_core::fundamentals::Metric;
use stockscope_core::news::Sentiment;
use stockscope_core::sentiment::VaderScorer;
use stockscope_core::{analyze, DashboardConfig, DashboardSnapshot};

#[derive(Parser)]
#[command(name = "stockscope", about = "StockScope CLI — stock dashboard queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pass and print every section.
    Snapshot {
        /// Ticker symbol. Defaults to the config file's ticker.
        ticker: Option<String>,

        /// Visible window in days (30-365).
        #[arg(long)]
        days: Option<u32>,

        /// EMA overlay periods, comma separated (e.g. 20,50,200).
        #[arg(long)]
        ema: Option<String>,

        /// Include the RSI panel.
        #[arg(long, default_value_t = false)]
        rsi: bool,

        /// Include the MACD panel.
        #[arg(long, default_value_t = false)]
        macd: bool,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the normalized fundamentals table.
    Metrics {
        /// Ticker symbol.
        ticker: String,
    },
    /// Print sentiment-ranked headlines and the aggregate score.
    News {
        /// Ticker symbol.
        ticker: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            ticker,
            days,
            ema,
            rsi,
            macd,
            config,
        } => run_snapshot(ticker, days, ema, rsi, macd, config),
        Commands::Metrics { ticker } => run_metrics(&ticker),
        Commands::News { ticker } => run_news(&ticker),
    }
}

fn run_snapshot(
    ticker: Option<String>,
    days: Option<u32>,
    ema: Option<String>,
    rsi: bool,
    macd: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => DashboardConfig::from_toml_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(ticker) = ticker {
        config.ticker = ticker;
    }
    if let Some(days) = days {
        config.window_days = days;
    }
    if let Some(ema) = ema {
        config.ema_periods = parse_ema_periods(&ema)?;
    }
    if rsi {
        config.show_rsi = true;
    }
    if macd {
        config.show_macd = true;
    }

    let snapshot = run_analysis(&config)?;
    print_chart_summary(&snapshot);
    println!();
    print_metrics(&snapshot, true);
    println!();
    print_news(&snapshot);
    Ok(())
}

fn run_metrics(ticker: &str) -> Result<()> {
    let config = DashboardConfig {
        ticker: ticker.to_string(),
        ..Default::default()
    };
    let snapshot = run_analysis(&config)?;
    print_metrics(&snapshot, false);
    Ok(())
}

fn run_news(ticker: &str) -> Result<()> {
    let config = DashboardConfig {
        ticker: ticker.to_string(),
        ..Default::default()
    };
    let snapshot = run_analysis(&config)?;
    print_news(&snapshot);
    Ok(())
}

fn run_analysis(config: &DashboardConfig) -> Result<DashboardSnapshot> {
    let mut fetcher = yahoo_fetcher();
    let snapshot = analyze(config, &mut fetcher, &VaderScorer)
        .with_context(|| format!("analyzing {}", config.ticker))?;
    Ok(snapshot)
}

fn parse_ema_periods(arg: &str) -> Result<Vec<usize>> {
    let mut periods = Vec::new();
    for part in arg.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let period: usize = part
            .parse()
            .with_context(|| format!("invalid EMA period: {part}"))?;
        if period == 0 {
            bail!("EMA period must be positive");
        }
        periods.push(period);
    }
    Ok(periods)
}

fn print_chart_summary(snapshot: &DashboardSnapshot) {
    let config = &snapshot.config;
    println!("=== {} ===", config.ticker);

    if snapshot.series.is_empty() {
        println!("No price history found. Check the ticker symbol.");
        return;
    }

    let last = &snapshot.series.bars[snapshot.series.bars.len() - 1];
    println!(
        "{} bars over {} days, last close {:.2} on {}",
        snapshot.series.len(),
        config.window_days,
        last.close,
        last.date
    );

    println!(
        "Chart: {} panel(s), {}px total",
        snapshot.layout.panels.len(),
        snapshot.layout.total_height
    );
    for panel in &snapshot.layout.panels {
        let kind = match panel.kind {
            PanelKind::Price => "price",
            PanelKind::Rsi => "rsi",
            PanelKind::Macd => "macd",
        };
        let traces: Vec<&str> = panel.traces.iter().map(|t| t.name.as_str()).collect();
        println!(
            "  {:<6} {:>4}px  y [{:.2}, {:.2}]  traces: {}",
            kind,
            panel.height,
            panel.y_range.0,
            panel.y_range.1,
            traces.join(", ")
        );
    }
}

fn print_metrics(snapshot: &DashboardSnapshot, selected_only: bool) {
    println!("Fundamentals:");
    for metric in Metric::ALL {
        if selected_only && !snapshot.config.selected_metrics.contains(&metric) {
            continue;
        }
        if let Some(value) = snapshot.metrics.get(&metric) {
            println!("  {:<20} {}", metric.label(), value);
        }
    }
}

fn print_news(snapshot: &DashboardSnapshot) {
    let Some(news) = &snapshot.news else {
        println!("No news found for {}.", snapshot.config.ticker);
        return;
    };

    let aggregate = Sentiment::from_compound(news.aggregate_score);
    println!(
        "News sentiment: {:+.3} ({}) over {} headlines",
        news.aggregate_score,
        aggregate.label(),
        news.items.len()
    );
    for item in &news.items {
        println!(
            "  {:+.3} [{}] {}",
            item.compound,
            item.sentiment.label(),
            item.headline.title
        );
        println!("         {}  {}", item.headline.published, item.headline.link);
    }
}
