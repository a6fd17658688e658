//! CLI command implementations

pub mod check;
pub mod watch;

use anyhow::{Context, Result};
use chrono::Utc;

use box_breakout::binance::BinanceClient;
use box_breakout::session::build_range;
use box_breakout::signal::BreakoutEvaluator;
use box_breakout::types::{Bar, SessionRange, TradeSignal};
use box_breakout::Config;

/// Snapshot of one market assessment cycle
#[derive(Debug, Clone)]
pub struct MarketView {
    pub range: Option<SessionRange>,
    pub latest: Option<Bar>,
    pub signal: Option<TradeSignal>,
}

/// Fetch the latest bars, rebuild the box and evaluate the latest closed bar.
///
/// The range is recomputed from scratch on every call; nothing is cached
/// between cycles.
pub async fn assess_market(
    client: &BinanceClient,
    evaluator: &BreakoutEvaluator,
    config: &Config,
) -> Result<MarketView> {
    let bars = client
        .get_bars(
            &config.market.symbol,
            &config.market.interval,
            config.market.limit,
        )
        .await
        .context("Failed to fetch klines")?;

    let range = build_range(&bars, Utc::now(), &config.session);
    let latest = bars.last().copied();
    let signal = range
        .as_ref()
        .zip(latest.as_ref())
        .and_then(|(range, bar)| evaluator.evaluate(range, bar));

    Ok(MarketView {
        range,
        latest,
        signal,
    })
}

/// Load config and apply CLI overrides
pub fn load_config(
    path: Option<String>,
    symbol: Option<String>,
    interval: Option<String>,
) -> Result<Config> {
    let mut config = match path {
        Some(p) => Config::from_file(&p).context(format!("Failed to load config from {}", p))?,
        None => Config::default(),
    };

    if let Some(symbol) = symbol {
        config.market.symbol = symbol.to_uppercase();
    }
    if let Some(interval) = interval {
        config.market.interval = interval;
    }
    config.validate()?;

    Ok(config)
}
