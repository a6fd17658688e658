//! Check command
//!
//! One-shot assessment: fetch klines, build the box, evaluate the latest
//! closed bar and print a report to stdout.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use box_breakout::binance::BinanceClient;
use box_breakout::signal::BreakoutEvaluator;
use box_breakout::Config;

use super::{assess_market, load_config};

pub fn run(
    config_path: Option<String>,
    symbol: Option<String>,
    interval: Option<String>,
) -> Result<()> {
    dotenv::dotenv().ok();

    let config = load_config(config_path, symbol, interval)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: Config) -> Result<()> {
    let client = BinanceClient::new();
    let evaluator = BreakoutEvaluator::new(config.signal.clone());

    info!(
        "Checking {} {} against the {:02}:00 UTC session box",
        config.market.symbol, config.market.interval, config.session.anchor_hour
    );

    let view = assess_market(&client, &evaluator, &config).await?;

    println!("Symbol:    {}", config.market.symbol);
    println!("Interval:  {}", config.market.interval);

    match &view.range {
        Some(range) => {
            println!("Box top:   {:.5}", range.top);
            println!("Box low:   {:.5}", range.bottom);
        }
        None => {
            println!("Box:       not ready (no bars in session window)");
            return Ok(());
        }
    }

    if let Some(bar) = &view.latest {
        let closed_at = DateTime::<Utc>::from_timestamp(bar.time, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| bar.time.to_string());
        println!("Last bar:  open={:.5} close={:.5} ({})", bar.open, bar.close, closed_at);
    }

    match &view.signal {
        Some(signal) => {
            println!("Signal:    {}", signal.direction);
            println!("Entry:     {:.5}", signal.entry);
            println!("Stop:      {:.5}", signal.stop);
            println!("Target:    {:.5}", signal.target);
        }
        None => println!("Signal:    none"),
    }

    Ok(())
}
