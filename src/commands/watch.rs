//! Watch command
//!
//! The live loop: every refresh tick fetch klines, rebuild the session box,
//! evaluate the latest closed bar and report the status. A separate feed
//! task streams the last traded price for display. Graceful Ctrl-C shutdown.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{error, info, warn};

use box_breakout::binance::{BinanceClient, TradeFeed};
use box_breakout::signal::BreakoutEvaluator;
use box_breakout::Config;

use super::{assess_market, load_config, MarketView};

pub fn run(
    config_path: Option<String>,
    symbol: Option<String>,
    interval_override: Option<String>,
    refresh_secs: u64,
    once: bool,
    no_feed: bool,
) -> Result<()> {
    dotenv::dotenv().ok();

    let config = load_config(config_path, symbol, interval_override)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_async(config, refresh_secs, once, no_feed))
}

async fn run_async(config: Config, refresh_secs: u64, once: bool, no_feed: bool) -> Result<()> {
    info!(
        "Watching {} {} (box anchored at {:02}:00 UTC, refresh every {}s)",
        config.market.symbol, config.market.interval, config.session.anchor_hour, refresh_secs
    );

    let client = BinanceClient::new();
    let evaluator = BreakoutEvaluator::new(config.signal.clone());

    let mut price_rx = if no_feed || once {
        None
    } else {
        Some(TradeFeed::new(config.symbol()).subscribe())
    };

    if once {
        let view = assess_market(&client, &evaluator, &config).await?;
        report(&config, &view);
        return Ok(());
    }

    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down...");
                let _ = shutdown_tx.send(()).await;
            }
            Err(e) => {
                error!("Error setting up signal handler: {}", e);
            }
        }
    });

    let mut refresh = interval(Duration::from_secs(refresh_secs));
    let mut cycle_count: u64 = 0;

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                cycle_count += 1;
                match assess_market(&client, &evaluator, &config).await {
                    Ok(view) => report(&config, &view),
                    Err(e) => warn!("Cycle {} failed: {}", cycle_count, e),
                }
            }
            price = recv_price(&mut price_rx) => {
                match price {
                    Some(price) => info!("{} last price: {:.5}", config.market.symbol, price),
                    // Feed channel closed; stop polling it
                    None => price_rx = None,
                }
            }
            _ = shutdown_rx.recv() => {
                break;
            }
        }
    }

    info!("Watch session ended after {} cycles", cycle_count);
    Ok(())
}

/// Receive from the optional feed; pends forever when the feed is disabled
/// so the select arm never fires.
async fn recv_price(rx: &mut Option<mpsc::Receiver<f64>>) -> Option<f64> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn report(config: &Config, view: &MarketView) {
    match &view.range {
        None => {
            info!("No bars in the session window yet, box not ready");
            return;
        }
        Some(range) => {
            info!(
                "Box ready: top={:.5} bottom={:.5} width={:.5}",
                range.top,
                range.bottom,
                range.width()
            );
        }
    }

    match &view.signal {
        Some(signal) => {
            info!(
                "{} TRIGGERED on {} | entry={:.5} stop={:.5} target={:.5}",
                signal.direction, config.market.symbol, signal.entry, signal.stop, signal.target
            );
        }
        None => {
            if let Some(bar) = &view.latest {
                info!(
                    "Waiting for breakout close (last close {:.5})",
                    bar.close
                );
            }
        }
    }
}
