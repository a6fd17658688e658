//! Live last-trade price feed over the Binance websocket
//!
//! Display-only: prices from this feed never participate in box building or
//! signal evaluation. The feed task pushes each traded price onto a channel
//! and reconnects with a fixed backoff when the stream drops.

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};

use crate::types::Symbol;

/// Base URL for the Binance websocket stream
const BINANCE_WS_BASE: &str = "wss://stream.binance.com:9443/ws";

/// Delay before reconnecting after a dropped stream
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("stream closed by server")]
    Closed,
    #[error("subscriber dropped")]
    Disconnected,
}

/// Trade event payload; only the price field matters here
#[derive(Debug, Deserialize)]
struct TradeEvent {
    #[serde(rename = "p")]
    price: String,
}

/// Subscription to the `<symbol>@trade` stream
#[derive(Debug, Clone)]
pub struct TradeFeed {
    url: String,
    symbol: Symbol,
}

impl TradeFeed {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            url: BINANCE_WS_BASE.to_string(),
            symbol,
        }
    }

    /// Override the stream endpoint (tests, mirrors)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Spawn the feed task and return the receiving end of the price channel.
    ///
    /// The task runs until the receiver is dropped, reconnecting as needed.
    pub fn subscribe(self) -> mpsc::Receiver<f64> {
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            loop {
                match self.pump(&tx).await {
                    Err(FeedError::Disconnected) => break,
                    Err(e) => {
                        warn!("Trade feed error: {}, reconnecting in {:?}", e, RECONNECT_DELAY);
                        tokio::time::sleep(RECONNECT_DELAY).await;
                    }
                    Ok(()) => break,
                }
            }
            debug!("Trade feed task for {} stopped", self.symbol);
        });

        rx
    }

    /// One connection lifetime: connect, subscribe, forward prices
    async fn pump(&self, tx: &mpsc::Sender<f64>) -> Result<(), FeedError> {
        let (mut ws, _) = connect_async(&self.url).await?;

        let subscribe = json!({
            "method": "SUBSCRIBE",
            "params": [format!("{}@trade", self.symbol.stream_name())],
            "id": 1,
        });
        ws.send(Message::Text(subscribe.to_string())).await?;
        debug!("Subscribed to {}@trade", self.symbol.stream_name());

        while let Some(msg) = ws.next().await {
            match msg? {
                Message::Text(txt) => {
                    // Subscribe acks and other control payloads lack a price
                    // field and are skipped.
                    if let Ok(event) = serde_json::from_str::<TradeEvent>(&txt) {
                        if let Ok(price) = event.price.parse::<f64>() {
                            if tx.send(price).await.is_err() {
                                return Err(FeedError::Disconnected);
                            }
                        }
                    }
                }
                Message::Ping(payload) => {
                    ws.send(Message::Pong(payload)).await?;
                }
                Message::Close(_) => return Err(FeedError::Closed),
                _ => {}
            }
        }

        Err(FeedError::Closed)
    }
}
