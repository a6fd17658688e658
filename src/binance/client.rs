//! Binance API client for fetching historical kline (candlestick) data
//!
//! No API key required for public market data endpoints.
//!
//! # Example
//! ```no_run
//! use box_breakout::binance::BinanceClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BinanceClient::new();
//!     let klines = client.get_klines("GBPUSDT", "15m", None, None, Some(500)).await?;
//!     println!("Fetched {} klines", klines.len());
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration as StdDuration;
use tracing::debug;

use super::types::BinanceKline;
use crate::types::Bar;

/// Base URL for Binance API
const BINANCE_API_BASE: &str = "https://api.binance.com/api/v3";

/// Maximum klines per request (Binance limit)
const MAX_KLINES_PER_REQUEST: u32 = 1000;

/// Binance API client
#[derive(Debug, Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceClient {
    /// Create a new Binance client
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_API_BASE)
    }

    /// Create a client against a different base URL (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        BinanceClient {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch klines (candlestick data) from Binance
    ///
    /// # Arguments
    /// * `symbol` - Binance trading pair (e.g., "GBPUSDT")
    /// * `interval` - Timeframe (e.g., "15m", "1h", "4h")
    /// * `start_time` - Optional start time in milliseconds
    /// * `end_time` - Optional end time in milliseconds
    /// * `limit` - Optional number of klines to fetch (max 1000)
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<BinanceKline>> {
        let url = format!("{}/klines", self.base_url);

        let mut params = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
        ];

        if let Some(start) = start_time {
            params.push(("startTime", start.to_string()));
        }

        if let Some(end) = end_time {
            params.push(("endTime", end.to_string()));
        }

        let limit = limit
            .unwrap_or(MAX_KLINES_PER_REQUEST)
            .min(MAX_KLINES_PER_REQUEST);
        params.push(("limit", limit.to_string()));

        debug!(
            "Fetching klines: symbol={}, interval={}, limit={}",
            symbol, interval, limit
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to send request to Binance")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Binance API error {}: {}", status, body);
        }

        let raw_data: Vec<Vec<serde_json::Value>> = response
            .json()
            .await
            .context("Failed to parse Binance response")?;

        let klines: Vec<BinanceKline> = raw_data
            .iter()
            .filter_map(|row| BinanceKline::from_raw(row))
            .collect();

        Ok(klines)
    }

    /// Fetch the latest klines and convert them to core bars, ascending by time
    pub async fn get_bars(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Bar>> {
        let klines = self
            .get_klines(symbol, interval, None, None, Some(limit))
            .await?;

        let mut bars: Vec<Bar> = klines.iter().map(BinanceKline::to_bar).collect();
        bars.sort_by_key(|b| b.time);
        bars.dedup_by_key(|b| b.time);
        Ok(bars)
    }

    /// Check server connectivity
    pub async fn ping(&self) -> Result<bool> {
        let url = format!("{}/ping", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Get server time
    pub async fn get_server_time(&self) -> Result<DateTime<Utc>> {
        let url = format!("{}/time", self.base_url);
        let response = self.client.get(&url).send().await?;

        #[derive(serde::Deserialize)]
        struct TimeResponse {
            #[serde(rename = "serverTime")]
            server_time: i64,
        }

        let time_resp: TimeResponse = response.json().await?;
        DateTime::from_timestamp_millis(time_resp.server_time).context("Invalid server time")
    }
}
