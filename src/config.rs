//! Configuration management
//!
//! JSON configuration file with serde defaults, so a partial (or absent)
//! file still yields the reference parameters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::binance::types::is_valid_interval;
use crate::types::Symbol;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub signal: SignalConfig,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_interval(&self.market.interval) {
            anyhow::bail!("Invalid interval: '{}'", self.market.interval);
        }
        if self.session.anchor_hour > 23 {
            anyhow::bail!("session.anchor_hour must be 0-23");
        }
        if self.signal.reward_ratio <= 0.0 {
            anyhow::bail!("signal.reward_ratio must be positive");
        }
        Ok(())
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.market.symbol.clone())
    }
}

/// Market data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Trading pair in Binance format
    pub symbol: String,
    /// Kline timeframe
    pub interval: String,
    /// Number of klines fetched per refresh
    pub limit: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            symbol: "GBPUSDT".to_string(),
            interval: "15m".to_string(),
            limit: 500,
        }
    }
}

/// Session window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// UTC hour the session window ends at (07:00 by default)
    pub anchor_hour: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { anchor_hour: 7 }
    }
}

/// Breakout signal parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Distance of the entry level beyond the box edge
    pub entry_offset: f64,
    /// Pad added to the box width when sizing the risk unit
    pub range_pad: f64,
    /// Target distance as a multiple of the risk unit
    pub reward_ratio: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            entry_offset: 0.0001,
            range_pad: 0.0002,
            reward_ratio: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let config = Config::default();
        assert_eq!(config.market.symbol, "GBPUSDT");
        assert_eq!(config.market.interval, "15m");
        assert_eq!(config.market.limit, 500);
        assert_eq!(config.session.anchor_hour, 7);
        assert_eq!(config.signal.entry_offset, 0.0001);
        assert_eq!(config.signal.range_pad, 0.0002);
        assert_eq!(config.signal.reward_ratio, 1.5);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"market":{"symbol":"EURUSDT","interval":"1h","limit":300}}"#)
                .unwrap();
        assert_eq!(config.market.symbol, "EURUSDT");
        assert_eq!(config.session.anchor_hour, 7);
    }

    #[test]
    fn validate_rejects_bad_interval() {
        let mut config = Config::default();
        config.market.interval = "2d".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_anchor() {
        let mut config = Config::default();
        config.session.anchor_hour = 24;
        assert!(config.validate().is_err());
    }
}
