//! Binance API types for klines (candlestick) data

use crate::types::Bar;

/// Binance kline/candlestick data
/// API returns an array: [open_time, open, high, low, close, volume, close_time,
///                        quote_volume, trades, taker_buy_base, taker_buy_quote, ignore]
#[derive(Debug, Clone)]
pub struct BinanceKline {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
}

impl BinanceKline {
    /// Parse from raw JSON array returned by Binance API
    pub fn from_raw(raw: &[serde_json::Value]) -> Option<Self> {
        if raw.len() < 7 {
            return None;
        }

        Some(BinanceKline {
            open_time: raw[0].as_i64()?,
            open: raw[1].as_str()?.parse().ok()?,
            high: raw[2].as_str()?.parse().ok()?,
            low: raw[3].as_str()?.parse().ok()?,
            close: raw[4].as_str()?.parse().ok()?,
            volume: raw[5].as_str()?.parse().ok()?,
            close_time: raw[6].as_i64()?,
        })
    }

    /// Convert to a core bar, open time in epoch seconds
    pub fn to_bar(&self) -> Bar {
        Bar {
            time: self.open_time / 1000,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

/// Valid Binance intervals
pub const BINANCE_INTERVALS: &[&str] = &[
    "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];

/// Check if interval is valid for Binance
pub fn is_valid_interval(interval: &str) -> bool {
    BINANCE_INTERVALS.contains(&interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_raw_kline_row() {
        let raw = vec![
            json!(1700000000000i64),
            json!("1.26500"),
            json!("1.27030"),
            json!("1.26480"),
            json!("1.27020"),
            json!("1234.5"),
            json!(1700000899999i64),
        ];

        let kline = BinanceKline::from_raw(&raw).unwrap();
        assert_eq!(kline.open_time, 1700000000000);
        assert_eq!(kline.open, 1.265);
        assert_eq!(kline.close, 1.2702);

        let bar = kline.to_bar();
        assert_eq!(bar.time, 1700000000);
        assert_eq!(bar.high, 1.2703);
    }

    #[test]
    fn short_or_malformed_rows_are_rejected() {
        assert!(BinanceKline::from_raw(&[]).is_none());

        let bad = vec![
            json!(1700000000000i64),
            json!("not-a-number"),
            json!("1.27030"),
            json!("1.26480"),
            json!("1.27020"),
            json!("1234.5"),
            json!(1700000899999i64),
        ];
        assert!(BinanceKline::from_raw(&bad).is_none());
    }

    #[test]
    fn valid_intervals() {
        assert!(is_valid_interval("15m"));
        assert!(is_valid_interval("1h"));
        assert!(!is_valid_interval("2d"));
    }
}
