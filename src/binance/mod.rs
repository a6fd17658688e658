//! Binance market data: REST klines and the public trade stream

pub mod client;
pub mod stream;
pub mod types;

pub use client::BinanceClient;
pub use stream::TradeFeed;
pub use types::BinanceKline;
