//! Session-Box Breakout Watcher
//!
//! Watches a single currency pair, computes the high/low envelope of a fixed
//! daily session window ("the box") from Binance klines, and emits a
//! directional trade signal with entry, stop-loss and take-profit levels when
//! the most recently closed bar breaks out of that box.
//!
//! The core (`session` + `signal`) is pure and synchronous; all I/O lives in
//! the `binance` module and the CLI commands.
//!
//! # Example
//! ```
//! use box_breakout::config::{SessionConfig, SignalConfig};
//! use box_breakout::session::build_range;
//! use box_breakout::signal::BreakoutEvaluator;
//! use box_breakout::types::Bar;
//! use chrono::Utc;
//!
//! let bars: Vec<Bar> = vec![];
//! let range = build_range(&bars, Utc::now(), &SessionConfig::default());
//! let evaluator = BreakoutEvaluator::new(SignalConfig::default());
//! let signal = range
//!     .as_ref()
//!     .zip(bars.last())
//!     .and_then(|(range, bar)| evaluator.evaluate(range, bar));
//! assert!(signal.is_none());
//! ```

pub mod binance;
pub mod config;
pub mod session;
pub mod signal;
pub mod types;

pub use config::Config;
pub use session::build_range;
pub use signal::BreakoutEvaluator;
pub use types::{Bar, Direction, SessionRange, Symbol, TradeSignal};

// Re-export exchange client for convenience
pub use binance::BinanceClient;
