//! Core data types used across the watcher

use serde::{Deserialize, Serialize};

/// OHLC price bar, timestamped in epoch seconds (bar open time)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// High/low extremes of the daily session window ("the box")
///
/// Absence of a box (no bars fell inside the window) is `Option::None`
/// at the call sites; a constructed value always satisfies `top >= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRange {
    pub top: f64,
    pub bottom: f64,
}

impl SessionRange {
    pub fn width(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Breakout trade idea: entry, protective stop and profit target
///
/// Produced fresh on each evaluation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

/// Trading pair symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Symbol(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used by websocket stream names
    pub fn stream_name(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
