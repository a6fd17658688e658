//! Integration tests for the box-breakout watcher
//!
//! These tests wire bars -> session box -> breakout signal end to end.

use chrono::{TimeZone, Utc};

use box_breakout::config::{Config, SessionConfig, SignalConfig};
use box_breakout::session::build_range;
use box_breakout::signal::BreakoutEvaluator;
use box_breakout::types::{Bar, Direction};

// =============================================================================
// Test Utilities
// =============================================================================

/// Generate 15m bars covering the session window on 2024-03-15,
/// oscillating between the given extremes
fn session_bars(top: f64, bottom: f64) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap().timestamp();
    let mid = (top + bottom) / 2.0;
    let mut bars = Vec::new();

    // 28 bars of 15 minutes span 00:00 .. 07:00
    for i in 0..28 {
        let wide = i % 4 == 0;
        bars.push(Bar {
            time: start + i * 900,
            open: mid,
            high: if wide { top } else { mid + 0.0005 },
            low: if wide { bottom } else { mid - 0.0005 },
            close: mid,
        });
    }

    bars
}

/// Append a bar after the session window
fn push_later_bar(bars: &mut Vec<Bar>, open: f64, close: f64) {
    let time = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap().timestamp();
    bars.push(Bar {
        time,
        open,
        high: open.max(close) + 0.0002,
        low: open.min(close) - 0.0002,
        close,
    });
}

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

// =============================================================================
// End-to-end flow
// =============================================================================

#[test]
fn test_box_then_long_breakout() {
    let mut bars = session_bars(1.2700, 1.2650);
    // Latest bar opens inside the entry level and closes above it
    push_later_bar(&mut bars, 1.2699, 1.2704);

    let range = build_range(&bars, noon(), &SessionConfig::default()).unwrap();
    assert_eq!(range.top, 1.2700);
    assert_eq!(range.bottom, 1.2650);

    let evaluator = BreakoutEvaluator::new(SignalConfig::default());
    let signal = evaluator.evaluate(&range, bars.last().unwrap()).unwrap();

    assert_eq!(signal.direction, Direction::Long);
    assert!(signal.entry > range.top);
    assert!(signal.stop < range.bottom);
    assert!(signal.target > signal.entry);
}

#[test]
fn test_box_then_short_breakout() {
    let mut bars = session_bars(1.2700, 1.2650);
    push_later_bar(&mut bars, 1.2650, 1.2645);

    let range = build_range(&bars, noon(), &SessionConfig::default()).unwrap();
    let evaluator = BreakoutEvaluator::new(SignalConfig::default());
    let signal = evaluator.evaluate(&range, bars.last().unwrap()).unwrap();

    assert_eq!(signal.direction, Direction::Short);
    assert!(signal.entry < range.bottom);
    assert!(signal.stop > range.top);
    assert!(signal.target < signal.entry);
}

#[test]
fn test_bar_inside_box_produces_no_signal() {
    let mut bars = session_bars(1.2700, 1.2650);
    push_later_bar(&mut bars, 1.2660, 1.2680);

    let range = build_range(&bars, noon(), &SessionConfig::default()).unwrap();
    let evaluator = BreakoutEvaluator::new(SignalConfig::default());

    assert!(evaluator.evaluate(&range, bars.last().unwrap()).is_none());
}

#[test]
fn test_no_session_bars_means_no_box_and_no_signal() {
    // Bars exist, but all after the window
    let mut bars = Vec::new();
    push_later_bar(&mut bars, 1.2699, 1.2710);

    let range = build_range(&bars, noon(), &SessionConfig::default());
    assert!(range.is_none());

    // With no box there is nothing to evaluate
    let evaluator = BreakoutEvaluator::new(SignalConfig::default());
    let signal = range
        .as_ref()
        .zip(bars.last())
        .and_then(|(range, bar)| evaluator.evaluate(range, bar));
    assert!(signal.is_none());
}

#[test]
fn test_rebuild_is_stable_across_calls() {
    let mut bars = session_bars(1.2700, 1.2650);
    push_later_bar(&mut bars, 1.2699, 1.2704);

    let config = SessionConfig::default();
    let first = build_range(&bars, noon(), &config);
    let second = build_range(&bars, noon(), &config);
    assert_eq!(first, second);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_roundtrip_from_file() {
    let path = std::env::temp_dir().join("box_breakout_test_config.json");
    let json = r#"{
        "market": {"symbol": "EURUSDT", "interval": "1h", "limit": 300},
        "session": {"anchor_hour": 8},
        "signal": {"entry_offset": 0.0002, "range_pad": 0.0004, "reward_ratio": 2.0}
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.market.symbol, "EURUSDT");
    assert_eq!(config.session.anchor_hour, 8);
    assert_eq!(config.signal.reward_ratio, 2.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_config_rejects_invalid_interval_from_file() {
    let path = std::env::temp_dir().join("box_breakout_bad_config.json");
    std::fs::write(&path, r#"{"market": {"symbol": "GBPUSDT", "interval": "7m", "limit": 500}}"#)
        .unwrap();

    assert!(Config::from_file(&path).is_err());

    std::fs::remove_file(&path).ok();
}
