//! Session window range computation ("box building")
//!
//! The box is the high/low envelope of all bars that closed inside a fixed
//! daily window anchored at a UTC hour (07:00 by default). The breakout
//! evaluator in [`crate::signal`] trades the first close outside it.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::config::SessionConfig;
use crate::types::{Bar, SessionRange};

/// Inclusive session window bounds in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Compute the session window for the given moment.
///
/// The window end is anchored to *today's* calendar date (per `now` in UTC)
/// at the configured hour, even when `now` is still before that hour. The
/// start is derived as "yesterday's midnight plus 24 hours", which lands on
/// today 00:00 UTC. That reproduces the reference behavior exactly: the
/// effective window is the stretch from today's midnight up to the anchor
/// hour, not a full 24-hour lookback. Kept as observed; widening it changes
/// which extremes the box picks up.
pub fn session_window(now: DateTime<Utc>, config: &SessionConfig) -> SessionWindow {
    let anchor = NaiveTime::from_hms_opt(config.anchor_hour, 0, 0)
        .unwrap_or(NaiveTime::MIN);
    let end = Utc
        .from_utc_datetime(&now.date_naive().and_time(anchor));

    let prev_midnight = Utc.from_utc_datetime(
        &(end.date_naive() - Duration::days(1)).and_time(NaiveTime::MIN),
    );
    let start = prev_midnight + Duration::hours(24);

    SessionWindow {
        start_ms: start.timestamp_millis(),
        end_ms: end.timestamp_millis(),
    }
}

/// Build the session box from historical bars.
///
/// Returns `None` when no bar timestamp falls inside the window (both ends
/// inclusive). Pure function: same bars and clock give the same box.
pub fn build_range(bars: &[Bar], now: DateTime<Utc>, config: &SessionConfig) -> Option<SessionRange> {
    let window = session_window(now, config);

    let mut top = f64::NEG_INFINITY;
    let mut bottom = f64::INFINITY;
    let mut matched = false;

    for bar in bars {
        let t_ms = bar.time * 1000;
        if t_ms >= window.start_ms && t_ms <= window.end_ms {
            top = top.max(bar.high);
            bottom = bottom.min(bar.low);
            matched = true;
        }
    }

    if !matched {
        return None;
    }

    Some(SessionRange { top, bottom })
}
