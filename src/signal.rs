//! Breakout detection over the session box
//!
//! Exactly one bar is inspected per call: the most recently closed one. A
//! LONG fires when that bar closed above the box top while having opened at
//! or below the entry level; SHORT is the mirror below the box bottom. A bar
//! that gapped past the entry level does not trigger.

use crate::config::SignalConfig;
use crate::types::{Bar, Direction, SessionRange, TradeSignal};

/// Evaluates closed bars against a session box
#[derive(Debug, Clone)]
pub struct BreakoutEvaluator {
    config: SignalConfig,
}

impl BreakoutEvaluator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Entry level for a long breakout
    pub fn entry_long(&self, range: &SessionRange) -> f64 {
        range.top + self.config.entry_offset
    }

    /// Entry level for a short breakout
    pub fn entry_short(&self, range: &SessionRange) -> f64 {
        range.bottom - self.config.entry_offset
    }

    /// Risk unit: box width plus the configured pad
    pub fn risk_unit(&self, range: &SessionRange) -> f64 {
        range.width() + self.config.range_pad
    }

    /// Evaluate the latest closed bar against the box.
    ///
    /// Long is checked before short. Pure function of its inputs; the caller
    /// re-supplies the range whenever the bar set changes.
    pub fn evaluate(&self, range: &SessionRange, bar: &Bar) -> Option<TradeSignal> {
        let risk = self.risk_unit(range);
        let entry_long = self.entry_long(range);
        let entry_short = self.entry_short(range);

        if bar.close > entry_long && bar.open <= entry_long {
            return Some(TradeSignal {
                direction: Direction::Long,
                entry: entry_long,
                stop: range.bottom - self.config.entry_offset,
                target: entry_long + risk * self.config.reward_ratio,
            });
        }

        if bar.close < entry_short && bar.open >= entry_short {
            return Some(TradeSignal {
                direction: Direction::Short,
                entry: entry_short,
                stop: range.top + self.config.entry_offset,
                target: entry_short - risk * self.config.reward_ratio,
            });
        }

        None
    }
}

impl Default for BreakoutEvaluator {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}
