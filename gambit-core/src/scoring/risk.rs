//! Optional market-wide risk input.
//!
//! A risk reading only tilts the score weights away from momentum and
//! toward volatility; absence of a reading disables the tilt entirely.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Baseline above which a risk reading starts shifting weight. Readings at
/// or past `RISK_CEILING` apply the full (capped) shift.
pub const RISK_CEILING: f64 = 20.0;

/// Largest fraction of the momentum/volatility weights that a risk reading
/// may move.
pub const MAX_WEIGHT_SHIFT: f64 = 0.2;

/// Source of a market-wide risk level, keyed by date.
pub trait RiskIndicator {
    /// Risk reading for a date, or `None` when no reading exists.
    fn risk_level(&self, date: NaiveDate) -> Option<f64>;
}

/// In-memory risk series. Dates without an entry return no reading.
#[derive(Debug, Clone, Default)]
pub struct RiskSeries {
    readings: BTreeMap<NaiveDate, f64>,
}

impl RiskSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, level: f64) {
        self.readings.insert(date, level);
    }
}

impl RiskIndicator for RiskSeries {
    fn risk_level(&self, date: NaiveDate) -> Option<f64> {
        self.readings.get(&date).copied()
    }
}

/// Fraction of the maximum shift a reading applies: 0 at or below zero,
/// linear up to 1 at `RISK_CEILING`, clamped past that.
pub fn shift_fraction(risk_level: f64) -> f64 {
    (risk_level / RISK_CEILING).clamp(0.0, 1.0)
}
