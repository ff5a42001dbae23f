//! Run parameters and their validation.

use crate::domain::RiskLevel;
use crate::error::ConfigError;
use crate::pool::SelectionPolicy;
use crate::scoring::ScoreWeights;
use serde::{Deserialize, Serialize};

pub const MIN_INSTRUMENTS: usize = 3;
pub const MAX_INSTRUMENTS: usize = 10;

pub const DEFAULT_WINDOW: usize = 50;
pub const DEFAULT_RECLAIM_DAYS: i64 = 3;
pub const DEFAULT_MAX_POSITIONS: usize = 8;

/// Everything a session needs to run. Validated once at construction;
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParams {
    pub symbols: Vec<String>,
    pub total_capital: f64,
    pub risk_level: RiskLevel,
    /// Moving-average window in trading days.
    pub window: usize,
    /// Calendar days a tactical entry has to reclaim the favorable zone.
    pub reclaim_window_days: i64,
    pub max_positions: usize,
    pub weights: ScoreWeights,
    pub selection_policy: SelectionPolicy,
}

impl SessionParams {
    pub fn new(symbols: Vec<String>, total_capital: f64, risk_level: RiskLevel) -> Self {
        Self {
            symbols,
            total_capital,
            risk_level,
            window: DEFAULT_WINDOW,
            reclaim_window_days: DEFAULT_RECLAIM_DAYS,
            max_positions: DEFAULT_MAX_POSITIONS,
            weights: ScoreWeights::default(),
            selection_policy: SelectionPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.symbols.len();
        if !(MIN_INSTRUMENTS..=MAX_INSTRUMENTS).contains(&count) {
            return Err(ConfigError::InstrumentCount {
                count,
                min: MIN_INSTRUMENTS,
                max: MAX_INSTRUMENTS,
            });
        }
        if !(self.total_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital {
                capital: self.total_capital,
            });
        }
        if self.window == 0 {
            return Err(ConfigError::NonPositiveWindow);
        }
        if self.reclaim_window_days <= 0 {
            return Err(ConfigError::NonPositiveReclaimWindow {
                days: self.reclaim_window_days,
            });
        }
        if self.max_positions == 0 {
            return Err(ConfigError::NonPositiveMaxPositions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("SYM{i}")).collect()
    }

    #[test]
    fn defaults_validate() {
        let params = SessionParams::new(symbols(5), 100_000.0, RiskLevel::Moderate);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn instrument_count_bounds() {
        let too_few = SessionParams::new(symbols(2), 100_000.0, RiskLevel::Moderate);
        assert_eq!(
            too_few.validate(),
            Err(ConfigError::InstrumentCount {
                count: 2,
                min: 3,
                max: 10,
            })
        );

        let too_many = SessionParams::new(symbols(11), 100_000.0, RiskLevel::Moderate);
        assert!(too_many.validate().is_err());

        assert!(SessionParams::new(symbols(3), 1.0, RiskLevel::Low)
            .validate()
            .is_ok());
        assert!(SessionParams::new(symbols(10), 1.0, RiskLevel::Low)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_bad_scalars() {
        let mut params = SessionParams::new(symbols(5), 0.0, RiskLevel::High);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositiveCapital { .. })
        ));

        params.total_capital = 50_000.0;
        params.window = 0;
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveWindow));

        params.window = 20;
        params.reclaim_window_days = 0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositiveReclaimWindow { .. })
        ));

        params.reclaim_window_days = 3;
        params.max_positions = 0;
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveMaxPositions));
    }
}
