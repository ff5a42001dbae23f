//! Capital partition: deployable sub-budget vs untouched reserve.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Risk selector controlling the deployable fraction of total capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Fraction of total capital committed to the unit pool.
    pub fn deployable_fraction(self) -> f64 {
        match self {
            RiskLevel::High => 0.5,
            RiskLevel::Moderate => 0.3,
            RiskLevel::Low => 0.1,
        }
    }
}

/// Fixed partition of total capital, set once per run.
///
/// Invariant: `sub_budget + reserve == total_capital` for the run's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSplit {
    total_capital: f64,
    sub_budget: f64,
    reserve: f64,
}

impl BudgetSplit {
    pub fn new(total_capital: f64, risk: RiskLevel) -> Result<Self, ConfigError> {
        if !(total_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital {
                capital: total_capital,
            });
        }
        let sub_budget = total_capital * risk.deployable_fraction();
        Ok(Self {
            total_capital,
            sub_budget,
            reserve: total_capital - sub_budget,
        })
    }

    pub fn total_capital(&self) -> f64 {
        self.total_capital
    }

    pub fn sub_budget(&self) -> f64 {
        self.sub_budget
    }

    pub fn reserve(&self) -> f64 {
        self.reserve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fractions() {
        let high = BudgetSplit::new(100_000.0, RiskLevel::High).unwrap();
        assert!((high.sub_budget() - 50_000.0).abs() < 1e-9);

        let moderate = BudgetSplit::new(100_000.0, RiskLevel::Moderate).unwrap();
        assert!((moderate.sub_budget() - 30_000.0).abs() < 1e-9);

        let low = BudgetSplit::new(100_000.0, RiskLevel::Low).unwrap();
        assert!((low.sub_budget() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn partition_is_exact() {
        let split = BudgetSplit::new(123_456.78, RiskLevel::Moderate).unwrap();
        assert!((split.sub_budget() + split.reserve() - split.total_capital()).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_capital() {
        assert!(BudgetSplit::new(0.0, RiskLevel::High).is_err());
        assert!(BudgetSplit::new(-5.0, RiskLevel::Low).is_err());
        assert!(BudgetSplit::new(f64::NAN, RiskLevel::Low).is_err());
    }
}
