//! Session state: the budget split, the unit pool, open positions, and the
//! trade ledger. Owned by the caller and passed by reference wherever a
//! component needs it; the core keeps no global state.

use super::params::SessionParams;
use crate::domain::{BoardState, BudgetSplit, OpenPosition, TradeRecord};
use crate::error::ConfigError;
use crate::policy::Phase;
use crate::pool::AllocationPool;
use crate::suggest::{suggest, Advisory};
use std::collections::BTreeMap;

pub struct Session {
    params: SessionParams,
    budget: BudgetSplit,
    pool: AllocationPool,
    positions: BTreeMap<String, OpenPosition>,
    ledger: Vec<TradeRecord>,
}

impl Session {
    pub fn new(params: SessionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let budget = BudgetSplit::new(params.total_capital, params.risk_level)?;
        let pool = AllocationPool::with_policy(budget.sub_budget(), params.selection_policy);
        Ok(Self {
            params,
            budget,
            pool,
            positions: BTreeMap::new(),
            ledger: Vec::new(),
        })
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn budget(&self) -> &BudgetSplit {
        &self.budget
    }

    pub fn pool(&self) -> &AllocationPool {
        &self.pool
    }

    pub fn positions(&self) -> &BTreeMap<String, OpenPosition> {
        &self.positions
    }

    pub fn ledger(&self) -> &[TradeRecord] {
        &self.ledger
    }

    /// Current strategy phase, informational only.
    pub fn phase(&self) -> Phase {
        Phase::classify(
            self.positions.len(),
            self.budget.reserve(),
            self.budget.total_capital(),
        )
    }

    /// Ranked advisories for one day's board.
    pub fn suggestions(&self, board: &BoardState) -> Vec<Advisory> {
        suggest(board, &self.positions, &self.pool, self.budget.reserve())
    }

    pub(super) fn state_mut(
        &mut self,
    ) -> (
        &mut AllocationPool,
        &mut BTreeMap<String, OpenPosition>,
        &mut Vec<TradeRecord>,
    ) {
        (&mut self.pool, &mut self.positions, &mut self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    fn params() -> SessionParams {
        SessionParams::new(
            vec!["AAPL".into(), "MSFT".into(), "GOOG".into()],
            10_000.0,
            RiskLevel::Moderate,
        )
    }

    #[test]
    fn construction_builds_pool_from_sub_budget() {
        let session = Session::new(params()).unwrap();
        assert!((session.budget().sub_budget() - 3000.0).abs() < 1e-9);
        assert!((session.pool().total_value() - 3000.0).abs() < 1e-9);
        assert_eq!(session.pool().unassigned_count(), 15);
        assert!(session.positions().is_empty());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn construction_rejects_invalid_params() {
        let mut bad = params();
        bad.symbols.truncate(1);
        assert!(Session::new(bad).is_err());
    }

    #[test]
    fn fresh_session_is_in_the_opening() {
        let session = Session::new(params()).unwrap();
        assert_eq!(session.phase(), Phase::Opening);
    }
}
