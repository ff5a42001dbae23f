//! Gambit Core — scoring, the unit pool, deployment policy, and the
//! backtest loop.
//!
//! The heart of the board-allocation backtester:
//! - Domain types (board coordinates, units, positions, trades, budgets)
//! - Opportunity scoring with cross-sectional normalization
//! - A fixed 15-unit allocation pool with selectable acquisition policy
//! - Pure deployment/retreat rule predicates
//! - A priority-ranked advisory generator
//! - A strictly sequential day loop with a one-day execution lag
//!
//! Everything here is deterministic given its inputs: same prices, same
//! parameters, same ledger.

pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod policy;
pub mod pool;
pub mod scoring;
pub mod suggest;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types a runner hands across threads or
    /// serializes into artifacts are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::BoardEntry>();
        require_sync::<domain::BoardEntry>();
        require_send::<domain::BoardState>();
        require_sync::<domain::BoardState>();
        require_send::<domain::OpenPosition>();
        require_sync::<domain::OpenPosition>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();
        require_send::<domain::Unit>();
        require_sync::<domain::Unit>();
        require_send::<domain::BudgetSplit>();
        require_sync::<domain::BudgetSplit>();

        require_send::<pool::AllocationPool>();
        require_sync::<pool::AllocationPool>();
        require_send::<scoring::ScoreFrame>();
        require_sync::<scoring::ScoreFrame>();
        require_send::<suggest::Advisory>();
        require_sync::<suggest::Advisory>();
        require_send::<engine::Session>();
        require_sync::<engine::Session>();
        require_send::<engine::RunSummary>();
        require_sync::<engine::RunSummary>();
        require_send::<data::PriceTable>();
        require_sync::<data::PriceTable>();
    }
}
