//! Trade ledger records — append-only, immutable once written.

use super::coord::Zone;
use super::unit::SizeClass;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Why a ledger entry was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeReason {
    /// Deployment into the favorable zone.
    OpenFavorable,
    /// Small-unit entry in the unfavorable zone.
    OpenTactical,
    /// Favorable-zone entry observed in the unfavorable zone.
    TrendReversal,
    /// Tactical entry failed to reclaim the favorable zone in time.
    ReclaimTimeout,
    /// Remaining positions liquidated at the last available date.
    EndOfSimulation,
}

impl fmt::Display for TradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeReason::OpenFavorable => "open favorable",
            TradeReason::OpenTactical => "open tactical",
            TradeReason::TrendReversal => "trend reversal",
            TradeReason::ReclaimTimeout => "reclaim timeout",
            TradeReason::EndOfSimulation => "end of simulation",
        };
        write!(f, "{s}")
    }
}

/// One executed open or close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub action: TradeAction,
    pub price: f64,
    pub shares: u64,
    pub value: f64,
    pub unit_class: SizeClass,
    pub point_value: u32,
    /// Execution date of the opening buy.
    pub opened: NaiveDate,
    /// Execution date of the close, for sell records.
    pub closed: Option<NaiveDate>,
    pub reason: TradeReason,
    pub entry_zone: Zone,
    pub tactical: bool,
}

/// Aggregates computed from a finished ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub buys: usize,
    pub sells: usize,
    pub buy_value: f64,
    pub sell_value: f64,
    /// Sell proceeds minus buy cost across all closed flow.
    pub realized_pnl: f64,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &[TradeRecord]) -> Self {
        let mut summary = LedgerSummary::default();
        for record in ledger {
            match record.action {
                TradeAction::Buy => {
                    summary.buys += 1;
                    summary.buy_value += record.value;
                }
                TradeAction::Sell => {
                    summary.sells += 1;
                    summary.sell_value += record.value;
                }
            }
        }
        summary.realized_pnl = summary.sell_value - summary.buy_value;
        summary
    }
}
