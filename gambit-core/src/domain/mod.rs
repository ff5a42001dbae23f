//! Domain types for the board-allocation engine.

pub mod board;
pub mod budget;
pub mod coord;
pub mod position;
pub mod trade;
pub mod unit;

pub use board::{BoardEntry, BoardState};
pub use budget::{BudgetSplit, RiskLevel};
pub use coord::{score_to_file, score_to_rank, BoardCoordinate, Zone};
pub use position::OpenPosition;
pub use trade::{LedgerSummary, TradeAction, TradeReason, TradeRecord};
pub use unit::{Deployment, SizeClass, Unit, UnitId, TOTAL_POINTS};
