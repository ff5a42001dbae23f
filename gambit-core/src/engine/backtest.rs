//! The day-by-day backtest loop.
//!
//! Strictly sequential over the date axis. Decisions on day `t` read only
//! the board computed through day `t`; every execution uses day `t+1`'s
//! price, which is why the loop stops one date before the end. Missing
//! prices skip the affected instrument for that day and nothing else.

use super::params::SessionParams;
use super::session::Session;
use crate::data::PriceTable;
use crate::domain::{
    BoardEntry, Deployment, LedgerSummary, OpenPosition, TradeAction, TradeReason, TradeRecord,
};
use crate::error::EngineError;
use crate::policy::mandatory_close;
use crate::scoring::ScoreFrame;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What a finished run looks like from the outside. The full ledger stays
/// on the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// First date with a decision (the moving-average window boundary).
    pub first_decision: NaiveDate,
    pub last_date: NaiveDate,
    /// Days that actually produced a board and were evaluated.
    pub days_simulated: usize,
    pub trades: LedgerSummary,
    /// Positions that could not be force-closed (no final price).
    pub open_at_end: usize,
}

impl Session {
    /// Run the full simulation over prepared prices and scores.
    ///
    /// Fails fast when the history cannot support a single decision point
    /// (window warmup plus the decision day plus its execution day).
    pub fn run(
        &mut self,
        prices: &PriceTable,
        scores: &ScoreFrame,
    ) -> Result<RunSummary, EngineError> {
        let params = self.params().clone();
        let n = prices.len();
        let need = params.window + 2;
        if n < need {
            return Err(EngineError::InsufficientHistory { have: n, need });
        }

        let dates: Vec<NaiveDate> = prices.dates().to_vec();
        let mut days_simulated = 0;

        for i in params.window..(n - 1) {
            let today = dates[i];
            let tomorrow = dates[i + 1];
            let Some(board) = scores.board_state(prices, i) else {
                continue;
            };
            days_simulated += 1;

            let (pool, positions, ledger) = self.state_mut();

            // A tactical entry that touches the favorable zone has reclaimed
            // it; the flag is permanent.
            for position in positions.values_mut() {
                if position.tactical && !position.reclaimed {
                    if let Some(entry) = board.get(&position.symbol) {
                        if entry.zone.is_favorable() {
                            position.reclaimed = true;
                        }
                    }
                }
            }

            // Close phase: decide on today's board, execute at tomorrow's
            // price. A missing execution price leaves the position open; it
            // will be re-evaluated the next day.
            let mut to_close = Vec::new();
            for (symbol, position) in positions.iter() {
                let Some(entry) = board.get(symbol) else {
                    continue;
                };
                if let Some(reason) = mandatory_close(position, entry, today) {
                    to_close.push((symbol.clone(), reason));
                }
            }
            for (symbol, reason) in to_close {
                let exec_price = prices.price(&symbol, i + 1);
                if exec_price.is_nan() {
                    continue;
                }
                if let Some(position) = positions.remove(&symbol) {
                    ledger.push(sell_record(&position, exec_price, tomorrow, reason));
                    pool.release(position.unit_id);
                }
            }

            // Open phase: best scores first, symbol order breaking ties.
            let mut slots = params.max_positions.saturating_sub(positions.len());
            if slots == 0 {
                continue;
            }
            let mut candidates: Vec<&BoardEntry> = board
                .entries()
                .filter(|e| !positions.contains_key(&e.symbol))
                .collect();
            candidates.sort_by(|a, b| {
                b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
            });

            for entry in candidates {
                if slots == 0 {
                    break;
                }
                let exec_price = prices.price(&entry.symbol, i + 1);
                if exec_price.is_nan() || exec_price <= 0.0 {
                    continue;
                }
                let tactical = !entry.zone.is_favorable();
                let acquired = if tactical {
                    pool.acquire_tactical()
                } else {
                    pool.acquire_for_rank(entry.coord.rank())
                };
                let Some((unit_id, class, point_value, unit_value)) =
                    acquired.map(|u| (u.id, u.class, u.point_value, u.monetary_value))
                else {
                    continue;
                };
                let shares = (unit_value / exec_price).floor() as u64;
                if shares == 0 {
                    continue;
                }

                pool.assign(
                    unit_id,
                    Deployment {
                        symbol: entry.symbol.clone(),
                        entry_date: today,
                        entry_price: exec_price,
                        entry_zone: entry.zone,
                        shares,
                        tactical,
                        reclaim_window_days: params.reclaim_window_days,
                    },
                );
                positions.insert(
                    entry.symbol.clone(),
                    OpenPosition {
                        symbol: entry.symbol.clone(),
                        unit_id,
                        unit_class: class,
                        point_value,
                        shares,
                        entry_price: exec_price,
                        entry_date: today,
                        entry_exec_date: tomorrow,
                        entry_zone: entry.zone,
                        tactical,
                        reclaim_window_days: params.reclaim_window_days,
                        reclaimed: false,
                    },
                );
                ledger.push(TradeRecord {
                    symbol: entry.symbol.clone(),
                    action: TradeAction::Buy,
                    price: exec_price,
                    shares,
                    value: exec_price * shares as f64,
                    unit_class: class,
                    point_value,
                    opened: tomorrow,
                    closed: None,
                    reason: if tactical {
                        TradeReason::OpenTactical
                    } else {
                        TradeReason::OpenFavorable
                    },
                    entry_zone: entry.zone,
                    tactical,
                });
                slots -= 1;
            }
        }

        // Liquidate whatever is left at the final date. A symbol with no
        // final price stays open and keeps its unit assigned.
        let last_index = n - 1;
        let last_date = dates[last_index];
        let (pool, positions, ledger) = self.state_mut();
        let held: Vec<String> = positions.keys().cloned().collect();
        for symbol in held {
            let price = prices.price(&symbol, last_index);
            if price.is_nan() {
                continue;
            }
            if let Some(position) = positions.remove(&symbol) {
                ledger.push(sell_record(
                    &position,
                    price,
                    last_date,
                    TradeReason::EndOfSimulation,
                ));
                pool.release(position.unit_id);
            }
        }

        Ok(RunSummary {
            first_decision: dates[params.window],
            last_date,
            days_simulated,
            trades: LedgerSummary::from_ledger(self.ledger()),
            open_at_end: self.positions().len(),
        })
    }
}

fn sell_record(
    position: &OpenPosition,
    price: f64,
    exec_date: NaiveDate,
    reason: TradeReason,
) -> TradeRecord {
    TradeRecord {
        symbol: position.symbol.clone(),
        action: TradeAction::Sell,
        price,
        shares: position.shares,
        value: price * position.shares as f64,
        unit_class: position.unit_class,
        point_value: position.point_value,
        opened: position.entry_exec_date,
        closed: Some(exec_date),
        reason,
        entry_zone: position.entry_zone,
        tactical: position.tactical,
    }
}
