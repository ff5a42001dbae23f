//! Priority-ranked advisories.
//!
//! One pass over the board turns policy outcomes into a single ranked list:
//! rule-mandated closes first, then profit and scale hints on held
//! instruments, then open opportunities on unheld ones. Only the top three
//! survive; ties keep insertion order (held instruments before candidates).

use crate::domain::{BoardState, OpenPosition, TradeReason};
use crate::policy;
use crate::pool::AllocationPool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_SUGGESTIONS: usize = 3;

/// One ranked advisory. Open variants are eligibility statements; the
/// backtest loop re-checks capacity and prices before acting on anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    MandatoryClose {
        symbol: String,
        reason: TradeReason,
    },
    ProfitHint {
        symbol: String,
        gain_pct: f64,
    },
    ScaleHint {
        symbol: String,
        score: f64,
    },
    OpenFavorable {
        symbol: String,
        score: f64,
        rank: u8,
    },
    OpenTactical {
        symbol: String,
        score: f64,
    },
}

impl Advisory {
    pub fn symbol(&self) -> &str {
        match self {
            Advisory::MandatoryClose { symbol, .. }
            | Advisory::ProfitHint { symbol, .. }
            | Advisory::ScaleHint { symbol, .. }
            | Advisory::OpenFavorable { symbol, .. }
            | Advisory::OpenTactical { symbol, .. } => symbol,
        }
    }

    /// Ranking weight. Mandatory closes always outrank hints, hints always
    /// outrank opens (scores are in [0,1], so score-based priorities stay
    /// below 100).
    pub fn priority(&self) -> f64 {
        match self {
            Advisory::MandatoryClose { .. } => 100.0,
            Advisory::ProfitHint { gain_pct, .. } => 80.0 + gain_pct,
            Advisory::ScaleHint { score, .. } => 60.0 + score * 20.0,
            Advisory::OpenFavorable { score, .. } => score * 100.0,
            Advisory::OpenTactical { score, .. } => score * 50.0,
        }
    }
}

/// Whether opening one more position would leave the reserve covering the
/// open count at the candidate unit's size.
fn has_headroom(open_count: usize, reserve: f64, unit_value: f64) -> bool {
    unit_value > 0.0 && (open_count as f64) < reserve / unit_value
}

/// Rank today's advisories across the whole board.
pub fn suggest(
    board: &BoardState,
    positions: &BTreeMap<String, OpenPosition>,
    pool: &AllocationPool,
    reserve: f64,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    // Held instruments: closes and hints.
    for (symbol, position) in positions {
        let Some(entry) = board.get(symbol) else {
            continue;
        };
        if let Some(reason) = policy::mandatory_close(position, entry, board.date) {
            advisories.push(Advisory::MandatoryClose {
                symbol: symbol.clone(),
                reason,
            });
        }
        if policy::profit_hint(position, entry) {
            advisories.push(Advisory::ProfitHint {
                symbol: symbol.clone(),
                gain_pct: position.gain_pct(entry.price),
            });
        }
        if policy::scale_hint(position, entry) {
            advisories.push(Advisory::ScaleHint {
                symbol: symbol.clone(),
                score: entry.score,
            });
        }
    }

    // Unheld instruments: open opportunities, gated by capital headroom.
    for entry in board.entries() {
        if positions.contains_key(&entry.symbol) {
            continue;
        }
        if entry.zone.is_favorable() {
            if let Some(unit) = pool.acquire_for_rank(entry.coord.rank()) {
                if policy::can_open_favorable(unit, entry).is_ok()
                    && has_headroom(positions.len(), reserve, unit.monetary_value)
                {
                    advisories.push(Advisory::OpenFavorable {
                        symbol: entry.symbol.clone(),
                        score: entry.score,
                        rank: entry.coord.rank(),
                    });
                }
            }
        } else if let Some(unit) = pool.acquire_tactical() {
            if policy::can_open_tactical(unit, entry).is_ok()
                && has_headroom(positions.len(), reserve, unit.monetary_value)
            {
                advisories.push(Advisory::OpenTactical {
                    symbol: entry.symbol.clone(),
                    score: entry.score,
                });
            }
        }
    }

    // Stable sort keeps insertion order on equal priorities.
    advisories.sort_by(|a, b| {
        b.priority()
            .partial_cmp(&a.priority())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    advisories.truncate(MAX_SUGGESTIONS);
    advisories
}
