//! Deployment and retreat rules.
//!
//! Every function here is a pure predicate over a unit, an open position,
//! and one day's board entry. The backtest loop owns all state; these
//! rules only say what is permitted.

use crate::domain::{BoardEntry, OpenPosition, TradeReason, Zone};
use crate::domain::{SizeClass, Unit};
use crate::pool::min_point_value_for_rank;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Point value of the second-largest size class. A favorable position below
/// this at a deep rank draws a scale-up hint.
const SCALE_HINT_THRESHOLD: u32 = 5;

/// Rank at or past which a profitable position draws a profit-taking hint.
const PROFIT_HINT_RANK: u8 = 7;

/// Rank at or past which an undersized favorable position draws a scale hint.
const SCALE_HINT_RANK: u8 = 5;

/// Why a proposed deployment is not permitted.
#[derive(Debug, Error, PartialEq)]
pub enum RuleViolation {
    #[error("deployment requires the {required} zone, instrument is {found}")]
    ZoneMismatch { required: Zone, found: Zone },

    #[error("rank {rank} requires point value >= {required}, unit has {point_value}")]
    UnitBelowRankMinimum {
        rank: u8,
        required: u32,
        point_value: u32,
    },

    #[error("{class} units cannot open tactical positions")]
    NonTacticalUnit { class: SizeClass },
}

/// Strategy phase, purely informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Opening,
    Middlegame,
    Endgame,
}

impl Phase {
    /// Opening while fewer than 4 positions are open; middlegame while 4-7
    /// are open and the reserve still exceeds 20% of total capital;
    /// endgame otherwise.
    pub fn classify(open_positions: usize, reserve: f64, total_capital: f64) -> Self {
        if open_positions < 4 {
            Phase::Opening
        } else if open_positions <= 7 && reserve > 0.2 * total_capital {
            Phase::Middlegame
        } else {
            Phase::Endgame
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Opening => "opening",
            Phase::Middlegame => "middlegame",
            Phase::Endgame => "endgame",
        };
        f.write_str(name)
    }
}

/// A standard deployment: favorable zone only, and the unit must meet the
/// rank band's minimum point value.
pub fn can_open_favorable(unit: &Unit, entry: &BoardEntry) -> Result<(), RuleViolation> {
    if entry.zone != Zone::Favorable {
        return Err(RuleViolation::ZoneMismatch {
            required: Zone::Favorable,
            found: entry.zone,
        });
    }
    let required = min_point_value_for_rank(entry.coord.rank());
    if unit.point_value < required {
        return Err(RuleViolation::UnitBelowRankMinimum {
            rank: entry.coord.rank(),
            required,
            point_value: unit.point_value,
        });
    }
    Ok(())
}

/// A tactical probe: unfavorable zone only, small classes only.
pub fn can_open_tactical(unit: &Unit, entry: &BoardEntry) -> Result<(), RuleViolation> {
    if entry.zone != Zone::Unfavorable {
        return Err(RuleViolation::ZoneMismatch {
            required: Zone::Unfavorable,
            found: entry.zone,
        });
    }
    if !unit.class.is_tactical() {
        return Err(RuleViolation::NonTacticalUnit { class: unit.class });
    }
    Ok(())
}

/// Whether a position must close today, and why.
///
/// Trend reversal applies to favorable-zone entries now observed in the
/// unfavorable zone. The reclaim timeout applies to tactical entries whose
/// window has lapsed without the flag being set; the caller updates
/// `reclaimed` from the day's zones before asking.
pub fn mandatory_close(
    position: &OpenPosition,
    entry: &BoardEntry,
    today: NaiveDate,
) -> Option<TradeReason> {
    if position.entry_zone == Zone::Favorable && entry.zone == Zone::Unfavorable {
        return Some(TradeReason::TrendReversal);
    }
    if position.reclaim_expired(today) {
        return Some(TradeReason::ReclaimTimeout);
    }
    None
}

/// Non-binding: a favorable position deep on the board holding an
/// undersized unit could be upgraded.
pub fn scale_hint(position: &OpenPosition, entry: &BoardEntry) -> bool {
    entry.zone == Zone::Favorable
        && entry.coord.rank() >= SCALE_HINT_RANK
        && position.point_value < SCALE_HINT_THRESHOLD
}

/// Non-binding: a position at a deep rank with unrealized gain could take
/// profit.
pub fn profit_hint(position: &OpenPosition, entry: &BoardEntry) -> bool {
    entry.coord.rank() >= PROFIT_HINT_RANK && position.gain_loss(entry.price) > 0.0
}
