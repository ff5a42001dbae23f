//! Allocation units — discrete, pre-sized capital slots.
//!
//! The pool holds 15 units in five fixed size classes whose point values sum
//! to 39. Each unit's monetary value is fixed at pool construction as
//! `point_value * (sub_budget / 39)` and never recomputed, so the pool's
//! total value always equals the sub-budget regardless of assignment state.

use super::coord::Zone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Total point value across every unit in a full pool.
pub const TOTAL_POINTS: u32 = 39;

/// The five fixed size classes.
///
/// Tactical entries (unfavorable zone) are restricted to the two smallest
/// classes, Knight and Pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl SizeClass {
    /// All classes in descending point-value order (pool construction order).
    pub const ALL: [SizeClass; 5] = [
        SizeClass::Queen,
        SizeClass::Rook,
        SizeClass::Bishop,
        SizeClass::Knight,
        SizeClass::Pawn,
    ];

    pub fn point_value(self) -> u32 {
        match self {
            SizeClass::Queen => 9,
            SizeClass::Rook => 5,
            SizeClass::Bishop => 3,
            SizeClass::Knight => 3,
            SizeClass::Pawn => 1,
        }
    }

    /// How many units of this class a full pool holds.
    pub fn quantity(self) -> usize {
        match self {
            SizeClass::Queen => 1,
            SizeClass::Rook => 2,
            SizeClass::Bishop => 2,
            SizeClass::Knight => 2,
            SizeClass::Pawn => 8,
        }
    }

    /// Eligible for unfavorable-zone (tactical) entries.
    pub fn is_tactical(self) -> bool {
        matches!(self, SizeClass::Knight | SizeClass::Pawn)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeClass::Queen => "queen",
            SizeClass::Rook => "rook",
            SizeClass::Bishop => "bishop",
            SizeClass::Knight => "knight",
            SizeClass::Pawn => "pawn",
        };
        write!(f, "{name}")
    }
}

/// Stable identifier of a unit within its pool (construction index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// Position-specific state carried by a unit while it is assigned.
///
/// Cleared in full when the unit is released back to the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub symbol: String,
    /// The simulated day the open decision was made (drives the reclaim clock).
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub entry_zone: Zone,
    pub shares: u64,
    pub tactical: bool,
    /// Calendar days a tactical entry has to reclaim the favorable zone.
    pub reclaim_window_days: i64,
}

/// One discrete allocation slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub class: SizeClass,
    pub point_value: u32,
    pub monetary_value: f64,
    pub assigned: bool,
    pub deployment: Option<Deployment>,
}

impl Unit {
    pub fn new(id: UnitId, class: SizeClass, value_per_point: f64) -> Self {
        let point_value = class.point_value();
        Self {
            id,
            class,
            point_value,
            monetary_value: point_value as f64 * value_per_point,
            assigned: false,
            deployment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table_sums_to_total_points() {
        let sum: u32 = SizeClass::ALL
            .iter()
            .map(|c| c.point_value() * c.quantity() as u32)
            .sum();
        assert_eq!(sum, TOTAL_POINTS);
    }

    #[test]
    fn pool_has_fifteen_units() {
        let count: usize = SizeClass::ALL.iter().map(|c| c.quantity()).sum();
        assert_eq!(count, 15);
    }

    #[test]
    fn tactical_classes() {
        assert!(SizeClass::Pawn.is_tactical());
        assert!(SizeClass::Knight.is_tactical());
        assert!(!SizeClass::Bishop.is_tactical());
        assert!(!SizeClass::Rook.is_tactical());
        assert!(!SizeClass::Queen.is_tactical());
    }

    #[test]
    fn unit_value_scales_with_point_value() {
        let unit = Unit::new(UnitId(0), SizeClass::Rook, 100.0);
        assert_eq!(unit.point_value, 5);
        assert!((unit.monetary_value - 500.0).abs() < 1e-10);
        assert!(!unit.assigned);
        assert!(unit.deployment.is_none());
    }
}
