//! Open positions — the binding between an instrument and a pool unit.

use super::coord::Zone;
use super::unit::{SizeClass, UnitId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A live instrument → unit binding.
///
/// Created when a deployment executes and destroyed when a close executes.
/// `entry_date` is the decision day the open was queued on; `entry_exec_date`
/// is the next day, when the buy actually filled. The reclaim clock runs
/// from the decision day in simulated calendar days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub symbol: String,
    pub unit_id: UnitId,
    pub unit_class: SizeClass,
    pub point_value: u32,
    pub shares: u64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
    pub entry_exec_date: NaiveDate,
    pub entry_zone: Zone,
    pub tactical: bool,
    pub reclaim_window_days: i64,
    /// A tactical entry that has touched the favorable zone keeps this flag
    /// for good; the reclaim timeout no longer applies.
    pub reclaimed: bool,
}

impl OpenPosition {
    pub fn market_value(&self, price: f64) -> f64 {
        price * self.shares as f64
    }

    pub fn gain_loss(&self, price: f64) -> f64 {
        (price - self.entry_price) * self.shares as f64
    }

    /// Unrealized gain as a percentage of the entry price.
    pub fn gain_pct(&self, price: f64) -> f64 {
        if self.entry_price > 0.0 {
            (price - self.entry_price) / self.entry_price * 100.0
        } else {
            0.0
        }
    }

    /// Simulated calendar days since the open decision.
    pub fn days_held(&self, today: NaiveDate) -> i64 {
        today.signed_duration_since(self.entry_date).num_days()
    }

    /// The reclaim deadline has passed without the zone being reclaimed.
    pub fn reclaim_expired(&self, today: NaiveDate) -> bool {
        self.tactical && !self.reclaimed && self.days_held(today) >= self.reclaim_window_days
    }
}
