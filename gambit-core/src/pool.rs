//! The allocation pool — a fixed inventory of capital-weighted units.
//!
//! Built exactly once per run from the sub-budget: 15 units across the five
//! size classes, monetary values fixed at construction. Every operation is
//! total; the only "failure" is an empty acquisition, which callers treat as
//! a skip.

use crate::domain::{Deployment, SizeClass, Unit, UnitId, TOTAL_POINTS};
use serde::{Deserialize, Serialize};

/// How `acquire_for_rank` picks among unassigned units.
///
/// `LargestFirst` is the legacy behavior: the rank argument is accepted but
/// the globally largest unassigned unit wins regardless. Whether that is a
/// defect is an open policy question, so the behavior is kept selectable
/// rather than silently corrected. `RankBanded` honors the deployment bands:
/// it returns the smallest unassigned unit whose point value satisfies the
/// rank's minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    LargestFirst,
    RankBanded,
}

/// Minimum point value required to deploy at a given rank.
///
/// rank <= 2 needs >= 1, <= 4 needs >= 3, <= 6 needs >= 5, above that only
/// the single 9-point unit qualifies.
pub fn min_point_value_for_rank(rank: u8) -> u32 {
    match rank {
        0..=2 => 1,
        3..=4 => 3,
        5..=6 => 5,
        _ => 9,
    }
}

/// Per-class inventory row for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub class: SizeClass,
    pub count: usize,
    pub assigned: usize,
    pub total_value: f64,
}

/// Fixed-size pool of allocation units.
#[derive(Debug, Clone)]
pub struct AllocationPool {
    units: Vec<Unit>,
    policy: SelectionPolicy,
}

impl AllocationPool {
    /// Build the full 15-unit inventory from the deployable sub-budget.
    pub fn new(sub_budget: f64) -> Self {
        Self::with_policy(sub_budget, SelectionPolicy::default())
    }

    pub fn with_policy(sub_budget: f64, policy: SelectionPolicy) -> Self {
        let value_per_point = sub_budget / TOTAL_POINTS as f64;
        let mut units = Vec::with_capacity(15);
        let mut next_id = 0u32;
        for class in SizeClass::ALL {
            for _ in 0..class.quantity() {
                units.push(Unit::new(UnitId(next_id), class, value_per_point));
                next_id += 1;
            }
        }
        Self { units, policy }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Pick a unit for a favorable-zone deployment at the given rank.
    ///
    /// Returns `None` when the pool (or the band, under `RankBanded`) is
    /// exhausted — a skip, not an error.
    pub fn acquire_for_rank(&self, rank: u8) -> Option<&Unit> {
        match self.policy {
            SelectionPolicy::LargestFirst => self
                .units
                .iter()
                .filter(|u| !u.assigned)
                .max_by_key(|u| (u.point_value, std::cmp::Reverse(u.id))),
            SelectionPolicy::RankBanded => {
                let min = min_point_value_for_rank(rank);
                self.units
                    .iter()
                    .filter(|u| !u.assigned && u.point_value >= min)
                    .min_by_key(|u| (u.point_value, u.id))
            }
        }
    }

    /// Pick the smallest unassigned unit from the two tactical classes.
    pub fn acquire_tactical(&self) -> Option<&Unit> {
        self.units
            .iter()
            .filter(|u| !u.assigned && u.class.is_tactical())
            .min_by_key(|u| (u.point_value, u.id))
    }

    /// Commit a unit to a deployment. Returns false for unknown ids.
    pub fn assign(&mut self, id: UnitId, deployment: Deployment) -> bool {
        match self.units.iter_mut().find(|u| u.id == id) {
            Some(unit) => {
                unit.assigned = true;
                unit.deployment = Some(deployment);
                true
            }
            None => false,
        }
    }

    /// Return a unit to the pool, clearing all position-specific fields.
    pub fn release(&mut self, id: UnitId) -> bool {
        match self.units.iter_mut().find(|u| u.id == id) {
            Some(unit) => {
                unit.assigned = false;
                unit.deployment = None;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unassigned_count(&self) -> usize {
        self.units.iter().filter(|u| !u.assigned).count()
    }

    /// Sum of all unit values, assigned or not. Always equals the sub-budget.
    pub fn total_value(&self) -> f64 {
        self.units.iter().map(|u| u.monetary_value).sum()
    }

    /// Inventory rows in class order.
    pub fn summary(&self) -> Vec<ClassSummary> {
        SizeClass::ALL
            .iter()
            .map(|&class| {
                let of_class: Vec<&Unit> =
                    self.units.iter().filter(|u| u.class == class).collect();
                ClassSummary {
                    class,
                    count: of_class.len(),
                    assigned: of_class.iter().filter(|u| u.assigned).count(),
                    total_value: of_class.iter().map(|u| u.monetary_value).sum(),
                }
            })
            .collect()
    }
}
