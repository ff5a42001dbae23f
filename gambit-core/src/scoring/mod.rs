//! Opportunity scoring: rolling statistics, cross-sectional normalization,
//! and the per-run score frame.

pub mod engine;
pub mod risk;
pub mod rolling;

pub use engine::{compute_scores, ScoreFrame, ScoreWeights, NEUTRAL_LIQUIDITY};
pub use risk::{RiskIndicator, RiskSeries};
