//! Error taxonomy for the core engine.
//!
//! Only two failure modes are fatal: bad configuration (rejected at
//! construction) and insufficient input history (rejected before the first
//! simulated day). Per-day data gaps and pool exhaustion are absorbed by
//! skipping and never surface as errors.

use thiserror::Error;

/// Configuration rejected at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("instrument count must be between {min} and {max}, got {count}")]
    InstrumentCount { count: usize, min: usize, max: usize },

    #[error("total capital must be positive, got {capital}")]
    NonPositiveCapital { capital: f64 },

    #[error("moving-average window must be positive")]
    NonPositiveWindow,

    #[error("reclaim window must be positive, got {days}")]
    NonPositiveReclaimWindow { days: i64 },

    #[error("maximum concurrent positions must be positive")]
    NonPositiveMaxPositions,
}

/// Backtest construction or input failures, reported before any trade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient history: {have} observations, need at least {need} (window + 2)")]
    InsufficientHistory { have: usize, need: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
