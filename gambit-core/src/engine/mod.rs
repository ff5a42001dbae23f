//! Backtest orchestration: parameters, session state, and the day loop.

pub mod backtest;
pub mod params;
pub mod session;

pub use backtest::RunSummary;
pub use params::{
    SessionParams, DEFAULT_MAX_POSITIONS, DEFAULT_RECLAIM_DAYS, DEFAULT_WINDOW, MAX_INSTRUMENTS,
    MIN_INSTRUMENTS,
};
pub use session::Session;
