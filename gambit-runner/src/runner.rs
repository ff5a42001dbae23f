//! Run orchestration — wires data loading, scoring, and the session loop.
//!
//! Two entry points:
//! - `execute()`: fetches prices through a provider, then runs. Used by the CLI.
//! - `execute_with_table()`: takes a prepared price table — no I/O. Used by
//!   tests and anything that already holds data.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gambit_core::data::{load_price_table, DataError, LoadProgress, PriceProvider, PriceTable};
use gambit_core::domain::{OpenPosition, TradeRecord};
use gambit_core::engine::{RunSummary, Session};
use gambit_core::error::{ConfigError, EngineError};
use gambit_core::policy::Phase;
use gambit_core::pool::ClassSummary;
use gambit_core::scoring::{compute_scores, RiskIndicator};

use crate::config::RunConfig;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Complete result of a single run, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub config: RunConfig,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub summary: RunSummary,
    pub trades: Vec<TradeRecord>,
    pub pool: Vec<ClassSummary>,
    /// Positions the run could not close (no final price).
    pub open_positions: Vec<OpenPosition>,
    pub final_phase: Phase,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Fetch prices through a provider and run.
pub fn execute(
    config: &RunConfig,
    provider: &dyn PriceProvider,
    progress: &dyn LoadProgress,
    risk: Option<&dyn RiskIndicator>,
) -> Result<RunReport, RunError> {
    let table = load_price_table(
        provider,
        &config.universe,
        config.start_date,
        config.end_date,
        progress,
    )?;
    execute_with_table(config, &table, risk)
}

/// Run against a prepared price table — no I/O.
pub fn execute_with_table(
    config: &RunConfig,
    table: &PriceTable,
    risk: Option<&dyn RiskIndicator>,
) -> Result<RunReport, RunError> {
    let started = Instant::now();
    let params = config.session_params();
    params.validate()?;

    let frame = compute_scores(table, params.window, params.weights, risk)?;
    let mut session = Session::new(params)?;
    let summary = session.run(table, &frame)?;

    Ok(RunReport {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        config: config.clone(),
        timestamp: Utc::now(),
        duration_secs: started.elapsed().as_secs_f64(),
        summary,
        trades: session.ledger().to_vec(),
        pool: session.pool().summary(),
        open_positions: session.positions().values().cloned().collect(),
        final_phase: session.phase(),
    })
}
