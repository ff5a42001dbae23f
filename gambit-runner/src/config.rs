//! Serializable run configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a run: the
//! universe, the date range, capital and risk settings, and the engine
//! parameters. Its blake3 hash is the run identifier, so identical configs
//! produce identical artifact names.

use chrono::NaiveDate;
use gambit_core::domain::RiskLevel;
use gambit_core::engine::{
    SessionParams, DEFAULT_MAX_POSITIONS, DEFAULT_RECLAIM_DAYS, DEFAULT_WINDOW,
};
use gambit_core::error::ConfigError;
use gambit_core::pool::SelectionPolicy;
use gambit_core::scoring::ScoreWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Configuration for a single run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Instruments to trade (3 to 10 symbols).
    pub universe: Vec<String>,

    /// History start date (inclusive).
    pub start_date: NaiveDate,

    /// History end date (inclusive).
    pub end_date: NaiveDate,

    pub total_capital: f64,

    pub risk_level: RiskLevel,

    /// Moving-average window in trading days.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Calendar days a tactical entry has to reclaim the favorable zone.
    #[serde(default = "default_reclaim_days")]
    pub reclaim_window_days: i64,

    #[serde(default = "default_max_positions")]
    pub max_positions: usize,

    #[serde(default)]
    pub selection_policy: SelectionPolicy,

    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_reclaim_days() -> i64 {
    DEFAULT_RECLAIM_DAYS
}

fn default_max_positions() -> usize {
    DEFAULT_MAX_POSITIONS
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: RunConfig =
            toml::from_str(&text).map_err(|source| ConfigFileError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.session_params().validate()?;
        Ok(config)
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a run id, which makes their
    /// artifacts directly comparable.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn session_params(&self) -> SessionParams {
        let mut params =
            SessionParams::new(self.universe.clone(), self.total_capital, self.risk_level);
        params.window = self.window;
        params.reclaim_window_days = self.reclaim_window_days;
        params.max_positions = self.max_positions;
        params.selection_policy = self.selection_policy;
        params.weights = self.weights;
        params
    }
}
