//! Gambit Runner — run orchestration, configuration, and artifact export.
//!
//! This crate builds on `gambit-core` to provide:
//! - A serializable, content-addressed run configuration (TOML)
//! - The end-to-end runner (load prices, score, simulate)
//! - Artifact export: trade ledger CSV, pool inventory CSV, JSON manifest,
//!   and a console report

pub mod config;
pub mod export;
pub mod runner;

pub use config::{ConfigFileError, RunConfig, RunId};
pub use export::{
    export_json, export_pool_csv, export_trades_csv, import_json, save_artifacts, text_report,
};
pub use runner::{execute, execute_with_table, RunError, RunReport, SCHEMA_VERSION};
