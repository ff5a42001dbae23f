//! Price provider trait and structured error types.
//!
//! The provider abstraction keeps the engine testable without a network:
//! production uses the Yahoo Finance implementation, tests feed fixtures
//! through [`PriceTable::prepare`](super::table::PriceTable::prepare).

use super::table::PriceTable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One adjusted close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Structured errors for data operations. All of these are fatal input
/// errors: they surface before any simulation step runs.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no price data returned for the requested symbols and date range")]
    NoData,

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for daily-close providers.
pub trait PriceProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch adjusted daily closes for one symbol over a date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>, DataError>;
}

/// Progress callback for multi-symbol loads.
pub trait LoadProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize);
    fn on_complete(&self, symbol: &str, result: &Result<usize, DataError>);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl LoadProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {symbol}...", index + 1, total);
    }

    fn on_complete(&self, symbol: &str, result: &Result<usize, DataError>) {
        match result {
            Ok(n) => println!("  OK: {symbol} ({n} days)"),
            Err(e) => println!("  FAIL: {symbol}: {e}"),
        }
    }
}

/// Fetch every symbol and prepare the aligned, forward-filled table.
///
/// A symbol that fails to fetch is fatal: the run aborts rather than trading
/// a partial universe the caller did not ask for.
pub fn load_price_table(
    provider: &dyn PriceProvider,
    symbols: &[String],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn LoadProgress,
) -> Result<PriceTable, DataError> {
    let mut series = Vec::with_capacity(symbols.len());
    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, symbols.len());
        let result = provider.fetch(symbol, start, end);
        progress.on_complete(symbol, &result.as_ref().map(|c| c.len()).map_err(clone_err));
        series.push((symbol.clone(), result?));
    }
    PriceTable::prepare(series)
}

// DataError is not Clone (reqwest errors are stringified already), so the
// progress callback gets a structural copy.
fn clone_err(e: &DataError) -> DataError {
    match e {
        DataError::NetworkUnreachable(s) => DataError::NetworkUnreachable(s.clone()),
        DataError::ResponseFormatChanged(s) => DataError::ResponseFormatChanged(s.clone()),
        DataError::SymbolNotFound { symbol } => DataError::SymbolNotFound {
            symbol: symbol.clone(),
        },
        DataError::NoData => DataError::NoData,
        DataError::Other(s) => DataError::Other(s.clone()),
    }
}
