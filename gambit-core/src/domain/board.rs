//! Per-date board snapshot.
//!
//! A `BoardState` is recomputed fresh for every simulated day from the score
//! frame; nothing in it persists across days except through the open-position
//! map the backtest loop owns.

use super::coord::{BoardCoordinate, Zone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One instrument's readings for a single date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    pub symbol: String,
    pub price: f64,
    pub moving_average: f64,
    /// Opportunity score in [0,1].
    pub score: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub coord: BoardCoordinate,
    pub zone: Zone,
}

impl BoardEntry {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        moving_average: f64,
        score: f64,
        momentum: f64,
        volatility: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            moving_average,
            score,
            momentum,
            volatility,
            coord: BoardCoordinate::from_score(score),
            zone: Zone::from_price_ma(price, moving_average),
        }
    }
}

/// Snapshot of every scorable instrument on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardState {
    pub date: NaiveDate,
    entries: BTreeMap<String, BoardEntry>,
}

impl BoardState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, entry: BoardEntry) {
        self.entries.insert(entry.symbol.clone(), entry);
    }

    pub fn get(&self, symbol: &str) -> Option<&BoardEntry> {
        self.entries.get(symbol)
    }

    /// Entries in symbol order.
    pub fn entries(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ASCII rendering of the 8x8 board.
    ///
    /// `F` marks an instrument in the favorable zone, `U` unfavorable,
    /// `.` an empty square. Rank 8 prints first so rank 1 sits at the bottom.
    pub fn render(&self) -> String {
        let mut grid = [[b'.'; 8]; 8];
        for entry in self.entries.values() {
            let row = 8 - entry.coord.rank() as usize;
            let col = entry.coord.file_index();
            grid[row][col] = if entry.zone.is_favorable() { b'F' } else { b'U' };
        }

        let mut out = String::from("  A B C D E F G H\n");
        for (i, row) in grid.iter().enumerate() {
            let rank = 8 - i;
            out.push_str(&format!("{rank} "));
            let cells: Vec<String> = row.iter().map(|&c| (c as char).to_string()).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        out
    }
}
