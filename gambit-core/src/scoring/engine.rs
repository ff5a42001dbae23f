//! Opportunity-score computation.
//!
//! Per symbol: rolling mean of closes (the moving average), rolling sample
//! standard deviation of daily returns (the volatility reading), and
//! momentum = price / MA − 1. Per date, cross-sectionally: min-max
//! normalize momentum, normalize and invert volatility (calm is good),
//! hold liquidity at a neutral 0.5, blend by weight, and min-max normalize
//! the blend again. The final value is the opportunity score in [0, 1].
//!
//! A date whose moving average or volatility window is not yet full has no
//! score (NaN), and downstream consumers skip it rather than read zero.

use super::risk::{shift_fraction, RiskIndicator, MAX_WEIGHT_SHIFT};
use super::rolling::{min_max_normalize, pct_change_fill_zero, rolling_mean, rolling_std};
use crate::data::PriceTable;
use crate::domain::{BoardEntry, BoardState};
use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Liquidity has no live data source; it contributes a constant neutral
/// reading so the weight table stays complete.
pub const NEUTRAL_LIQUIDITY: f64 = 0.5;

/// Blend weights for the score components. Must be positive; they are not
/// required to sum to one because the blend is re-normalized per date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub momentum: f64,
    pub volatility: f64,
    pub liquidity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            momentum: 0.6,
            volatility: 0.25,
            liquidity: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Weights for one date, tilted by the day's risk reading if present.
    ///
    /// A high reading moves up to `MAX_WEIGHT_SHIFT` of the momentum weight
    /// onto volatility; liquidity is never touched.
    fn for_risk(&self, risk_level: Option<f64>) -> (f64, f64, f64) {
        match risk_level {
            Some(level) => {
                let rf = shift_fraction(level);
                (
                    self.momentum * (1.0 - MAX_WEIGHT_SHIFT * rf),
                    self.volatility * (1.0 + MAX_WEIGHT_SHIFT * rf),
                    self.liquidity,
                )
            }
            None => (self.momentum, self.volatility, self.liquidity),
        }
    }
}

/// Per-symbol derived series, aligned to the frame's date axis.
#[derive(Debug, Clone)]
struct SymbolScores {
    ma: Vec<f64>,
    momentum: Vec<f64>,
    volatility: Vec<f64>,
    score: Vec<f64>,
}

/// Score output for a whole run: one row per date, one derived column set
/// per symbol. Lookups out of range return NaN, same as [`PriceTable`].
#[derive(Debug, Clone)]
pub struct ScoreFrame {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: HashMap<String, SymbolScores>,
}

impl ScoreFrame {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn score(&self, symbol: &str, index: usize) -> f64 {
        self.lookup(symbol, index, |s| &s.score)
    }

    pub fn moving_average(&self, symbol: &str, index: usize) -> f64 {
        self.lookup(symbol, index, |s| &s.ma)
    }

    pub fn momentum(&self, symbol: &str, index: usize) -> f64 {
        self.lookup(symbol, index, |s| &s.momentum)
    }

    pub fn volatility(&self, symbol: &str, index: usize) -> f64 {
        self.lookup(symbol, index, |s| &s.volatility)
    }

    fn lookup(&self, symbol: &str, index: usize, field: impl Fn(&SymbolScores) -> &Vec<f64>) -> f64 {
        self.columns
            .get(symbol)
            .and_then(|s| field(s).get(index))
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Snapshot the board for one date. Symbols missing any reading on that
    /// date are left off the board; an empty board is `None`.
    pub fn board_state(&self, prices: &PriceTable, index: usize) -> Option<BoardState> {
        let date = *self.dates.get(index)?;
        let mut board = BoardState::new(date);
        for symbol in &self.symbols {
            let price = prices.price(symbol, index);
            let ma = self.moving_average(symbol, index);
            let score = self.score(symbol, index);
            if price.is_nan() || ma.is_nan() || score.is_nan() {
                continue;
            }
            board.insert(BoardEntry::new(
                symbol.clone(),
                price,
                ma,
                score,
                self.momentum(symbol, index),
                self.volatility(symbol, index),
            ));
        }
        if board.len() == 0 {
            None
        } else {
            Some(board)
        }
    }
}

/// Compute opportunity scores for every symbol and date in the table.
pub fn compute_scores(
    table: &PriceTable,
    window: usize,
    weights: ScoreWeights,
    risk: Option<&dyn RiskIndicator>,
) -> Result<ScoreFrame, ConfigError> {
    if window == 0 {
        return Err(ConfigError::NonPositiveWindow);
    }

    let n = table.len();
    let symbols: Vec<String> = table.symbols().to_vec();

    // Per-symbol rolling series.
    let mut columns: HashMap<String, SymbolScores> = HashMap::new();
    for symbol in &symbols {
        let closes = table.column(symbol).unwrap_or(&[]);
        let ma = rolling_mean(closes, window);
        let returns = pct_change_fill_zero(closes);
        let volatility = rolling_std(&returns, window);

        let mut momentum = vec![f64::NAN; n];
        for i in 0..n {
            let price = closes.get(i).copied().unwrap_or(f64::NAN);
            if price.is_nan() || ma[i].is_nan() || ma[i] == 0.0 {
                continue;
            }
            momentum[i] = price / ma[i] - 1.0;
        }

        columns.insert(
            symbol.clone(),
            SymbolScores {
                ma,
                momentum,
                volatility,
                score: vec![f64::NAN; n],
            },
        );
    }

    // Cross-sectional pass, one date at a time.
    for i in 0..n {
        let mut mom: Vec<f64> = symbols.iter().map(|s| columns[s].momentum[i]).collect();
        let mut vol: Vec<f64> = symbols.iter().map(|s| columns[s].volatility[i]).collect();
        min_max_normalize(&mut mom);
        min_max_normalize(&mut vol);
        // Invert volatility: the calmest instrument scores highest.
        for v in vol.iter_mut() {
            if !v.is_nan() {
                *v = 1.0 - *v;
            }
        }

        let risk_level = risk.and_then(|r| table.dates().get(i).and_then(|&d| r.risk_level(d)));
        let (w_mom, w_vol, w_liq) = weights.for_risk(risk_level);

        let mut blended: Vec<f64> = mom
            .iter()
            .zip(vol.iter())
            .map(|(&m, &v)| {
                if m.is_nan() || v.is_nan() {
                    f64::NAN
                } else {
                    w_mom * m + w_vol * v + w_liq * NEUTRAL_LIQUIDITY
                }
            })
            .collect();
        min_max_normalize(&mut blended);

        for (symbol, score) in symbols.iter().zip(blended) {
            if let Some(col) = columns.get_mut(symbol) {
                col.score[i] = score;
            }
        }
    }

    Ok(ScoreFrame {
        dates: table.dates().to_vec(),
        symbols,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyClose;
    use crate::domain::Zone;
    use crate::scoring::risk::RiskSeries;

    fn table_from(series: &[(&str, Vec<f64>)]) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = series
            .iter()
            .map(|(symbol, closes)| {
                let closes = closes
                    .iter()
                    .enumerate()
                    .map(|(i, &close)| DailyClose {
                        date: start + chrono::Duration::days(i as i64),
                        close,
                    })
                    .collect();
                (symbol.to_string(), closes)
            })
            .collect();
        PriceTable::align(series)
    }

    fn trending(start: f64, daily: f64, days: usize) -> Vec<f64> {
        (0..days).map(|i| start * (1.0 + daily).powi(i as i32)).collect()
    }

    #[test]
    fn no_score_before_window_fills() {
        let table = table_from(&[
            ("A", trending(100.0, 0.01, 8)),
            ("B", trending(100.0, -0.01, 8)),
        ]);
        let frame = compute_scores(&table, 3, ScoreWeights::default(), None).unwrap();
        assert!(frame.score("A", 0).is_nan());
        assert!(frame.score("A", 1).is_nan());
        assert!(!frame.score("A", 2).is_nan());
    }

    #[test]
    fn identical_universe_scores_half() {
        let flat = vec![50.0; 8];
        let table = table_from(&[("A", flat.clone()), ("B", flat.clone()), ("C", flat)]);
        let frame = compute_scores(&table, 3, ScoreWeights::default(), None).unwrap();
        for symbol in ["A", "B", "C"] {
            assert_eq!(frame.score(symbol, 7), 0.5);
        }
    }

    #[test]
    fn momentum_orders_the_scores() {
        let table = table_from(&[
            ("UP", trending(100.0, 0.01, 10)),
            ("FLAT", vec![100.0; 10]),
            ("DOWN", trending(100.0, -0.01, 10)),
        ]);
        let frame = compute_scores(&table, 3, ScoreWeights::default(), None).unwrap();
        // Past the warmup every return window is constant, so volatility ties
        // at 0.5 and momentum alone orders the blend.
        let up = frame.score("UP", 9);
        let flat = frame.score("FLAT", 9);
        let down = frame.score("DOWN", 9);
        assert_eq!(up, 1.0);
        assert_eq!(down, 0.0);
        assert!(flat > down && flat < up);
    }

    #[test]
    fn scores_span_unit_interval() {
        let table = table_from(&[
            ("A", trending(100.0, 0.02, 12)),
            ("B", trending(80.0, 0.005, 12)),
            ("C", trending(60.0, -0.015, 12)),
        ]);
        let frame = compute_scores(&table, 4, ScoreWeights::default(), None).unwrap();
        for i in 4..12 {
            let scores: Vec<f64> = ["A", "B", "C"].iter().map(|s| frame.score(s, i)).collect();
            let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(min, 0.0);
            assert_eq!(max, 1.0);
        }
    }

    #[test]
    fn risk_tilt_changes_weights_not_bounds() {
        let (m, v, l) = ScoreWeights::default().for_risk(Some(20.0));
        assert!((m - 0.48).abs() < 1e-12);
        assert!((v - 0.3).abs() < 1e-12);
        assert_eq!(l, 0.15);

        let (m, v, _) = ScoreWeights::default().for_risk(Some(10.0));
        assert!((m - 0.54).abs() < 1e-12);
        assert!((v - 0.275).abs() < 1e-12);

        // no reading, no tilt
        let (m, v, _) = ScoreWeights::default().for_risk(None);
        assert_eq!(m, 0.6);
        assert_eq!(v, 0.25);
    }

    #[test]
    fn risk_series_feeds_the_tilt_by_date() {
        let table = table_from(&[
            ("A", trending(100.0, 0.01, 8)),
            ("B", trending(100.0, -0.01, 8)),
        ]);
        let mut risk = RiskSeries::new();
        for &d in table.dates() {
            risk.insert(d, 40.0);
        }
        // Two instruments min-max to 0 and 1 regardless of the tilt.
        let frame = compute_scores(&table, 3, ScoreWeights::default(), Some(&risk)).unwrap();
        assert_eq!(frame.score("A", 7), 1.0);
        assert_eq!(frame.score("B", 7), 0.0);
    }

    #[test]
    fn zero_window_is_rejected() {
        let table = table_from(&[("A", vec![1.0, 2.0])]);
        let err = compute_scores(&table, 0, ScoreWeights::default(), None).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveWindow);
    }

    #[test]
    fn board_state_skips_symbols_without_scores() {
        let table = table_from(&[
            ("A", trending(100.0, 0.01, 8)),
            ("B", trending(100.0, -0.01, 8)),
        ]);
        let frame = compute_scores(&table, 3, ScoreWeights::default(), None).unwrap();

        assert!(frame.board_state(&table, 0).is_none());

        let board = frame.board_state(&table, 7).unwrap();
        assert_eq!(board.len(), 2);
        let up = board.get("A").unwrap();
        assert_eq!(up.zone, Zone::Favorable);
        let down = board.get("B").unwrap();
        assert_eq!(down.zone, Zone::Unfavorable);
    }
}
