//! Date-aligned price table.
//!
//! One adjusted close per instrument per trading day, on a shared ascending
//! date axis. Missing observations are NaN. Construction aligns symbols to
//! the union of their dates, forward-fills interior gaps, and drops any
//! column that still contains missing values, per the market-data contract.

use super::provider::{DailyClose, DataError};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Align per-symbol series to the union of dates.
    ///
    /// Dates absent from a symbol's series become NaN; no filling happens
    /// here. Symbol order follows the caller's order.
    pub fn align(series: Vec<(String, Vec<DailyClose>)>) -> Self {
        let mut all_dates = BTreeSet::new();
        for (_, closes) in &series {
            for close in closes {
                all_dates.insert(close.date);
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let mut symbols = Vec::with_capacity(series.len());
        let mut columns = HashMap::new();
        for (symbol, closes) in series {
            let by_date: HashMap<NaiveDate, f64> =
                closes.into_iter().map(|c| (c.date, c.close)).collect();
            let column: Vec<f64> = dates
                .iter()
                .map(|d| by_date.get(d).copied().unwrap_or(f64::NAN))
                .collect();
            columns.insert(symbol.clone(), column);
            symbols.push(symbol);
        }

        Self {
            dates,
            symbols,
            columns,
        }
    }

    /// Carry the last seen value forward over NaN gaps.
    ///
    /// Leading NaNs (before the first observation) are left in place.
    pub fn forward_fill(&mut self) {
        for column in self.columns.values_mut() {
            let mut last = f64::NAN;
            for value in column.iter_mut() {
                if value.is_nan() {
                    *value = last;
                } else {
                    last = *value;
                }
            }
        }
    }

    /// Remove columns that still contain any missing value.
    pub fn drop_incomplete(&mut self) {
        let columns = &self.columns;
        self.symbols
            .retain(|s| columns[s].iter().all(|v| !v.is_nan()));
        let symbols: BTreeSet<&String> = self.symbols.iter().collect();
        self.columns.retain(|s, _| symbols.contains(s));
    }

    /// Keep only the first `len` dates. Used by truncation tests.
    pub fn truncate(&mut self, len: usize) {
        self.dates.truncate(len);
        for column in self.columns.values_mut() {
            column.truncate(len);
        }
    }

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
        self.dates.is_empty() || self.symbols.is_empty()
    }

    /// Price for a symbol at a date index. NaN when missing or out of range.
    pub fn price(&self, symbol: &str, index: usize) -> f64 {
        self.columns
            .get(symbol)
            .and_then(|col| col.get(index))
            .copied()
            .unwrap_or(f64::NAN)
    }

    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(|c| c.as_slice())
    }

    /// Full preparation pipeline: align, forward-fill, drop incomplete
    /// columns, and fail if nothing tradable remains.
    pub fn prepare(series: Vec<(String, Vec<DailyClose>)>) -> Result<Self, DataError> {
        let mut table = Self::align(series);
        table.forward_fill();
        table.drop_incomplete();
        if table.is_empty() {
            return Err(DataError::NoData);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn closes(pairs: &[(u32, f64)]) -> Vec<DailyClose> {
        pairs
            .iter()
            .map(|&(day, close)| DailyClose {
                date: date(day),
                close,
            })
            .collect()
    }

    #[test]
    fn align_uses_union_of_dates() {
        let table = PriceTable::align(vec![
            ("A".into(), closes(&[(2, 100.0), (3, 101.0)])),
            ("B".into(), closes(&[(3, 200.0), (4, 201.0)])),
        ]);
        assert_eq!(table.dates(), &[date(2), date(3), date(4)]);
        assert!(table.price("A", 2).is_nan());
        assert!(table.price("B", 0).is_nan());
        assert_eq!(table.price("B", 1), 200.0);
    }

    #[test]
    fn forward_fill_carries_interior_gaps() {
        let mut table = PriceTable::align(vec![
            ("A".into(), closes(&[(2, 100.0), (4, 102.0)])),
            ("B".into(), closes(&[(2, 50.0), (3, 51.0), (4, 52.0)])),
        ]);
        table.forward_fill();
        // A's missing day 3 takes day 2's value
        assert_eq!(table.price("A", 1), 100.0);
    }

    #[test]
    fn forward_fill_leaves_leading_gaps() {
        let mut table = PriceTable::align(vec![
            ("A".into(), closes(&[(3, 100.0)])),
            ("B".into(), closes(&[(2, 50.0), (3, 51.0)])),
        ]);
        table.forward_fill();
        assert!(table.price("A", 0).is_nan());
    }

    #[test]
    fn drop_incomplete_removes_leading_nan_columns() {
        let mut table = PriceTable::align(vec![
            ("A".into(), closes(&[(3, 100.0)])),
            ("B".into(), closes(&[(2, 50.0), (3, 51.0)])),
        ]);
        table.forward_fill();
        table.drop_incomplete();
        assert_eq!(table.symbols(), &["B".to_string()]);
        assert!(table.column("A").is_none());
    }

    #[test]
    fn prepare_fails_on_empty_result() {
        let err = PriceTable::prepare(vec![]).unwrap_err();
        assert!(matches!(err, DataError::NoData));

        // Every column incomplete → empty after dropping
        let err = PriceTable::prepare(vec![
            ("A".into(), closes(&[(3, 100.0)])),
            ("B".into(), closes(&[(2, 50.0)])),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::NoData));
    }

    #[test]
    fn out_of_range_lookups_are_nan() {
        let table = PriceTable::align(vec![("A".into(), closes(&[(2, 100.0)]))]);
        assert!(table.price("A", 5).is_nan());
        assert!(table.price("ZZZ", 0).is_nan());
    }
}
