//! Criterion benchmarks for the hot paths.
//!
//! Benchmarks:
//! 1. Score computation (rolling stats + cross-sectional normalization)
//! 2. Board construction for one date
//! 3. The full backtest loop end to end

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::NaiveDate;
use gambit_core::data::{DailyClose, PriceTable};
use gambit_core::domain::RiskLevel;
use gambit_core::engine::{Session, SessionParams};
use gambit_core::scoring::{compute_scores, ScoreWeights};

const WINDOW: usize = 20;

fn make_table(days: usize, num_symbols: usize) -> PriceTable {
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let series = (0..num_symbols)
        .map(|s| {
            let closes = (0..days)
                .map(|i| DailyClose {
                    date: base_date + chrono::Duration::days(i as i64),
                    close: 100.0 + (s as f64 * 10.0) + (i as f64 * 0.1).sin() * 10.0,
                })
                .collect();
            (format!("SYM{s}"), closes)
        })
        .collect();
    PriceTable::prepare(series).expect("bench table")
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_computation");

    for &days in &[252, 1260, 2520] {
        let table = make_table(days, 10);
        group.bench_with_input(BenchmarkId::new("10_symbols", days), &days, |b, _| {
            b.iter(|| {
                compute_scores(
                    black_box(&table),
                    WINDOW,
                    ScoreWeights::default(),
                    None,
                )
            });
        });
    }

    group.finish();
}

fn bench_board_state(c: &mut Criterion) {
    let table = make_table(1260, 10);
    let frame = compute_scores(&table, WINDOW, ScoreWeights::default(), None).expect("scores");

    c.bench_function("board_state_one_date", |b| {
        b.iter(|| frame.board_state(black_box(&table), 1000));
    });
}

fn bench_full_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtest_loop");

    for &days in &[252, 1260] {
        let table = make_table(days, 10);
        let frame = compute_scores(&table, WINDOW, ScoreWeights::default(), None).expect("scores");
        let symbols = table.symbols().to_vec();

        group.bench_with_input(BenchmarkId::new("10_symbols", days), &days, |b, _| {
            b.iter(|| {
                let mut params =
                    SessionParams::new(symbols.clone(), 100_000.0, RiskLevel::Moderate);
                params.window = WINDOW;
                let mut session = Session::new(params).expect("session");
                session.run(black_box(&table), black_box(&frame))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_board_state, bench_full_backtest);
criterion_main!(benches);
