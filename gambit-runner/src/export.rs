//! Artifact export — CSV, JSON, and a console report.
//!
//! A run saves three artifacts next to each other:
//! - `trades.csv`: the full ledger, one row per executed open or close
//! - `pool.csv`: per-class unit inventory at the end of the run
//! - `manifest.json`: the whole `RunReport`, schema-versioned

use std::path::Path;

use anyhow::{bail, Context, Result};
use gambit_core::domain::{TradeAction, TradeRecord};
use gambit_core::pool::ClassSummary;

use crate::runner::{RunReport, SCHEMA_VERSION};

// ─── CSV export ─────────────────────────────────────────────────────

/// Ledger as CSV.
///
/// Columns: symbol, action, price, shares, value, unit_class, point_value,
/// opened, closed, reason, entry_zone, tactical
pub fn export_trades_csv(trades: &[TradeRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "symbol",
        "action",
        "price",
        "shares",
        "value",
        "unit_class",
        "point_value",
        "opened",
        "closed",
        "reason",
        "entry_zone",
        "tactical",
    ])?;

    for trade in trades {
        let action = match trade.action {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        };
        wtr.write_record([
            &trade.symbol,
            &action.to_string(),
            &format!("{:.4}", trade.price),
            &trade.shares.to_string(),
            &format!("{:.2}", trade.value),
            &trade.unit_class.to_string(),
            &trade.point_value.to_string(),
            &trade.opened.to_string(),
            &trade.closed.map(|d| d.to_string()).unwrap_or_default(),
            &trade.reason.to_string(),
            &trade.entry_zone.to_string(),
            &trade.tactical.to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().context("failed to flush trades CSV")?;
    String::from_utf8(bytes).context("trades CSV is not valid UTF-8")
}

/// Pool inventory as CSV. Columns: class, count, assigned, total_value
pub fn export_pool_csv(pool: &[ClassSummary]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["class", "count", "assigned", "total_value"])?;
    for row in pool {
        wtr.write_record([
            row.class.to_string(),
            row.count.to_string(),
            row.assigned.to_string(),
            format!("{:.2}", row.total_value),
        ])?;
    }
    let bytes = wtr.into_inner().context("failed to flush pool CSV")?;
    String::from_utf8(bytes).context("pool CSV is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize RunReport to JSON")
}

/// Deserialize a report, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunReport> {
    let report: RunReport =
        serde_json::from_str(json).context("failed to deserialize RunReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Write `trades.csv`, `pool.csv`, and `manifest.json` into `dir`,
/// creating it if necessary.
pub fn save_artifacts(dir: &Path, report: &RunReport) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create artifact dir {}", dir.display()))?;

    std::fs::write(dir.join("trades.csv"), export_trades_csv(&report.trades)?)
        .context("failed to write trades.csv")?;
    std::fs::write(dir.join("pool.csv"), export_pool_csv(&report.pool)?)
        .context("failed to write pool.csv")?;
    std::fs::write(dir.join("manifest.json"), export_json(report)?)
        .context("failed to write manifest.json")?;

    Ok(())
}

// ─── Console report ─────────────────────────────────────────────────

/// Human-readable single-run report.
pub fn text_report(report: &RunReport) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str(&format!("Run {}\n", &report.run_id[..12.min(report.run_id.len())]));
    out.push_str(&format!(
        "  {} .. {} ({} decision days)\n",
        s.first_decision, s.last_date, s.days_simulated
    ));
    out.push_str(&format!(
        "  capital {:.2}, risk {:?}, window {}\n",
        report.config.total_capital, report.config.risk_level, report.config.window
    ));
    out.push_str(&format!(
        "  trades: {} buys / {} sells, realized pnl {:.2}\n",
        s.trades.buys, s.trades.sells, s.trades.realized_pnl
    ));
    out.push_str(&format!(
        "  open at end: {}, final phase: {}\n",
        s.open_at_end, report.final_phase
    ));

    out.push_str("  pool:\n");
    for row in &report.pool {
        out.push_str(&format!(
            "    {:<7} x{:<2} assigned {:<2} value {:.2}\n",
            row.class.to_string(),
            row.count,
            row.assigned,
            row.total_value
        ));
    }

    out
}
