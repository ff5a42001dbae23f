//! Gambit CLI — run and board commands.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file or inline flags,
//!   saving trades.csv, pool.csv, and manifest.json under the output dir
//! - `board` — fetch recent prices and print today's board with ranked
//!   advisories

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gambit_core::data::{load_price_table, StdoutProgress, YahooProvider};
use gambit_core::domain::RiskLevel;
use gambit_core::engine::Session;
use gambit_core::pool::SelectionPolicy;
use gambit_core::scoring::compute_scores;
use gambit_core::suggest::Advisory;
use gambit_runner::{execute, save_artifacts, text_report, RunConfig};

#[derive(Parser)]
#[command(
    name = "gambit",
    about = "Gambit CLI — chess-pool capital allocation backtester"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file or inline flags.
    Run {
        /// Path to a TOML config file. Overrides all inline flags.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Instruments to trade, 3 to 10 symbols (e.g., AAPL MSFT GOOG).
        symbols: Vec<String>,

        /// Total capital to split into pool and reserve.
        #[arg(long, default_value_t = 100_000.0)]
        capital: f64,

        /// Risk level: high, moderate, low.
        #[arg(long, default_value = "moderate")]
        risk: String,

        /// Moving-average window in trading days.
        #[arg(long)]
        window: Option<usize>,

        /// Calendar days a tactical entry has to reclaim the favorable zone.
        #[arg(long)]
        reclaim_days: Option<i64>,

        /// Maximum simultaneous open positions.
        #[arg(long)]
        max_positions: Option<usize>,

        /// Unit selection policy: largest_first, rank_banded.
        #[arg(long, default_value = "largest_first")]
        policy: String,

        /// Start date (YYYY-MM-DD). Defaults to 2 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Fetch recent prices and print today's board with advisories.
    Board {
        /// Instruments to place on the board, 3 to 10 symbols.
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Total capital to split into pool and reserve.
        #[arg(long, default_value_t = 100_000.0)]
        capital: f64,

        /// Risk level: high, moderate, low.
        #[arg(long, default_value = "moderate")]
        risk: String,

        /// Moving-average window in trading days.
        #[arg(long)]
        window: Option<usize>,

        /// History start date (YYYY-MM-DD). Defaults to 2 years ago.
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            symbols,
            capital,
            risk,
            window,
            reclaim_days,
            max_positions,
            policy,
            start,
            end,
            output_dir,
        } => run_cmd(
            config,
            symbols,
            capital,
            &risk,
            window,
            reclaim_days,
            max_positions,
            &policy,
            start,
            end,
            output_dir,
        ),
        Commands::Board {
            symbols,
            capital,
            risk,
            window,
            start,
        } => board_cmd(symbols, capital, &risk, window, start),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    config_path: Option<PathBuf>,
    symbols: Vec<String>,
    capital: f64,
    risk: &str,
    window: Option<usize>,
    reclaim_days: Option<i64>,
    max_positions: Option<usize>,
    policy: &str,
    start: Option<String>,
    end: Option<String>,
    output_dir: PathBuf,
) -> Result<()> {
    let config = if let Some(path) = config_path {
        if !symbols.is_empty() {
            bail!("--config and inline symbols are mutually exclusive");
        }
        RunConfig::load(&path)?
    } else {
        if symbols.is_empty() {
            bail!("one of --config or inline symbols is required");
        }
        build_config(
            symbols,
            capital,
            risk,
            window,
            reclaim_days,
            max_positions,
            policy,
            start.as_deref(),
            end.as_deref(),
        )?
    };

    let provider = YahooProvider::new();
    let progress = StdoutProgress;

    let report = execute(&config, &provider, &progress, None)?;

    print!("{}", text_report(&report));

    let run_dir = output_dir.join(&report.run_id);
    save_artifacts(&run_dir, &report)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    universe: Vec<String>,
    capital: f64,
    risk: &str,
    window: Option<usize>,
    reclaim_days: Option<i64>,
    max_positions: Option<usize>,
    policy: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<RunConfig> {
    let start_date = start
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive() - chrono::Duration::days(365 * 2));

    let end_date = end
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut config = RunConfig {
        universe,
        start_date,
        end_date,
        total_capital: capital,
        risk_level: parse_risk(risk)?,
        window: gambit_core::engine::DEFAULT_WINDOW,
        reclaim_window_days: gambit_core::engine::DEFAULT_RECLAIM_DAYS,
        max_positions: gambit_core::engine::DEFAULT_MAX_POSITIONS,
        selection_policy: parse_policy(policy)?,
        weights: Default::default(),
    };
    if let Some(w) = window {
        config.window = w;
    }
    if let Some(d) = reclaim_days {
        config.reclaim_window_days = d;
    }
    if let Some(m) = max_positions {
        config.max_positions = m;
    }

    config.session_params().validate()?;
    Ok(config)
}

fn parse_risk(s: &str) -> Result<RiskLevel> {
    match s {
        "high" => Ok(RiskLevel::High),
        "moderate" => Ok(RiskLevel::Moderate),
        "low" => Ok(RiskLevel::Low),
        _ => bail!("unknown risk level '{s}'. Valid: high, moderate, low"),
    }
}

fn parse_policy(s: &str) -> Result<SelectionPolicy> {
    match s {
        "largest_first" => Ok(SelectionPolicy::LargestFirst),
        "rank_banded" => Ok(SelectionPolicy::RankBanded),
        _ => bail!("unknown selection policy '{s}'. Valid: largest_first, rank_banded"),
    }
}

fn board_cmd(
    symbols: Vec<String>,
    capital: f64,
    risk: &str,
    window: Option<usize>,
    start: Option<String>,
) -> Result<()> {
    let config = build_config(
        symbols,
        capital,
        risk,
        window,
        None,
        None,
        "largest_first",
        start.as_deref(),
        None,
    )?;
    let params = config.session_params();

    let provider = YahooProvider::new();
    let progress = StdoutProgress;
    let table = load_price_table(
        &provider,
        &config.universe,
        config.start_date,
        config.end_date,
        &progress,
    )?;

    let frame = compute_scores(&table, params.window, params.weights, None)?;

    let last = table.len() - 1;
    let Some(board) = frame.board_state(&table, last) else {
        bail!(
            "not enough history to place the board: need at least {} trading days",
            params.window
        );
    };

    println!("Board for {}", board.date);
    println!("{}", board.render());

    let session = Session::new(params)?;
    let advisories = session.suggestions(&board);
    if advisories.is_empty() {
        println!("No advisories today.");
    } else {
        println!("Advisories:");
        for advisory in &advisories {
            println!("  {}", describe(advisory));
        }
    }

    Ok(())
}

fn describe(advisory: &Advisory) -> String {
    match advisory {
        Advisory::MandatoryClose { symbol, reason } => {
            format!("CLOSE {symbol} ({reason})")
        }
        Advisory::ProfitHint { symbol, gain_pct } => {
            format!("TAKE PROFIT {symbol} (+{gain_pct:.1}%)")
        }
        Advisory::ScaleHint { symbol, score } => {
            format!("SCALE UP {symbol} (score {score:.2})")
        }
        Advisory::OpenFavorable { symbol, score, rank } => {
            format!("OPEN {symbol} (score {score:.2}, rank {rank})")
        }
        Advisory::OpenTactical { symbol, score } => {
            format!("OPEN TACTICAL {symbol} (score {score:.2})")
        }
    }
}
