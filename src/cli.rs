//! CLI definition and dispatch.

use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::matrix_csv_adapter::load_matrix;
use crate::adapters::override_config_adapter::OverrideConfigAdapter;
use crate::domain::catalog::CATALOG;
use crate::domain::config_validation::{
    parse_optional, validate_correlation_config, validate_evaluation_config,
};
use crate::domain::correlation::{
    CorrelationMatrix, DEFAULT_ASSETS, RiskAssessment, RiskParams, analyze_correlation_risk,
    generator,
};
use crate::domain::error::SignalError;
use crate::domain::ohlcv::default_offset;
use crate::domain::position::Direction;
use crate::domain::strategy::{DEFAULT_STOCHASTIC_PERIOD, StrategyConfig, StrategyKind};
use crate::domain::universe::{UniverseResult, evaluate_universe, parse_symbols};
use crate::logging::{self, DEFAULT_LEVEL, LogSettings};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Trading signal strategy evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a signal strategy over one or more symbols
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated symbols, replaces [data] symbols
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        direction: Option<String>,
        /// CSV file for completed trades
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify systemic risk from asset correlations
    Correlation {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// CSV correlation matrix; without it a synthetic matrix is generated
        #[arg(long)]
        matrix: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        assets: Option<usize>,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// List the strategy catalog
    Strategies,
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
        /// Check the [correlation] section instead of the evaluation sections
        #[arg(long)]
        correlation: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            symbol,
            strategy,
            direction,
            output,
        } => run_evaluate(&config, symbol, strategy, direction, output),
        Command::Correlation {
            config,
            matrix,
            seed,
            assets,
            threshold,
        } => run_correlation(config.as_ref(), matrix, seed, assets, threshold),
        Command::Strategies => run_strategies(),
        Command::Validate {
            config,
            correlation,
        } => run_validate(&config, correlation),
    }
}

fn fail(err: &SignalError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

pub fn log_settings(config: &dyn ConfigPort) -> LogSettings {
    LogSettings {
        level: config
            .get_string("logging", "level")
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        json: config.get_bool("logging", "json", false),
    }
}

fn run_evaluate(
    config_path: &Path,
    symbol: Option<String>,
    strategy: Option<String>,
    direction: Option<String>,
    output: Option<PathBuf>,
) -> ExitCode {
    let base = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let config = OverrideConfigAdapter::new(&base)
        .with("data", "symbols", symbol)
        .with("strategy", "name", strategy)
        .with("strategy", "direction", direction)
        .with(
            "report",
            "trades_path",
            output.map(|p| p.display().to_string()),
        );

    logging::init_logging(&log_settings(&config));
    tracing::info!(path = %config_path.display(), "loaded config");

    if let Err(e) = validate_evaluation_config(&config) {
        return fail(&e);
    }

    let prepared = build_strategy_config(&config).and_then(|template| {
        let offset = resolve_offset(&config)?;
        let csv_path = config
            .get_string("data", "csv_path")
            .ok_or_else(|| SignalError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_path".to_string(),
            })?;
        let adapter = CsvAdapter::new(PathBuf::from(csv_path), offset);
        let symbols = resolve_symbols(&config, &adapter)?;
        let limit = resolve_limit(&config)?;
        Ok((template, adapter, symbols, limit))
    });

    let (template, adapter, symbols, limit) = match prepared {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    let trades_path = config.get_string("report", "trades_path").map(PathBuf::from);

    run_evaluation_pipeline(&adapter, &template, &symbols, limit, trades_path.as_deref())
}

/// Strategy template from `[strategy]`. The symbol is filled in per run.
pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, SignalError> {
    let name = config
        .get_string("strategy", "name")
        .ok_or_else(|| SignalError::ConfigMissing {
            section: "strategy".to_string(),
            key: "name".to_string(),
        })?;
    let strategy: StrategyKind = name.parse()?;
    let direction: Direction = match config.get_string("strategy", "direction") {
        Some(d) => d.parse()?,
        None => Direction::Long,
    };

    let mut template = StrategyConfig::new("", strategy, direction).with_stochastic_period(
        parse_optional(config, "strategy", "stochastic_period")?
            .unwrap_or(DEFAULT_STOCHASTIC_PERIOD),
    );
    if let Some(window) = parse_optional(config, "strategy", "window")? {
        template = template.with_window(window);
    }
    Ok(template)
}

pub fn resolve_offset(config: &dyn ConfigPort) -> Result<FixedOffset, SignalError> {
    match parse_optional::<i32>(config, "data", "utc_offset_minutes")? {
        None => Ok(default_offset()),
        Some(minutes) => minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| SignalError::ConfigInvalid {
                section: "data".to_string(),
                key: "utc_offset_minutes".to_string(),
                reason: format!("{} minutes is not a valid UTC offset", minutes),
            }),
    }
}

/// `[data] limit`, with 0 meaning every bar.
pub fn resolve_limit(config: &dyn ConfigPort) -> Result<Option<usize>, SignalError> {
    Ok(parse_optional::<usize>(config, "data", "limit")?.filter(|&n| n > 0))
}

/// Configured symbols, or every symbol the data source offers.
pub fn resolve_symbols(
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
) -> Result<Vec<String>, SignalError> {
    if let Some(symbols) = config.get_string("data", "symbols") {
        return Ok(parse_symbols(&symbols)?);
    }

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        return Err(SignalError::ConfigMissing {
            section: "data".to_string(),
            key: "symbols".to_string(),
        });
    }
    Ok(symbols)
}

pub fn run_evaluation_pipeline(
    data_port: &(dyn DataPort + Sync),
    template: &StrategyConfig,
    symbols: &[String],
    limit: Option<usize>,
    trades_path: Option<&Path>,
) -> ExitCode {
    tracing::info!(
        strategy = %template.strategy,
        direction = %template.direction,
        symbols = symbols.len(),
        "evaluating strategy"
    );

    let result = match evaluate_universe(data_port, symbols, template, limit) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    print_universe(template, &result);

    if let Some(path) = trades_path {
        let trades = result.all_trades();
        if let Err(e) =
            CsvReportAdapter::new().write_trades(template.strategy, &trades, &path.display().to_string())
        {
            return fail(&e);
        }
        println!("\nTrades written to: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_universe(template: &StrategyConfig, result: &UniverseResult) {
    println!("=== {} {} ===", template.strategy, template.direction);
    for eval in &result.evaluations {
        let s = &eval.evaluation.summary;
        let pnl_sign = if s.total_profit_pct >= 0.0 { "+" } else { "" };
        println!(
            "  {}:  {} bars, {} trades, {:.1}% win rate, {}{:.2}% total, {:.2}% avg",
            eval.symbol,
            eval.bars,
            s.total_trades,
            s.win_rate * 100.0,
            pnl_sign,
            s.total_profit_pct,
            s.avg_profit_per_trade,
        );
        if let Some(open) = &eval.evaluation.open_position {
            println!(
                "    open since {} at {:.4}",
                open.entry_time.to_rfc3339(),
                open.entry_price
            );
        }
    }
    for skipped in &result.skipped {
        println!("  {}:  skipped ({})", skipped.symbol, skipped.reason);
    }

    let aggregate = result.aggregate();
    println!("\n=== Aggregate Results ===");
    println!("Total Trades:     {}", aggregate.total_trades);
    println!("Winning Trades:   {}", aggregate.winning_trades);
    println!("Win Rate:         {:.1}%", aggregate.win_rate * 100.0);
    println!("Total P/L:        {:.2}%", aggregate.total_profit_pct);
    println!("Avg P/L:          {:.2}%", aggregate.avg_profit_per_trade);
    println!("Largest Win:      {:.2}%", aggregate.largest_win_pct);
    println!("Largest Loss:     -{:.2}%", aggregate.largest_loss_pct);
}

fn run_correlation(
    config_path: Option<&PathBuf>,
    matrix: Option<PathBuf>,
    seed: Option<u64>,
    assets: Option<usize>,
    threshold: Option<f64>,
) -> ExitCode {
    let base = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => a,
            Err(code) => return code,
        },
        None => FileConfigAdapter::empty(),
    };
    let config = OverrideConfigAdapter::new(&base)
        .with(
            "correlation",
            "matrix_path",
            matrix.map(|p| p.display().to_string()),
        )
        .with("correlation", "seed", seed.map(|s| s.to_string()))
        .with("correlation", "assets", assets.map(|n| n.to_string()))
        .with("correlation", "threshold", threshold.map(|t| t.to_string()));

    logging::init_logging(&log_settings(&config));

    if let Err(e) = validate_correlation_config(&config) {
        return fail(&e);
    }

    match assess_correlation(&config) {
        Ok(assessment) => {
            print_assessment(&assessment);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

pub fn build_risk_params(config: &dyn ConfigPort) -> Result<RiskParams, SignalError> {
    let defaults = RiskParams::default();
    Ok(RiskParams {
        threshold: parse_optional(config, "correlation", "threshold")?
            .unwrap_or(defaults.threshold),
        target_clique_size: parse_optional(config, "correlation", "target_clique_size")?
            .unwrap_or(defaults.target_clique_size),
        target_independent_size: parse_optional(config, "correlation", "target_independent_size")?
            .unwrap_or(defaults.target_independent_size),
    })
}

/// Matrix from `[correlation] matrix_path`, or a synthetic one. Unseeded runs
/// draw a fresh seed and log it so the run can be replayed.
pub fn resolve_matrix(config: &dyn ConfigPort) -> Result<CorrelationMatrix, SignalError> {
    if let Some(path) = config.get_string("correlation", "matrix_path") {
        return load_matrix(path);
    }

    let assets = parse_optional(config, "correlation", "assets")?.unwrap_or(DEFAULT_ASSETS);
    let seed = match parse_optional::<u64>(config, "correlation", "seed")? {
        Some(seed) => seed,
        None => generator::fresh_seed(),
    };
    tracing::info!(assets, seed, "generating synthetic correlation matrix");
    generator::seeded_matrix(assets, seed)
}

pub fn assess_correlation(config: &dyn ConfigPort) -> Result<RiskAssessment, SignalError> {
    let params = build_risk_params(config)?;
    let matrix = resolve_matrix(config)?;
    Ok(analyze_correlation_risk(matrix, &params))
}

fn format_vertices(vertices: &[usize]) -> String {
    vertices
        .iter()
        .map(|v| format!("A{}", v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_assessment(assessment: &RiskAssessment) {
    println!("=== {} ===", StrategyKind::Ramsey);
    println!("Signal:               {}", assessment.signal);
    println!(
        "Max Clique:           {} [{}]",
        assessment.max_clique_size(),
        format_vertices(&assessment.max_clique)
    );
    println!(
        "Max Independent Set:  {} [{}]",
        assessment.max_independent_size(),
        format_vertices(&assessment.max_independent_set)
    );

    println!("\n=== Correlation Matrix ===");
    for (i, row) in assessment.matrix.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:5.2}", v)).collect();
        println!("  A{:<3} {}", i, cells.join(" "));
    }
}

fn run_strategies() -> ExitCode {
    logging::init_logging(&LogSettings::default());

    println!("{:<8}  {:>6}  {:>8}  description", "name", "window", "min bars");
    for entry in &CATALOG {
        let window = entry.default_window;
        println!(
            "{:<8}  {:>6}  {:>8}  {}",
            entry.kind.name(),
            window,
            entry.minimum_bars(window),
            entry.description
        );
    }
    println!(
        "{:<8}  {:>6}  {:>8}  correlation clique risk over {} assets (sigtrader correlation)",
        StrategyKind::Ramsey.name(),
        "-",
        "-",
        DEFAULT_ASSETS
    );
    ExitCode::SUCCESS
}

pub fn run_validate(config_path: &Path, correlation: bool) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let result = if correlation {
        validate_correlation_config(&config)
    } else {
        validate_evaluation_config(&config)
    };

    match result {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
