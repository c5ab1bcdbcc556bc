//! Symbol universe: parses symbol lists and evaluates one strategy across
//! every symbol in parallel.
//!
//! Each symbol is a self-contained evaluation with no shared mutable state,
//! so symbols run on scoped worker threads, at most one per available core at
//! a time, and results come back in input order.

use crate::domain::backtest::{Evaluation, evaluate};
use crate::domain::catalog;
use crate::domain::error::SignalError;
use crate::domain::metrics::TradeSummary;
use crate::domain::position::Trade;
use crate::domain::strategy::StrategyConfig;
use crate::ports::data_port::DataPort;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

impl From<UniverseError> for SignalError {
    fn from(err: UniverseError) -> Self {
        SignalError::ConfigInvalid {
            section: "data".into(),
            key: "symbols".into(),
            reason: err.to_string(),
        }
    }
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[derive(Debug, Clone)]
pub struct SymbolEvaluation {
    pub symbol: String,
    pub bars: usize,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    FetchFailed(String),
    InsufficientBars { bars: usize, minimum: usize },
    WorkerPanicked,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data found"),
            SkipReason::FetchFailed(reason) => write!(f, "{}", reason),
            SkipReason::InsufficientBars { bars, minimum } => {
                write!(f, "only {} bars, minimum {} required", bars, minimum)
            }
            SkipReason::WorkerPanicked => write!(f, "evaluation worker panicked"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UniverseResult {
    pub evaluations: Vec<SymbolEvaluation>,
    pub skipped: Vec<SkippedSymbol>,
}

impl UniverseResult {
    /// Every trade across the universe, grouped by symbol in input order.
    pub fn all_trades(&self) -> Vec<Trade> {
        self.evaluations
            .iter()
            .flat_map(|e| e.evaluation.trades.iter().cloned())
            .collect()
    }

    pub fn aggregate(&self) -> TradeSummary {
        TradeSummary::compute(&self.all_trades())
    }
}

enum Outcome {
    Done(SymbolEvaluation),
    Skipped(SkipReason),
    Failed(SignalError),
}

/// Evaluate `template` (its symbol is replaced per run) over every symbol.
///
/// Symbols without usable data are skipped with a warning. Fails when the
/// strategy is not a catalog strategy or when every symbol was skipped.
pub fn evaluate_universe<D>(
    data_port: &D,
    symbols: &[String],
    template: &StrategyConfig,
    limit: Option<usize>,
) -> Result<UniverseResult, SignalError>
where
    D: DataPort + Sync + ?Sized,
{
    let entry = catalog::lookup(template.strategy).ok_or_else(|| SignalError::UnsupportedStrategy {
        strategy: template.strategy.to_string(),
        reason: "not a single-asset signal strategy".into(),
    })?;
    let minimum = entry.minimum_bars(entry.window(&template.params));

    let workers = worker_count(symbols.len());
    tracing::debug!(symbols = symbols.len(), workers, "evaluating universe");

    let mut outcomes: Vec<(String, Outcome)> = Vec::with_capacity(symbols.len());
    for batch in symbols.chunks(workers) {
        std::thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|symbol| {
                    let handle =
                        scope.spawn(move || evaluate_symbol(data_port, symbol, template, limit));
                    (symbol.clone(), handle)
                })
                .collect();

            for (symbol, handle) in handles {
                let outcome = handle
                    .join()
                    .unwrap_or(Outcome::Skipped(SkipReason::WorkerPanicked));
                outcomes.push((symbol, outcome));
            }
        });
    }

    let mut evaluations = Vec::new();
    let mut skipped = Vec::new();
    for (symbol, outcome) in outcomes {
        match outcome {
            Outcome::Done(evaluation) => {
                tracing::info!(
                    symbol = %symbol,
                    bars = evaluation.bars,
                    trades = evaluation.evaluation.trades.len(),
                    "symbol evaluated"
                );
                evaluations.push(evaluation);
            }
            Outcome::Skipped(reason) => {
                tracing::warn!(symbol = %symbol, "skipping {}: {}", symbol, reason);
                skipped.push(SkippedSymbol { symbol, reason });
            }
            Outcome::Failed(err) => return Err(err),
        }
    }

    if evaluations.is_empty() {
        return Err(SignalError::InsufficientData {
            strategy: template.strategy.to_string(),
            bars: 0,
            minimum,
        });
    }

    if !skipped.is_empty() {
        tracing::warn!(
            evaluated = evaluations.len(),
            total = symbols.len(),
            "evaluated {} of {} symbols",
            evaluations.len(),
            symbols.len()
        );
    }

    Ok(UniverseResult {
        evaluations,
        skipped,
    })
}

/// Threads per batch: one per available core, never more than `symbols`.
fn worker_count(symbols: usize) -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(symbols)
        .max(1)
}

fn evaluate_symbol<D>(
    data_port: &D,
    symbol: &str,
    template: &StrategyConfig,
    limit: Option<usize>,
) -> Outcome
where
    D: DataPort + ?Sized,
{
    let bars = match data_port.fetch_bars(symbol, limit) {
        Ok(bars) => bars,
        Err(e) => return Outcome::Skipped(SkipReason::FetchFailed(e.to_string())),
    };
    if bars.is_empty() {
        return Outcome::Skipped(SkipReason::NoData);
    }

    let mut config = template.clone();
    config.symbol = symbol.to_string();
    match evaluate(&bars, &config) {
        Ok(evaluation) => Outcome::Done(SymbolEvaluation {
            symbol: symbol.to_string(),
            bars: bars.len(),
            evaluation,
        }),
        Err(SignalError::InsufficientData { bars, minimum, .. }) => {
            Outcome::Skipped(SkipReason::InsufficientBars { bars, minimum })
        }
        Err(e) => Outcome::Failed(e),
    }
}
