//! Signal engine: the single-position event loop shared by every catalog
//! strategy.
//!
//! One run walks the bar series once from the entry's warm-up index. With no
//! open position the entry predicate is checked; with an open position the
//! exit predicate is checked. A bar never both opens and closes a position.
//! A position still open after the last bar is reported but produces no trade.

use crate::domain::catalog::{self, BarContext, CatalogEntry};
use crate::domain::error::SignalError;
use crate::domain::indicator::{IndicatorBundle, IndicatorSeries, IndicatorType};
use crate::domain::metrics::TradeSummary;
use crate::domain::ohlcv::Bar;
use crate::domain::position::{Position, Trade};
use crate::domain::strategy::StrategyConfig;

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub trades: Vec<Trade>,
    pub summary: TradeSummary,
    pub open_position: Option<Position>,
}

/// Evaluate one catalog strategy over `bars`.
pub fn evaluate(bars: &[Bar], config: &StrategyConfig) -> Result<Evaluation, SignalError> {
    let entry = catalog::lookup(config.strategy).ok_or_else(|| SignalError::UnsupportedStrategy {
        strategy: config.strategy.to_string(),
        reason: "not a single-asset signal strategy".into(),
    })?;

    let window = entry.window(&config.params);
    let minimum = entry.minimum_bars(window);
    if bars.len() < minimum {
        return Err(SignalError::InsufficientData {
            strategy: config.strategy.to_string(),
            bars: bars.len(),
            minimum,
        });
    }

    let [stochastic_type, primary_type] = entry.required_indicators(&config.params);
    let bundle = IndicatorBundle::compute(bars, &[stochastic_type, primary_type]);
    let stochastic = require(&bundle, stochastic_type)?;
    let primary = require(&bundle, primary_type)?;

    tracing::debug!(
        strategy = %config.strategy,
        symbol = %config.symbol,
        direction = %config.direction,
        bars = bars.len(),
        window,
        "evaluating strategy"
    );

    let (trades, open_position) = run_signal_loop(bars, entry, window, stochastic, primary, config);
    let summary = TradeSummary::compute(&trades);

    Ok(Evaluation {
        trades,
        summary,
        open_position,
    })
}

fn require(bundle: &IndicatorBundle, indicator_type: IndicatorType) -> Result<&IndicatorSeries, SignalError> {
    bundle.get(&indicator_type).ok_or_else(|| SignalError::Data {
        reason: format!("indicator {indicator_type} was not computed"),
    })
}

fn run_signal_loop(
    bars: &[Bar],
    entry: &CatalogEntry,
    window: usize,
    stochastic: &IndicatorSeries,
    primary: &IndicatorSeries,
    config: &StrategyConfig,
) -> (Vec<Trade>, Option<Position>) {
    let direction = config.direction;
    let primary_mean = primary.nonzero_mean();
    let mut trades = Vec::new();
    let mut open: Option<Position> = None;

    for (i, bar) in bars.iter().enumerate().skip(entry.first_bar(window)) {
        let ctx = BarContext::new(i, bar, stochastic, primary, primary_mean);

        if open.is_none() {
            if (entry.entry)(&ctx, direction) {
                open = Some(Position {
                    entry_index: i,
                    entry_time: bar.local_time,
                    entry_price: bar.close,
                    entry_stochastic: Some(ctx.stochastic()),
                });
            }
        } else if (entry.exit)(&ctx, direction) {
            if let Some(position) = open.take() {
                let trade = position.close(
                    &config.symbol,
                    direction,
                    i,
                    bar.local_time,
                    bar.close,
                    Some(ctx.stochastic()),
                );
                tracing::info!(
                    strategy = %config.strategy,
                    symbol = %trade.symbol,
                    direction = %direction,
                    profit_pct = trade.profit_pct,
                    "{}",
                    trade.log_line(config.strategy.name())
                );
                trades.push(trade);
            }
        }
    }

    (trades, open)
}
