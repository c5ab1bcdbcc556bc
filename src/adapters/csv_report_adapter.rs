//! CSV trade report adapter.

use crate::domain::error::SignalError;
use crate::domain::position::{Direction, Trade};
use crate::domain::strategy::StrategyKind;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// One CSV row per completed trade.
#[derive(Debug, Serialize)]
struct TradeRecord<'a> {
    strategy: &'static str,
    symbol: &'a str,
    direction: Direction,
    entry_time: String,
    entry_price: f64,
    exit_time: String,
    exit_price: f64,
    bars_held: usize,
    profit_pct: f64,
    entry_stochastic: Option<f64>,
    exit_stochastic: Option<f64>,
}

impl<'a> TradeRecord<'a> {
    fn new(strategy: StrategyKind, trade: &'a Trade) -> Self {
        Self {
            strategy: strategy.name(),
            symbol: &trade.symbol,
            direction: trade.direction,
            entry_time: trade.entry_time.to_rfc3339(),
            entry_price: trade.entry_price,
            exit_time: trade.exit_time.to_rfc3339(),
            exit_price: trade.exit_price,
            bars_held: trade.bars_held(),
            profit_pct: trade.profit_pct,
            entry_stochastic: trade.entry_stochastic,
            exit_stochastic: trade.exit_stochastic,
        }
    }
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn csv_error(path: &str, e: csv::Error) -> SignalError {
    SignalError::Data {
        reason: format!("failed to write {}: {}", path, e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_trades(
        &self,
        strategy: StrategyKind,
        trades: &[Trade],
        output_path: &str,
    ) -> Result<(), SignalError> {
        let file = File::create(Path::new(output_path))?;
        let mut writer = csv::Writer::from_writer(file);
        for trade in trades {
            writer
                .serialize(TradeRecord::new(strategy, trade))
                .map_err(|e| csv_error(output_path, e))?;
        }
        writer.flush()?;
        tracing::info!(path = output_path, trades = trades.len(), "trade report written");
        Ok(())
    }
}
