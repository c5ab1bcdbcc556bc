//! Bar provider port.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::Bar;

pub trait DataPort {
    /// Bars for `symbol` in chronological order. With `limit`, only the most
    /// recent `limit` bars are returned.
    fn fetch_bars(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<Bar>, SignalError>;

    fn list_symbols(&self) -> Result<Vec<String>, SignalError>;
}

/// Keep the last `limit` bars.
pub fn apply_limit(mut bars: Vec<Bar>, limit: Option<usize>) -> Vec<Bar> {
    if let Some(limit) = limit {
        if bars.len() > limit {
            bars.drain(..bars.len() - limit);
        }
    }
    bars
}
