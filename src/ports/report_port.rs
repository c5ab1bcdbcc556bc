//! Trade report port.

use crate::domain::error::SignalError;
use crate::domain::position::Trade;
use crate::domain::strategy::StrategyKind;

/// Port for writing completed trades somewhere durable.
pub trait ReportPort {
    fn write_trades(
        &self,
        strategy: StrategyKind,
        trades: &[Trade],
        output_path: &str,
    ) -> Result<(), SignalError>;
}
