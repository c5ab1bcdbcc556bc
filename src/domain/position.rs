//! Position tracking and completed trades.

use crate::domain::error::SignalError;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            _ => Err(SignalError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// The single open position of an evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub entry_index: usize,
    pub entry_time: DateTime<FixedOffset>,
    pub entry_price: f64,
    pub entry_stochastic: Option<f64>,
}

impl Position {
    /// Close at `exit_index`. Panics in debug builds if the exit does not
    /// follow the entry.
    pub fn close(
        self,
        symbol: &str,
        direction: Direction,
        exit_index: usize,
        exit_time: DateTime<FixedOffset>,
        exit_price: f64,
        exit_stochastic: Option<f64>,
    ) -> Trade {
        debug_assert!(exit_index > self.entry_index);
        Trade {
            symbol: symbol.to_string(),
            entry_index: self.entry_index,
            entry_time: self.entry_time,
            entry_price: self.entry_price,
            exit_index,
            exit_time,
            exit_price,
            direction,
            profit_pct: profit_pct(self.entry_price, exit_price, direction),
            entry_stochastic: self.entry_stochastic,
            exit_stochastic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub symbol: String,
    pub entry_index: usize,
    pub entry_time: DateTime<FixedOffset>,
    pub entry_price: f64,
    pub exit_index: usize,
    pub exit_time: DateTime<FixedOffset>,
    pub exit_price: f64,
    pub direction: Direction,
    pub profit_pct: f64,
    pub entry_stochastic: Option<f64>,
    pub exit_stochastic: Option<f64>,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.profit_pct > 0.0
    }

    pub fn bars_held(&self) -> usize {
        self.exit_index - self.entry_index
    }

    /// Human-readable line for the trade log.
    pub fn log_line(&self, strategy: &str) -> String {
        let (side, open_verb, close_verb) = match self.direction {
            Direction::Long => ("Long", "Buy", "Sell"),
            Direction::Short => ("Short", "Sell", "Cover"),
        };
        format!(
            "{strategy} {side} trade for {symbol}: {open_verb} at {entry} (price: {entry_price:.4}) | \
             {close_verb} at {exit} (price: {exit_price:.4}) | P/L: {pnl:.2}%",
            symbol = self.symbol,
            entry = self.entry_time.to_rfc3339(),
            entry_price = self.entry_price,
            exit = self.exit_time.to_rfc3339(),
            exit_price = self.exit_price,
            pnl = self.profit_pct,
        )
    }
}

/// Direction-aware profit percentage. A zero entry price yields 0.
pub fn profit_pct(entry_price: f64, exit_price: f64, direction: Direction) -> f64 {
    if entry_price == 0.0 {
        return 0.0;
    }
    match direction {
        Direction::Long => (exit_price - entry_price) / entry_price * 100.0,
        Direction::Short => (entry_price - exit_price) / entry_price * 100.0,
    }
}
