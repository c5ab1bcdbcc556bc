//! Strategy identifiers and per-run configuration.

use crate::domain::error::SignalError;
use crate::domain::position::Direction;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Kage,
    Kitsune,
    Ryu,
    Sakura,
    Hikari,
    Tenshi,
    Zen,
    /// Multi-asset correlation clique analysis; has no single-asset catalog entry.
    Ramsey,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::Kage,
        StrategyKind::Kitsune,
        StrategyKind::Ryu,
        StrategyKind::Sakura,
        StrategyKind::Hikari,
        StrategyKind::Tenshi,
        StrategyKind::Zen,
        StrategyKind::Ramsey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Kage => "KAGE",
            StrategyKind::Kitsune => "KITSUNE",
            StrategyKind::Ryu => "RYU",
            StrategyKind::Sakura => "SAKURA",
            StrategyKind::Hikari => "HIKARI",
            StrategyKind::Tenshi => "TENSHI",
            StrategyKind::Zen => "ZEN",
            StrategyKind::Ramsey => "RAMSEY",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| SignalError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

/// Window parameters. `window: None` means the catalog default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyParams {
    pub stochastic_period: usize,
    pub window: Option<usize>,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            stochastic_period: DEFAULT_STOCHASTIC_PERIOD,
            window: None,
        }
    }
}

/// Immutable configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub symbol: String,
    pub strategy: StrategyKind,
    pub direction: Direction,
    pub params: StrategyParams,
}

impl StrategyConfig {
    pub fn new(symbol: &str, strategy: StrategyKind, direction: Direction) -> Self {
        Self {
            symbol: symbol.to_string(),
            strategy,
            direction,
            params: StrategyParams::default(),
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.params.window = Some(window);
        self
    }

    pub fn with_stochastic_period(mut self, period: usize) -> Self {
        self.params.stochastic_period = period;
        self
    }
}
