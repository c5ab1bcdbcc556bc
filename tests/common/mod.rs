#![allow(dead_code)]

use sigtrader::domain::error::SignalError;
pub use sigtrader::domain::ohlcv::Bar;
use sigtrader::domain::ohlcv::default_offset;
use sigtrader::ports::data_port::{DataPort, apply_limit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<Bar>, SignalError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SignalError::Data {
                reason: reason.clone(),
            });
        }
        Ok(apply_limit(
            self.data.get(symbol).cloned().unwrap_or_default(),
            limit,
        ))
    }

    fn list_symbols(&self) -> Result<Vec<String>, SignalError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub const START_MS: i64 = 1_704_067_200_000;

/// Bar at minute `i` with an explicit high/low band around `close`.
pub fn make_bar(i: usize, high: f64, low: f64, close: f64) -> Bar {
    Bar::from_millis(
        START_MS + i as i64 * 60_000,
        close,
        high,
        low,
        close,
        1_000.0,
        default_offset(),
    )
    .unwrap()
}

/// Bars with a ±0.5 band around each close.
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c + 0.5, c - 0.5, c))
        .collect()
}

pub fn flat_bars(n: usize, price: f64) -> Vec<Bar> {
    (0..n).map(|i| make_bar(i, price, price, price)).collect()
}

/// Repeating 8-bar swing: trough 92 at i % 8 == 2, peak 108 at i % 8 == 6.
pub fn zigzag_bars(cycles: usize) -> Vec<Bar> {
    let pattern = [100.0, 96.0, 92.0, 96.0, 100.0, 104.0, 108.0, 104.0];
    let closes: Vec<f64> = (0..cycles * pattern.len())
        .map(|i| pattern[i % pattern.len()])
        .collect();
    make_bars(&closes)
}

/// Seeded random walk with steps of up to ±1% per bar.
pub fn random_walk(n: usize, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0_f64;
    let closes: Vec<f64> = (0..n)
        .map(|_| {
            let step: f64 = rng.gen_range(-1.0..1.0);
            price = (price * (1.0 + step * 0.01)).max(1.0);
            price
        })
        .collect();
    make_bars(&closes)
}

/// 50 calm bars oscillating 100 ± 0.1, a 10-bar slide to 95.9, then 16 bars
/// alternating +4% / -1%. Volatility stays near 0.002 until bar 61 and
/// clears 1.5x its mean from bar 63 on.
pub fn calm_then_burst_bars() -> Vec<Bar> {
    let wiggle = |i: usize| if i % 2 == 0 { 0.1 } else { -0.1 };
    let mut closes: Vec<f64> = (0..50).map(|i| 100.0 + wiggle(i)).collect();

    let mut price = 100.0_f64;
    for i in 0..10 {
        price -= 0.4;
        closes.push(price + wiggle(i));
    }

    let mut price = closes[closes.len() - 1];
    for k in 0..16 {
        price *= if k % 2 == 0 { 1.04 } else { 0.99 };
        closes.push(price);
    }
    make_bars(&closes)
}

pub fn bars_to_csv(bars: &[Bar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}
