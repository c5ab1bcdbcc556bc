//! Bounded stochastic oscillator.
//!
//! STOCH(n)[i] = (C[i] - min(L over window)) / (max(H over window) - min(L over window)) * 100
//!
//! The window is the last n bars ending at i, clamped to the available
//! history at the start of the series, so every bar is valid. A zero
//! high/low range yields the neutral value 50.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub const NEUTRAL: f64 = 50.0;

pub fn calculate_stochastic(bars: &[Bar], period: usize) -> IndicatorSeries {
    let period = period.max(1);
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let start = (i + 1).saturating_sub(period);
        let window = &bars[start..=i];

        let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let range = highest - lowest;

        let value = if range == 0.0 {
            NEUTRAL
        } else {
            (bars[i].close - lowest) / range * 100.0
        };

        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid: true,
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Stochastic(period),
        values,
    }
}
