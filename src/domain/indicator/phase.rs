//! Bollinger-derived normalized phase and momentum.
//!
//! Middle = SMA(n), bands at middle ± 2 × population stddev, both over the n
//! closes ending at bar i.
//!
//! PHASE[i] = (C[i] - lower) / (upper - lower), 0.5 when the band width is
//! zero or the window is incomplete (first n-1 bars, marked invalid).
//! MOMENTUM[i] = C[i] - C[i-1], 0 at i = 0.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{mean, population_std};
use crate::domain::ohlcv::Bar;

pub const NEUTRAL_PHASE: f64 = 0.5;
const BAND_WIDTH_SIGMAS: f64 = 2.0;

pub fn calculate_bollinger_phase(bars: &[Bar], window: usize) -> IndicatorSeries {
    let window = window.max(1);
    let warmup = window - 1;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let valid = i >= warmup;
        let phase = if valid {
            let slice = &closes[i + 1 - window..=i];
            let middle = mean(slice);
            let spread = BAND_WIDTH_SIGMAS * population_std(slice);
            let (upper, lower) = (middle + spread, middle - spread);
            if upper - lower == 0.0 {
                NEUTRAL_PHASE
            } else {
                (closes[i] - lower) / (upper - lower)
            }
        } else {
            NEUTRAL_PHASE
        };

        let momentum = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };

        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid,
            value: IndicatorValue::Phase { phase, momentum },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::BollingerPhase(window),
        values,
    }
}
