//! Log returns and rolling log-return volatility.
//!
//! LOG_RETURN[i] = ln(C[i] / C[i-1]), 0 at i = 0.
//! VOLATILITY(n)[i] = sample stddev of LOG_RETURN[i-n .. i-1]
//! Warmup: first n bars are invalid and hold 0.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{log_returns, sample_std};
use crate::domain::ohlcv::Bar;

pub fn calculate_log_return(bars: &[Bar]) -> IndicatorSeries {
    let values = log_returns(bars)
        .into_iter()
        .enumerate()
        .map(|(i, r)| IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid: i > 0,
            value: IndicatorValue::Simple(r),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::LogReturn,
        values,
    }
}

pub fn calculate_volatility(bars: &[Bar], window: usize) -> IndicatorSeries {
    let window = window.max(1);
    let returns = log_returns(bars);
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let valid = i >= window;
        let value = if valid {
            sample_std(&returns[i - window..i])
        } else {
            0.0
        };
        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid,
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Volatility(window),
        values,
    }
}
