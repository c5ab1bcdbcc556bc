//! Rolling price and return z-scores.
//!
//! PRICE_Z(n)[i]  = (C[i] - mean(C[i-n .. i-1])) / max(std, 1e-8)
//! RETURN_Z(n)[i] = (R[i] - mean(R[i-n .. i-1])) / max(std, 1e-8)
//!
//! std is the population standard deviation of the window. The first n bars
//! are invalid and hold 0.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{floored_zscore, log_returns};
use crate::domain::ohlcv::Bar;

pub fn calculate_price_zscore(bars: &[Bar], window: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries {
        indicator_type: IndicatorType::PriceZScore(window.max(1)),
        values: rolling_zscore(bars, &closes, window),
    }
}

pub fn calculate_return_zscore(bars: &[Bar], window: usize) -> IndicatorSeries {
    let returns = log_returns(bars);
    IndicatorSeries {
        indicator_type: IndicatorType::ReturnZScore(window.max(1)),
        values: rolling_zscore(bars, &returns, window),
    }
}

fn rolling_zscore(bars: &[Bar], inputs: &[f64], window: usize) -> Vec<IndicatorPoint> {
    let window = window.max(1);
    (0..bars.len())
        .map(|i| {
            let valid = i >= window;
            let z = if valid {
                floored_zscore(inputs[i], &inputs[i - window..i])
            } else {
                0.0
            };
            IndicatorPoint {
                timestamp: bars[i].timestamp,
                valid,
                value: IndicatorValue::Simple(z),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::make_bars;
    use approx::assert_relative_eq;

    #[test]
    fn price_zscore_constant_is_zero() {
        let series = calculate_price_zscore(&make_bars(&[42.0; 30]), 20);
        for i in 0..30 {
            assert_eq!(series.simple(i), Some(0.0));
        }
        assert!(series.values[20].valid);
        assert!(!series.values[19].valid);
    }

    #[test]
    fn price_zscore_known_value() {
        // window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population std 2
        let bars = make_bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 11.0]);
        let series = calculate_price_zscore(&bars, 8);
        assert_relative_eq!(series.simple(8).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn return_zscore_flat_prices_is_zero() {
        let series = calculate_return_zscore(&make_bars(&[100.0; 20]), 5);
        for i in 0..20 {
            assert_eq!(series.simple(i), Some(0.0));
        }
    }

    #[test]
    fn return_zscore_spike_is_positive() {
        let mut prices = vec![100.0, 101.0, 100.0, 101.0, 100.0, 101.0];
        prices.push(110.0);
        let series = calculate_return_zscore(&make_bars(&prices), 5);
        assert!(series.simple(6).unwrap() > 1.0);
    }
}
