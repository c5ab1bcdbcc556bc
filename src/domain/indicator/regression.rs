//! Segmented-regression deviation.
//!
//! For the n closes preceding bar i, split at their median into an upper
//! segment (close > median) and a lower segment (the rest), keeping the
//! original order inside each segment. Fit a least-squares slope to each
//! segment against its position, average the two slopes, and project
//!
//!   mirror = (last(upper) + last(lower)) / 2 + avg_slope
//!
//! The point carries |C[i] - mirror| and a threshold of 0.3% of C[i].
//! Bars before the window, or with a segment shorter than two points, are
//! invalid with deviation 0.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{median, regression_slope};
use crate::domain::ohlcv::Bar;

pub const THRESHOLD_FRACTION: f64 = 0.003;
const MIN_SEGMENT: usize = 2;

pub fn calculate_segmented_regression(bars: &[Bar], window: usize) -> IndicatorSeries {
    let window = window.max(1);
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let price = closes[i];
        let threshold = price * THRESHOLD_FRACTION;

        let mirror = if i >= window {
            mirror_price(&closes[i - window..i])
        } else {
            None
        };

        let (valid, deviation) = match mirror {
            Some(m) => (true, (price - m).abs()),
            None => (false, 0.0),
        };

        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid,
            value: IndicatorValue::Deviation {
                deviation,
                threshold,
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::SegmentedRegression(window),
        values,
    }
}

fn mirror_price(prices: &[f64]) -> Option<f64> {
    let pivot = median(prices);
    let (upper, lower): (Vec<f64>, Vec<f64>) = prices.iter().copied().partition(|&p| p > pivot);

    if upper.len() < MIN_SEGMENT || lower.len() < MIN_SEGMENT {
        return None;
    }

    let slope = (regression_slope(&upper) + regression_slope(&lower)) / 2.0;
    let anchor = (upper[upper.len() - 1] + lower[lower.len() - 1]) / 2.0;
    Some(anchor + slope)
}
