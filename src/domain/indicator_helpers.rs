//! Shared numeric helpers for indicator calculations.

use crate::domain::ohlcv::Bar;

/// Floor applied to rolling standard deviations before dividing by them.
pub const STD_FLOOR: f64 = 1e-8;

/// ln(close[i] / close[i-1]); index 0 is 0.
pub fn log_returns(bars: &[Bar]) -> Vec<f64> {
    let mut returns = vec![0.0; bars.len()];
    for i in 1..bars.len() {
        returns[i] = (bars[i].close / bars[i - 1].close).ln();
    }
    returns
}

/// Arithmetic mean, summed relative to the first value so a constant slice
/// returns that value exactly.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&pivot) = values.first() else {
        return 0.0;
    };
    pivot + values.iter().map(|v| v - pivot).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Sample standard deviation (divides by N - 1). Fewer than two values give 0.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// (value - mean) / max(std, STD_FLOOR) with population std over `window`.
pub fn floored_zscore(value: f64, window: &[f64]) -> f64 {
    let std = population_std(window).max(STD_FLOOR);
    (value - mean(window)) / std
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Least-squares slope of `ys` against x = 0, 1, 2, ...
/// A degenerate x spread (fewer than two points) yields 0.
pub fn regression_slope(ys: &[f64]) -> f64 {
    let n = ys.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in ys.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denom
}
