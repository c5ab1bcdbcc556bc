//! Local extrema flags.
//!
//! Bar i (1 <= i < n-1) is a local minimum when C[i] is strictly below both
//! neighbours, a local maximum when strictly above both. The first and last
//! bars are never flagged and are marked invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub fn calculate_local_extrema(bars: &[Bar]) -> IndicatorSeries {
    let n = bars.len();
    let values = (0..n)
        .map(|i| {
            let interior = i >= 1 && i + 1 < n;
            let (local_min, local_max) = if interior {
                let (prev, curr, next) = (bars[i - 1].close, bars[i].close, bars[i + 1].close);
                (curr < prev && curr < next, curr > prev && curr > next)
            } else {
                (false, false)
            };
            IndicatorPoint {
                timestamp: bars[i].timestamp,
                valid: interior,
                value: IndicatorValue::Extremum {
                    local_min,
                    local_max,
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::LocalExtrema,
        values,
    }
}
