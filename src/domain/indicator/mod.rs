//! Indicator library.
//!
//! Every indicator is a batch computation over the full bar sequence and
//! returns an `IndicatorSeries` of the same length:
//! - `IndicatorPoint`: a single point in an indicator series
//! - `IndicatorValue`: enum for the different indicator output shapes
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorBundle`: the set of series one strategy evaluation reads
//!
//! Points before an indicator's warm-up are marked `valid: false` and hold
//! the indicator's neutral sentinel value.

pub mod extrema;
pub mod phase;
pub mod regression;
pub mod stochastic;
pub mod volatility;
pub mod zscore;

use crate::domain::ohlcv::Bar;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Deviation { deviation: f64, threshold: f64 },
    Extremum { local_min: bool, local_max: bool },
    Phase { phase: f64, momentum: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Stochastic(usize),
    LogReturn,
    Volatility(usize),
    PriceZScore(usize),
    ReturnZScore(usize),
    SegmentedRegression(usize),
    LocalExtrema,
    BollingerPhase(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of the non-zero scalar values. Warm-up sentinels (0) drop out.
    pub fn nonzero_mean(&self) -> f64 {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(|p| match p.value {
                IndicatorValue::Simple(v) if v != 0.0 => Some(v),
                _ => None,
            })
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Scalar value at `index`, sentinel included. Non-scalar shapes yield `None`.
    pub fn simple(&self, index: usize) -> Option<f64> {
        match self.values.get(index)?.value {
            IndicatorValue::Simple(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Stochastic(period) => write!(f, "STOCHASTIC({})", period),
            IndicatorType::LogReturn => write!(f, "LOG_RETURN"),
            IndicatorType::Volatility(window) => write!(f, "VOLATILITY({})", window),
            IndicatorType::PriceZScore(window) => write!(f, "PRICE_Z({})", window),
            IndicatorType::ReturnZScore(window) => write!(f, "RETURN_Z({})", window),
            IndicatorType::SegmentedRegression(window) => write!(f, "SEG_REGRESSION({})", window),
            IndicatorType::LocalExtrema => write!(f, "LOCAL_EXTREMA"),
            IndicatorType::BollingerPhase(window) => write!(f, "BOLLINGER_PHASE({})", window),
        }
    }
}

/// Compute a single indicator series over `bars`.
pub fn calculate(bars: &[Bar], indicator_type: IndicatorType) -> IndicatorSeries {
    match indicator_type {
        IndicatorType::Stochastic(period) => stochastic::calculate_stochastic(bars, period),
        IndicatorType::LogReturn => volatility::calculate_log_return(bars),
        IndicatorType::Volatility(window) => volatility::calculate_volatility(bars, window),
        IndicatorType::PriceZScore(window) => zscore::calculate_price_zscore(bars, window),
        IndicatorType::ReturnZScore(window) => zscore::calculate_return_zscore(bars, window),
        IndicatorType::SegmentedRegression(window) => {
            regression::calculate_segmented_regression(bars, window)
        }
        IndicatorType::LocalExtrema => extrema::calculate_local_extrema(bars),
        IndicatorType::BollingerPhase(window) => phase::calculate_bollinger_phase(bars, window),
    }
}

/// Pre-computed indicator series for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBundle {
    series: HashMap<IndicatorType, IndicatorSeries>,
}

impl IndicatorBundle {
    pub fn compute(bars: &[Bar], types: &[IndicatorType]) -> Self {
        let mut series = HashMap::with_capacity(types.len());
        for &indicator_type in types {
            series
                .entry(indicator_type)
                .or_insert_with(|| calculate(bars, indicator_type));
        }
        Self { series }
    }

    pub fn get(&self, indicator_type: &IndicatorType) -> Option<&IndicatorSeries> {
        self.series.get(indicator_type)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
