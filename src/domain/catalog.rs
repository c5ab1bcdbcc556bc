//! Declarative strategy catalog.
//!
//! Each single-asset strategy is one `CatalogEntry`: the indicator it reads
//! (next to the stochastic oscillator every entry uses as confirmation),
//! its window defaults and data requirements, and one entry and one exit
//! predicate. Predicates are pure functions of the values at the current
//! bar and the trade direction; the short side mirrors the long side.
//!
//! Adding a strategy means adding a row to `CATALOG`.

use crate::domain::indicator::stochastic::NEUTRAL;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator::phase::NEUTRAL_PHASE;
use crate::domain::ohlcv::Bar;
use crate::domain::position::Direction;
use crate::domain::strategy::{StrategyKind, StrategyParams};

pub const OVERSOLD: f64 = 20.0;
pub const OVERBOUGHT: f64 = 80.0;
pub const Z_THRESHOLD: f64 = 1.0;
pub const VOLATILITY_MULTIPLIER: f64 = 1.5;
pub const MOMENTUM_THRESHOLD: f64 = 0.0005;
pub const PHASE_LOW: f64 = 0.3;
pub const PHASE_HIGH: f64 = 0.7;

pub type Predicate = fn(&BarContext<'_>, Direction) -> bool;

/// Minimum number of bars an evaluation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinBars {
    Fixed(usize),
    Window,
    WindowPlusOne,
}

/// First bar index the signal loop visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmUp {
    Fixed(usize),
    Window,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub kind: StrategyKind,
    pub description: &'static str,
    pub default_window: usize,
    pub min_bars: MinBars,
    pub warm_up: WarmUp,
    pub primary: fn(usize) -> IndicatorType,
    pub entry: Predicate,
    pub exit: Predicate,
}

impl CatalogEntry {
    pub fn window(&self, params: &StrategyParams) -> usize {
        params.window.unwrap_or(self.default_window)
    }

    pub fn minimum_bars(&self, window: usize) -> usize {
        match self.min_bars {
            MinBars::Fixed(n) => n,
            MinBars::Window => window,
            MinBars::WindowPlusOne => window.saturating_add(1),
        }
    }

    pub fn first_bar(&self, window: usize) -> usize {
        match self.warm_up {
            WarmUp::Fixed(n) => n,
            WarmUp::Window => window,
        }
    }

    /// Every indicator series an evaluation of this entry reads.
    pub fn required_indicators(&self, params: &StrategyParams) -> [IndicatorType; 2] {
        [
            IndicatorType::Stochastic(params.stochastic_period),
            (self.primary)(self.window(params)),
        ]
    }
}

/// Indicator values visible to a predicate at one bar.
#[derive(Debug, Clone, Copy)]
pub struct BarContext<'a> {
    pub index: usize,
    pub bar: &'a Bar,
    stochastic: &'a IndicatorSeries,
    primary: &'a IndicatorSeries,
    primary_mean: f64,
}

impl<'a> BarContext<'a> {
    pub fn new(
        index: usize,
        bar: &'a Bar,
        stochastic: &'a IndicatorSeries,
        primary: &'a IndicatorSeries,
        primary_mean: f64,
    ) -> Self {
        Self {
            index,
            bar,
            stochastic,
            primary,
            primary_mean,
        }
    }

    pub fn stochastic(&self) -> f64 {
        self.stochastic.simple(self.index).unwrap_or(NEUTRAL)
    }

    /// Scalar primary value, sentinel included.
    pub fn value(&self) -> f64 {
        self.primary.simple(self.index).unwrap_or(0.0)
    }

    /// Mean of the primary series' non-zero values over the whole run.
    pub fn primary_mean(&self) -> f64 {
        self.primary_mean
    }

    /// (deviation, threshold) when the regression signal is enabled at this bar.
    pub fn deviation(&self) -> Option<(f64, f64)> {
        let point = self.primary.values.get(self.index)?;
        match point.value {
            IndicatorValue::Deviation {
                deviation,
                threshold,
            } if point.valid => Some((deviation, threshold)),
            _ => None,
        }
    }

    /// (local_min, local_max)
    pub fn extremum(&self) -> (bool, bool) {
        match self.primary.values.get(self.index).map(|p| &p.value) {
            Some(IndicatorValue::Extremum {
                local_min,
                local_max,
            }) => (*local_min, *local_max),
            _ => (false, false),
        }
    }

    /// (phase, momentum)
    pub fn phase(&self) -> (f64, f64) {
        match self.primary.values.get(self.index).map(|p| &p.value) {
            Some(IndicatorValue::Phase { phase, momentum }) => (*phase, *momentum),
            _ => (NEUTRAL_PHASE, 0.0),
        }
    }

    fn oversold(&self) -> bool {
        self.stochastic() < OVERSOLD
    }

    fn overbought(&self) -> bool {
        self.stochastic() > OVERBOUGHT
    }

    /// Stochastic confirmation for opening in `direction`.
    fn confirms_entry(&self, direction: Direction) -> bool {
        match direction {
            Direction::Long => self.oversold(),
            Direction::Short => self.overbought(),
        }
    }

    /// Stochastic confirmation for closing in `direction`.
    fn confirms_exit(&self, direction: Direction) -> bool {
        match direction {
            Direction::Long => self.overbought(),
            Direction::Short => self.oversold(),
        }
    }
}

pub static CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        kind: StrategyKind::Kage,
        description: "rolling log-return volatility against 1.5x its mean",
        default_window: 30,
        min_bars: MinBars::Fixed(1),
        warm_up: WarmUp::Window,
        primary: IndicatorType::Volatility,
        entry: kage_entry,
        exit: kage_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Kitsune,
        description: "rolling price z-score",
        default_window: 20,
        min_bars: MinBars::Fixed(1),
        warm_up: WarmUp::Window,
        primary: IndicatorType::PriceZScore,
        entry: zscore_entry,
        exit: zscore_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Ryu,
        description: "rolling log-return z-score",
        default_window: 50,
        min_bars: MinBars::WindowPlusOne,
        warm_up: WarmUp::Window,
        primary: IndicatorType::ReturnZScore,
        entry: zscore_entry,
        exit: zscore_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Sakura,
        description: "segmented-regression mirror price deviation",
        default_window: 50,
        min_bars: MinBars::Window,
        warm_up: WarmUp::Window,
        primary: IndicatorType::SegmentedRegression,
        entry: sakura_entry,
        exit: sakura_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Hikari,
        description: "single-bar log-return momentum",
        default_window: 30,
        min_bars: MinBars::WindowPlusOne,
        warm_up: WarmUp::Window,
        primary: log_return,
        entry: hikari_entry,
        exit: hikari_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Tenshi,
        description: "local extrema of closing prices",
        default_window: 1,
        min_bars: MinBars::Fixed(3),
        warm_up: WarmUp::Fixed(1),
        primary: local_extrema,
        entry: tenshi_entry,
        exit: tenshi_exit,
    },
    CatalogEntry {
        kind: StrategyKind::Zen,
        description: "Bollinger band phase with momentum sign",
        default_window: 20,
        min_bars: MinBars::WindowPlusOne,
        warm_up: WarmUp::Window,
        primary: IndicatorType::BollingerPhase,
        entry: zen_entry,
        exit: zen_exit,
    },
];

pub fn lookup(kind: StrategyKind) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.kind == kind)
}

fn log_return(_window: usize) -> IndicatorType {
    IndicatorType::LogReturn
}

fn local_extrema(_window: usize) -> IndicatorType {
    IndicatorType::LocalExtrema
}

fn kage_entry(c: &BarContext<'_>, d: Direction) -> bool {
    c.value() < VOLATILITY_MULTIPLIER * c.primary_mean() && c.confirms_entry(d)
}

fn kage_exit(c: &BarContext<'_>, d: Direction) -> bool {
    c.value() > VOLATILITY_MULTIPLIER * c.primary_mean() && c.confirms_exit(d)
}

fn zscore_entry(c: &BarContext<'_>, d: Direction) -> bool {
    let stretched = match d {
        Direction::Long => c.value() < -Z_THRESHOLD,
        Direction::Short => c.value() > Z_THRESHOLD,
    };
    stretched && c.confirms_entry(d)
}

fn zscore_exit(c: &BarContext<'_>, d: Direction) -> bool {
    let reverted = match d {
        Direction::Long => c.value() > Z_THRESHOLD,
        Direction::Short => c.value() < -Z_THRESHOLD,
    };
    reverted && c.confirms_exit(d)
}

fn sakura_entry(c: &BarContext<'_>, d: Direction) -> bool {
    c.deviation().is_some_and(|(dev, thr)| dev < thr) && c.confirms_entry(d)
}

fn sakura_exit(c: &BarContext<'_>, d: Direction) -> bool {
    c.deviation().is_some_and(|(dev, thr)| dev > thr) && c.confirms_exit(d)
}

fn hikari_entry(c: &BarContext<'_>, d: Direction) -> bool {
    let momentum = match d {
        Direction::Long => c.value() > MOMENTUM_THRESHOLD,
        Direction::Short => c.value() < -MOMENTUM_THRESHOLD,
    };
    momentum && c.confirms_entry(d)
}

fn hikari_exit(c: &BarContext<'_>, d: Direction) -> bool {
    let faded = match d {
        Direction::Long => c.value() < 0.0,
        Direction::Short => c.value() > 0.0,
    };
    faded && c.confirms_exit(d)
}

fn tenshi_entry(c: &BarContext<'_>, d: Direction) -> bool {
    let (local_min, local_max) = c.extremum();
    let turn = match d {
        Direction::Long => local_min,
        Direction::Short => local_max,
    };
    turn && c.confirms_entry(d)
}

fn tenshi_exit(c: &BarContext<'_>, d: Direction) -> bool {
    let (local_min, local_max) = c.extremum();
    let turn = match d {
        Direction::Long => local_max,
        Direction::Short => local_min,
    };
    turn && c.confirms_exit(d)
}

fn zen_entry(c: &BarContext<'_>, d: Direction) -> bool {
    let (phase, momentum) = c.phase();
    let setup = match d {
        Direction::Long => phase < PHASE_LOW && momentum > 0.0,
        Direction::Short => phase > PHASE_HIGH && momentum < 0.0,
    };
    setup && c.confirms_entry(d)
}

fn zen_exit(c: &BarContext<'_>, d: Direction) -> bool {
    let (phase, _) = c.phase();
    let target = match d {
        Direction::Long => phase > PHASE_HIGH,
        Direction::Short => phase < PHASE_LOW,
    };
    target && c.confirms_exit(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::make_bar;
    use crate::domain::indicator::IndicatorPoint;

    fn series(indicator_type: IndicatorType, value: IndicatorValue, valid: bool) -> IndicatorSeries {
        IndicatorSeries {
            indicator_type,
            values: vec![IndicatorPoint {
                timestamp: 0,
                valid,
                value,
            }],
        }
    }

    fn stoch(v: f64) -> IndicatorSeries {
        series(IndicatorType::Stochastic(14), IndicatorValue::Simple(v), true)
    }

    fn check(
        kind: StrategyKind,
        primary: &IndicatorSeries,
        stochastic: f64,
        mean: f64,
    ) -> [(bool, bool); 2] {
        let bar = make_bar(0, 1.0, 1.0, 1.0);
        let st = stoch(stochastic);
        let ctx = BarContext::new(0, &bar, &st, primary, mean);
        let entry = lookup(kind).unwrap();
        [Direction::Long, Direction::Short].map(|d| ((entry.entry)(&ctx, d), (entry.exit)(&ctx, d)))
    }

    #[test]
    fn catalog_has_every_single_asset_strategy() {
        for kind in StrategyKind::ALL {
            assert_eq!(lookup(kind).is_some(), kind != StrategyKind::Ramsey, "{kind}");
        }
    }

    #[test]
    fn minimum_bars_match_strategy_requirements() {
        let params = StrategyParams::default();
        let minimum = |k| {
            let e = lookup(k).unwrap();
            e.minimum_bars(e.window(&params))
        };
        assert_eq!(minimum(StrategyKind::Ryu), 51);
        assert_eq!(minimum(StrategyKind::Hikari), 31);
        assert_eq!(minimum(StrategyKind::Tenshi), 3);
        assert_eq!(minimum(StrategyKind::Zen), 21);
        assert_eq!(minimum(StrategyKind::Sakura), 50);
        assert_eq!(minimum(StrategyKind::Kage), 1);
    }

    #[test]
    fn required_indicators_follow_params() {
        let entry = lookup(StrategyKind::Kitsune).unwrap();
        let params = StrategyParams {
            stochastic_period: 9,
            window: Some(12),
        };
        assert_eq!(
            entry.required_indicators(&params),
            [IndicatorType::Stochastic(9), IndicatorType::PriceZScore(12)]
        );
    }

    #[test]
    fn minimum_bars_saturates_on_huge_window() {
        let entry = lookup(StrategyKind::Ryu).unwrap();
        assert_eq!(entry.minimum_bars(usize::MAX), usize::MAX);
    }

    #[test]
    fn every_row_reads_its_own_indicator() {
        let params = StrategyParams {
            stochastic_period: 7,
            window: Some(11),
        };
        let expected = [
            (StrategyKind::Kage, IndicatorType::Volatility(11)),
            (StrategyKind::Kitsune, IndicatorType::PriceZScore(11)),
            (StrategyKind::Ryu, IndicatorType::ReturnZScore(11)),
            (StrategyKind::Sakura, IndicatorType::SegmentedRegression(11)),
            (StrategyKind::Hikari, IndicatorType::LogReturn),
            (StrategyKind::Tenshi, IndicatorType::LocalExtrema),
            (StrategyKind::Zen, IndicatorType::BollingerPhase(11)),
        ];
        assert_eq!(CATALOG.len(), expected.len());
        for (kind, primary) in expected {
            assert_eq!(
                lookup(kind).unwrap().required_indicators(&params),
                [IndicatorType::Stochastic(7), primary],
                "{kind}"
            );
        }
    }

    #[test]
    fn kage_thresholds() {
        let vol = |v| series(IndicatorType::Volatility(30), IndicatorValue::Simple(v), true);
        // threshold = 1.5 * 0.01 = 0.015
        assert_eq!(check(StrategyKind::Kage, &vol(0.01), 10.0, 0.01), [(true, false), (false, false)]);
        assert_eq!(check(StrategyKind::Kage, &vol(0.02), 90.0, 0.01), [(false, true), (false, false)]);
        assert_eq!(check(StrategyKind::Kage, &vol(0.01), 90.0, 0.01), [(false, false), (true, false)]);
        assert_eq!(check(StrategyKind::Kage, &vol(0.02), 10.0, 0.01), [(false, false), (false, true)]);
    }

    #[test]
    fn zscore_thresholds() {
        let z = |v| series(IndicatorType::PriceZScore(20), IndicatorValue::Simple(v), true);
        assert_eq!(check(StrategyKind::Kitsune, &z(-1.5), 10.0, 0.0), [(true, false), (false, true)]);
        assert_eq!(check(StrategyKind::Ryu, &z(1.5), 90.0, 0.0), [(false, true), (true, false)]);
        assert_eq!(check(StrategyKind::Kitsune, &z(-0.5), 10.0, 0.0), [(false, false), (false, false)]);
    }

    #[test]
    fn sakura_requires_enabled_signal() {
        let dev = |d, valid| {
            series(
                IndicatorType::SegmentedRegression(50),
                IndicatorValue::Deviation {
                    deviation: d,
                    threshold: 0.3,
                },
                valid,
            )
        };
        assert_eq!(check(StrategyKind::Sakura, &dev(0.1, true), 10.0, 0.0), [(true, false), (false, false)]);
        assert_eq!(check(StrategyKind::Sakura, &dev(0.0, false), 10.0, 0.0), [(false, false), (false, false)]);
        assert_eq!(check(StrategyKind::Sakura, &dev(0.5, true), 10.0, 0.0), [(false, false), (false, true)]);
    }

    #[test]
    fn hikari_momentum() {
        let r = |v| series(IndicatorType::LogReturn, IndicatorValue::Simple(v), true);
        assert_eq!(check(StrategyKind::Hikari, &r(0.001), 10.0, 0.0), [(true, false), (false, true)]);
        assert_eq!(check(StrategyKind::Hikari, &r(0.0004), 10.0, 0.0), [(false, false), (false, true)]);
        assert_eq!(check(StrategyKind::Hikari, &r(-0.001), 90.0, 0.0), [(false, true), (true, false)]);
    }

    #[test]
    fn tenshi_turns() {
        let ext = |min, max| {
            series(
                IndicatorType::LocalExtrema,
                IndicatorValue::Extremum {
                    local_min: min,
                    local_max: max,
                },
                true,
            )
        };
        assert_eq!(check(StrategyKind::Tenshi, &ext(true, false), 10.0, 0.0), [(true, false), (false, true)]);
        assert_eq!(check(StrategyKind::Tenshi, &ext(false, true), 90.0, 0.0), [(false, true), (true, false)]);
    }

    #[test]
    fn zen_phase_and_momentum() {
        let ph = |phase, momentum| {
            series(IndicatorType::BollingerPhase(20), IndicatorValue::Phase { phase, momentum }, true)
        };
        assert_eq!(check(StrategyKind::Zen, &ph(0.2, 1.0), 10.0, 0.0), [(true, false), (false, true)]);
        assert_eq!(check(StrategyKind::Zen, &ph(0.2, -1.0), 10.0, 0.0), [(false, false), (false, true)]);
        assert_eq!(check(StrategyKind::Zen, &ph(0.8, -1.0), 90.0, 0.0), [(false, true), (true, false)]);
    }

    #[test]
    fn neutral_stochastic_never_confirms() {
        let z = series(IndicatorType::PriceZScore(20), IndicatorValue::Simple(-5.0), true);
        for kind in [StrategyKind::Kitsune, StrategyKind::Ryu] {
            assert_eq!(check(kind, &z, 50.0, 0.0), [(false, false), (false, false)]);
        }
    }
}
