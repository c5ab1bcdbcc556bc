//! OHLCV bar representation.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// One price observation. `local_time` is `timestamp` rendered in the
/// configured display offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub local_time: DateTime<FixedOffset>,
}

impl Bar {
    /// Build a bar from a millisecond Unix timestamp. Returns `None` when the
    /// timestamp is outside chrono's representable range.
    pub fn from_millis(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        offset: FixedOffset,
    ) -> Option<Self> {
        let utc = DateTime::from_timestamp_millis(timestamp)?;
        Some(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            local_time: utc.with_timezone(&offset),
        })
    }
}

/// UTC+5:30, the display zone the bar feed historically used.
pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 1800).unwrap_or(Utc.fix())
}
