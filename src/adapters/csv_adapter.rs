//! CSV file bar adapter.
//!
//! Files carry a header row followed by
//! `timestamp_ms,open,high,low,close,volume`. The adapter points either at a
//! single file (served for every symbol) or at a directory holding one
//! `<SYMBOL>.csv` per symbol. Rows are returned in file order.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::{DataPort, apply_limit};
use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct CsvAdapter {
    path: PathBuf,
    offset: FixedOffset,
}

impl CsvAdapter {
    pub fn new(path: PathBuf, offset: FixedOffset) -> Self {
        Self { path, offset }
    }

    /// In directory mode `<symbol>.csv`, matched case-insensitively when no
    /// exact file exists.
    fn csv_path(&self, symbol: &str) -> PathBuf {
        if !self.path.is_dir() {
            return self.path.clone();
        }
        let exact = self.path.join(format!("{}.csv", symbol));
        if exact.is_file() {
            return exact;
        }
        fs::read_dir(&self.path)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .find(|path| {
                path.extension().is_some_and(|ext| ext == "csv")
                    && path
                        .file_stem()
                        .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case(symbol))
            })
            .unwrap_or(exact)
    }

    fn read_bars(&self, path: &Path) -> Result<Vec<Bar>, SignalError> {
        let content = fs::read_to_string(path).map_err(|e| SignalError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SignalError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            // header is line 1
            let line = row + 2;

            let timestamp: i64 = parse_field(&record, 0, "timestamp", line)?;
            let open: f64 = parse_field(&record, 1, "open", line)?;
            let high: f64 = parse_field(&record, 2, "high", line)?;
            let low: f64 = parse_field(&record, 3, "low", line)?;
            let close: f64 = parse_field(&record, 4, "close", line)?;
            let volume: f64 = parse_field(&record, 5, "volume", line)?;

            let bar = Bar::from_millis(timestamp, open, high, low, close, volume, self.offset)
                .ok_or_else(|| SignalError::Data {
                    reason: format!("line {}: timestamp {} out of range", line, timestamp),
                })?;
            bars.push(bar);
        }

        Ok(bars)
    }
}

fn parse_field<T>(record: &csv::StringRecord, index: usize, name: &str, line: usize) -> Result<T, SignalError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| SignalError::Data {
            reason: format!("line {}: missing {} column", line, name),
        })?
        .parse()
        .map_err(|e| SignalError::Data {
            reason: format!("line {}: invalid {} value: {}", line, name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<Bar>, SignalError> {
        let path = self.csv_path(symbol);
        let bars = self.read_bars(&path)?;
        tracing::debug!(symbol, path = %path.display(), bars = bars.len(), "loaded bars");
        Ok(apply_limit(bars, limit))
    }

    fn list_symbols(&self) -> Result<Vec<String>, SignalError> {
        if !self.path.is_dir() {
            let stem = self
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().to_uppercase())
                .ok_or_else(|| SignalError::Data {
                    reason: format!("{} has no file name", self.path.display()),
                })?;
            return Ok(vec![stem]);
        }

        let entries = fs::read_dir(&self.path).map_err(|e| SignalError::Data {
            reason: format!("failed to read directory {}: {}", self.path.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SignalError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_uppercase());
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
