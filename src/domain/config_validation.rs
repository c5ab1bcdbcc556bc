//! Configuration validation.
//!
//! Validates config fields before an evaluation or correlation run. Numeric
//! fields are parsed strictly here: a value that is present but malformed is
//! an error, never a silent fallback to the default.

use crate::domain::error::SignalError;
use crate::domain::position::Direction;
use crate::domain::strategy::StrategyKind;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MINUTES_PER_DAY: i64 = 24 * 60;
/// Upper bound for `window` and `stochastic_period`, well above any fetch limit.
pub const MAX_WINDOW: usize = 100_000;

pub fn validate_evaluation_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_data_section(config)?;
    validate_strategy_section(config)?;
    validate_logging_section(config)?;
    Ok(())
}

pub fn validate_correlation_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_asset_count(config)?;
    validate_threshold(config)?;
    validate_target_sizes(config)?;
    parse_optional::<u64>(config, "correlation", "seed")?;
    validate_logging_section(config)?;
    Ok(())
}

/// Parse `[section] key` when present. Missing or blank yields `Ok(None)`.
pub fn parse_optional<T>(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<T>, SignalError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| invalid(section, key, format!("cannot parse '{}': {}", raw, e))),
    }
}

fn invalid(section: &str, key: &str, reason: String) -> SignalError {
    SignalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn validate_data_section(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if config.get_string("data", "csv_path").is_none() {
        return Err(SignalError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        });
    }

    if let Some(symbols) = config.get_string("data", "symbols") {
        parse_symbols(&symbols)?;
    }

    if let Some(offset) = parse_optional::<i64>(config, "data", "utc_offset_minutes")? {
        if offset.abs() >= MINUTES_PER_DAY {
            return Err(invalid(
                "data",
                "utc_offset_minutes",
                "utc_offset_minutes must be within ±24h".to_string(),
            ));
        }
    }

    // usize parse rejects negatives
    parse_optional::<usize>(config, "data", "limit")?;
    Ok(())
}

fn validate_strategy_section(config: &dyn ConfigPort) -> Result<(), SignalError> {
    let name = config
        .get_string("strategy", "name")
        .ok_or_else(|| SignalError::ConfigMissing {
            section: "strategy".to_string(),
            key: "name".to_string(),
        })?;
    let kind: StrategyKind = name.parse()?;
    if kind == StrategyKind::Ramsey {
        return Err(invalid(
            "strategy",
            "name",
            "RAMSEY is a correlation strategy; use the correlation command".to_string(),
        ));
    }

    if let Some(direction) = config.get_string("strategy", "direction") {
        direction.parse::<Direction>()?;
    }

    for key in ["stochastic_period", "window"] {
        match parse_optional::<usize>(config, "strategy", key)? {
            Some(0) => {
                return Err(invalid("strategy", key, format!("{} must be at least 1", key)));
            }
            Some(n) if n > MAX_WINDOW => {
                return Err(invalid(
                    "strategy",
                    key,
                    format!("{} must be at most {}", key, MAX_WINDOW),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_asset_count(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if parse_optional::<usize>(config, "correlation", "assets")? == Some(0) {
        return Err(invalid(
            "correlation",
            "assets",
            "assets must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_threshold(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if let Some(threshold) = parse_optional::<f64>(config, "correlation", "threshold")? {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid(
                "correlation",
                "threshold",
                "threshold must be between 0 and 1".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_target_sizes(config: &dyn ConfigPort) -> Result<(), SignalError> {
    for key in ["target_clique_size", "target_independent_size"] {
        if parse_optional::<usize>(config, "correlation", key)? == Some(0) {
            return Err(invalid("correlation", key, format!("{} must be at least 1", key)));
        }
    }
    Ok(())
}

fn validate_logging_section(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if let Some(level) = config.get_string("logging", "level") {
        if !LOG_LEVELS.contains(&level.trim().to_lowercase().as_str()) {
            return Err(invalid(
                "logging",
                "level",
                format!("unknown level '{}', expected one of {}", level, LOG_LEVELS.join(", ")),
            ));
        }
    }
    Ok(())
}
