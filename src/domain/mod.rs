//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod indicator_helpers;
pub mod position;
pub mod strategy;
pub mod catalog;
pub mod backtest;
pub mod metrics;
pub mod correlation;
pub mod universe;
pub mod config_validation;
pub mod error;
