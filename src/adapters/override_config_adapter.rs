//! Command-line overrides layered over another configuration source.

use crate::ports::config_port::ConfigPort;
use std::collections::HashMap;

pub struct OverrideConfigAdapter<'a> {
    base: &'a dyn ConfigPort,
    values: HashMap<(String, String), String>,
}

impl<'a> OverrideConfigAdapter<'a> {
    pub fn new(base: &'a dyn ConfigPort) -> Self {
        Self {
            base,
            values: HashMap::new(),
        }
    }

    /// Override `[section] key` when `value` is `Some`.
    pub fn with(mut self, section: &str, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.values
                .insert((section.to_lowercase(), key.to_lowercase()), value);
        }
        self
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&String> {
        self.values
            .get(&(section.to_lowercase(), key.to_lowercase()))
    }
}

impl ConfigPort for OverrideConfigAdapter<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.lookup(section, key) {
            Some(v) => Some(v.clone()),
            None => self.base.get_string(section, key),
        }
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.lookup(section, key) {
            Some(v) => v.trim().parse().unwrap_or(default),
            None => self.base.get_int(section, key, default),
        }
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.lookup(section, key) {
            Some(v) => v.trim().parse().unwrap_or(default),
            None => self.base.get_double(section, key, default),
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.lookup(section, key).map(|v| v.trim().to_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "yes" | "1") => true,
            Some(v) if matches!(v.as_str(), "false" | "no" | "0") => false,
            Some(_) => default,
            None => self.base.get_bool(section, key, default),
        }
    }
}
