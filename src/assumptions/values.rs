//! Flat key -> value form of an assumption set

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::catalog::{self, CATALOG};
use crate::error::{RoiError, Result};

/// Named scalar assumptions, as read from a scenario file or built from defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssumptionValues {
    values: BTreeMap<String, f64>,
}

impl AssumptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalog key at its default value
    pub fn defaults() -> Self {
        CATALOG
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value of a key that must be present
    pub fn require(&self, key: &str) -> Result<f64> {
        let value = self
            .get(key)
            .ok_or_else(|| RoiError::MissingKey { key: key.to_string() })?;
        if !value.is_finite() {
            return Err(RoiError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        Ok(value)
    }

    /// Value of an optional key, 0 when absent
    pub fn optional(&self, key: &str) -> Result<f64> {
        match self.get(key) {
            Some(_) => self.require(key),
            None => Ok(0.0),
        }
    }

    /// Value of a catalog key, honoring whether the catalog marks it required
    pub fn resolve(&self, key: &str) -> Result<f64> {
        match catalog::lookup(key) {
            Some(spec) if !spec.required => self.optional(key),
            _ => self.require(key),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Overlay `other` on top of `self`; keys in `other` win
    pub fn merged(mut self, other: &AssumptionValues) -> Self {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
        self
    }

    /// Apply a `key=value` override string
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (key, raw) = spec
            .split_once('=')
            .ok_or_else(|| RoiError::MalformedOverride(spec.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RoiError::MalformedOverride(spec.to_string()));
        }
        let value = parse_value(key, raw)?;
        self.set(key, value);
        Ok(())
    }

    /// Keys present here that the catalog does not know
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|key| catalog::lookup(key).is_none())
            .collect()
    }

    /// Log keys that will be ignored by the projection
    pub fn warn_unknown_keys(&self) {
        for key in self.unknown_keys() {
            warn!("ignoring unknown assumption key '{}'", key);
        }
    }

    /// Check values against their catalog bounds
    ///
    /// Covers the scenario inputs and the chatbot share keys, which must not
    /// be negative. Only keys that are present are checked. The projection
    /// itself never calls this; it belongs to whoever collects the inputs.
    pub fn validate_bounds(&self) -> Result<()> {
        for spec in catalog::bounded_keys() {
            if let Some(value) = self.get(spec.name) {
                spec.check_bounds(value)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for AssumptionValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse a numeric assumption value, allowing `_` digit separators
pub fn parse_value(key: &str, raw: &str) -> Result<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RoiError::InvalidValue {
            key: key.to_string(),
            value: raw.trim().to_string(),
        }),
    }
}
