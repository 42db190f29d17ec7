//! Engine setup from TOML.
//!
//! ```toml
//! sample_rate = 48000
//! block_size = 512
//! channels = 2
//!
//! [params]
//! FILTERMENU = "lowpass"
//! CUTOFF = "1kHz"
//! ROOM_SIZE = "70%"
//! FREEZE_MODE = false
//! ```
//!
//! Parameter values may be numbers, booleans or strings. Strings go through
//! [`parse_param_value`](crate::parse_param_value). Integers for percentage
//! parameters count in percent, so `WET_LEVEL = 30` stores `0.3`.

use std::collections::BTreeMap;
use std::path::Path;

use ambit_core::ParamUnit;
use serde::{Deserialize, Serialize};

use crate::value::check_fraction;
use crate::{EngineError, Param, Result, parse_param_value};

/// A parameter value as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Whole number. Percent for percentage parameters, otherwise stored as given.
    Integer(i64),
    /// Stored as given (then clamped). Percentage parameters take a fraction.
    Number(f64),
    /// `true` stores 1, `false` stores 0. For menus, see [`parse_param_value`].
    Bool(bool),
    /// Parsed with units, percentages, switch words and menu labels.
    Text(String),
}

impl ParamValue {
    /// Resolve to the raw value for `param`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidValue`] if a text value does not parse, or a
    /// fraction for a percentage parameter is above 1.
    pub fn resolve(&self, param: Param) -> Result<f32> {
        match self {
            ParamValue::Integer(i) if param.descriptor().unit == ParamUnit::Percent => {
                Ok(*i as f32 / 100.0)
            }
            ParamValue::Integer(i) => Ok(*i as f32),
            ParamValue::Number(n) => check_fraction(param, *n as f32, &n.to_string()),
            ParamValue::Bool(b) => parse_param_value(param, if *b { "on" } else { "off" }),
            ParamValue::Text(s) => parse_param_value(param, s),
        }
    }
}

/// Stream format plus parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Largest block the engine will be asked to process.
    pub block_size: usize,
    /// 1 or 2.
    pub channels: usize,
    /// Overrides keyed by parameter key (`"CUTOFF"`, `"ROOM_SIZE"`, ...).
    pub params: BTreeMap<String, ParamValue>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            block_size: 512,
            channels: 2,
            params: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// [`EngineError::ReadConfig`] if the file cannot be read,
    /// [`EngineError::ParseConfig`] if it is not a valid config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::read_config(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), overrides = config.params.len(), "config loaded");
        Ok(config)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// [`EngineError::ParseConfig`] on malformed TOML or unknown top-level keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Set or replace one override.
    pub fn set_param(&mut self, key: impl Into<String>, value: ParamValue) {
        self.params.insert(key.into(), value);
    }

    /// Check every override names a parameter and parses for it.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownParameter`] or [`EngineError::InvalidValue`] for
    /// the first bad entry.
    pub fn resolved_params(&self) -> Result<Vec<(Param, f32)>> {
        self.params
            .iter()
            .map(|(key, value)| {
                let param =
                    Param::from_key(key).ok_or_else(|| EngineError::UnknownParameter(key.clone()))?;
                Ok((param, value.resolve(param)?))
            })
            .collect()
    }
}
