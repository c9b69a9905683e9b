// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value tree.
//!
//! This module provides the `ConfigValue` type, a closed tree of scalars,
//! sequences and mappings, together with typed accessors and conversion helpers.

use crate::domain::errors::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An insertion-ordered mapping from string keys to configuration values.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A single node in a configuration tree.
///
/// Values are produced by the file readers (or built by hand) and are never
/// mutated once they are part of an [`ApplicationConfig`](crate::domain::ApplicationConfig).
/// Serialization is untagged, so any serde format maps onto the variants directly.
///
/// # Examples
///
/// ```
/// use confwire::domain::ConfigValue;
///
/// let value: ConfigValue = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
/// let port = value.as_mapping().and_then(|m| m.get("port"));
/// assert_eq!(port.and_then(ConfigValue::as_i64), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer that fits in an `i64`.
    Integer(i64),
    /// Any other number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(ConfigMap),
}

impl ConfigValue {
    /// Returns `true` if this value is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigValue::Mapping(_))
    }

    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this value is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an `f64` if this value is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(n) => Some(*n as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the items if this value is a sequence.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping if this value is a mapping.
    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Converts the value to a boolean, reporting `key` on failure.
    ///
    /// Strings are accepted using the usual spellings (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use confwire::domain::ConfigValue;
    ///
    /// assert!(ConfigValue::from("yes").try_bool("debug").unwrap());
    /// assert!(ConfigValue::from(false).try_bool("debug").is_ok());
    /// assert!(ConfigValue::from(3.5).try_bool("debug").is_err());
    /// ```
    pub fn try_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Integer(0) => Ok(false),
            ConfigValue::Integer(1) => Ok(true),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => Err(conversion_error(key, "boolean")),
            },
            _ => Err(conversion_error(key, "boolean")),
        }
    }

    /// Converts the value to an `i64`, parsing strings if needed.
    pub fn try_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| conversion_error(key, "integer")),
            _ => Err(conversion_error(key, "integer")),
        }
    }

    /// Converts the value to an `f64`, parsing strings if needed.
    pub fn try_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| conversion_error(key, "float")),
            _ => Err(conversion_error(key, "float")),
        }
    }

    /// Renders a scalar as a string. Sequences and mappings are rejected.
    pub fn try_string(&self, key: &str) -> Result<String> {
        match self {
            ConfigValue::String(s) => Ok(s.clone()),
            ConfigValue::Integer(n) => Ok(n.to_string()),
            ConfigValue::Float(f) => Ok(f.to_string()),
            ConfigValue::Bool(b) => Ok(b.to_string()),
            _ => Err(conversion_error(key, "string")),
        }
    }
}

fn conversion_error(key: &str, target_type: &str) -> ConfigError {
    ConfigError::TypeConversionError {
        key: key.to_string(),
        target_type: target_type.to_string(),
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(n.into())
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => write!(f, "{}", s),
            other => match serde_json::to_string(other) {
                Ok(json) => write!(f, "{}", json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

/// Builds a [`ConfigMap`] from key/value pairs.
///
/// ```
/// use confwire::config_map;
/// use confwire::domain::ConfigValue;
///
/// let map = config_map! { "name" => "app", "workers" => 4 };
/// assert_eq!(map.get("workers"), Some(&ConfigValue::Integer(4)));
/// ```
#[macro_export]
macro_rules! config_map {
    () => { $crate::domain::ConfigMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::domain::ConfigMap::new();
        $( map.insert(::std::string::String::from($key), $crate::domain::ConfigValue::from($value)); )+
        map
    }};
}
