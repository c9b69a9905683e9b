// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML configuration file reader.

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::reader::{self, FileReader};
use std::path::Path;

/// Reads `.toml` files.
///
/// A TOML document is always a table, so the only failures are syntax errors.
/// Datetimes are kept as their RFC 3339 string form.
#[derive(Debug, Clone, Default)]
pub struct TomlFileReader;

impl TomlFileReader {
    /// Creates a new TOML reader.
    pub fn new() -> Self {
        TomlFileReader
    }

    /// Parses TOML text that came from `path`.
    pub fn parse(&self, path: &Path, content: &str) -> Result<ConfigMap> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::invalid_syntax(path, "TOML", e))?;
        reader::expect_mapping(path, Self::convert(toml::Value::Table(table)))
    }

    fn convert(value: toml::Value) -> ConfigValue {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Self::convert).collect())
            }
            toml::Value::Table(table) => ConfigValue::Mapping(
                table
                    .into_iter()
                    .map(|(key, val)| (key, Self::convert(val)))
                    .collect(),
            ),
        }
    }
}

impl FileReader for TomlFileReader {
    fn name(&self) -> &str {
        "toml"
    }

    fn read(&self, path: &Path) -> Result<ConfigMap> {
        let content = reader::read_to_string(path)?;
        self.parse(path, &content)
    }
}
