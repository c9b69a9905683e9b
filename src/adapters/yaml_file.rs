// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file reader.
//!
//! This module provides a reader that loads configuration mappings from YAML files.

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::reader::{self, FileReader};
use std::path::Path;

/// Reads `.yaml` and `.yml` files.
///
/// The document must evaluate to a mapping; an empty document, a scalar or a
/// list at the top level is rejected with an error naming the file. Scalar
/// mapping keys (numbers, booleans) are converted to strings; YAML tags are
/// dropped and the tagged value is kept.
///
/// # Examples
///
/// ```rust
/// use confwire::adapters::YamlFileReader;
/// use confwire::domain::ConfigValue;
/// use std::path::Path;
///
/// let reader = YamlFileReader::new();
/// let yaml_content = "database:\n  host: localhost\n  port: 5432";
/// let result = reader.parse(Path::new("app.yaml"), yaml_content).unwrap();
/// let database = result["database"].as_mapping().unwrap();
/// assert_eq!(database["host"], ConfigValue::from("localhost"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlFileReader;

impl YamlFileReader {
    /// Creates a new YAML reader.
    pub fn new() -> Self {
        YamlFileReader
    }

    /// Parses YAML text that came from `path`.
    pub fn parse(&self, path: &Path, content: &str) -> Result<ConfigMap> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::invalid_syntax(path, "YAML", e))?;
        let value = Self::convert(path, value)?;
        reader::expect_mapping(path, value)
    }

    /// Converts a YAML value into a configuration value.
    fn convert(path: &Path, value: serde_yaml::Value) -> Result<ConfigValue> {
        Ok(match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => ConfigValue::Sequence(
                seq.into_iter()
                    .map(|item| Self::convert(path, item))
                    .collect::<Result<_>>()?,
            ),
            serde_yaml::Value::Mapping(map) => {
                let mut result = ConfigMap::with_capacity(map.len());
                for (key, val) in map {
                    let key = Self::key_to_string(path, key)?;
                    result.insert(key, Self::convert(path, val)?);
                }
                ConfigValue::Mapping(result)
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(path, tagged.value)?,
        })
    }

    fn key_to_string(path: &Path, key: serde_yaml::Value) -> Result<String> {
        match key {
            serde_yaml::Value::String(s) => Ok(s),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            serde_yaml::Value::Bool(b) => Ok(b.to_string()),
            other => {
                let file = path.display().to_string();
                Err(ConfigError::InvalidConfig {
                    message: format!(
                        "Invalid YAML in \"{}\": unsupported mapping key {:?}",
                        file, other
                    ),
                    file,
                    source: None,
                })
            }
        }
    }
}

impl FileReader for YamlFileReader {
    fn name(&self) -> &str {
        "yaml"
    }

    fn read(&self, path: &Path) -> Result<ConfigMap> {
        let content = reader::read_to_string(path)?;
        self.parse(path, &content)
    }
}
