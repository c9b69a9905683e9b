// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration file reader.

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::reader::{self, FileReader};
use std::path::Path;

/// Reads `.json` files.
///
/// The document must be a JSON object. Syntax errors are reported with the
/// file name and the parser's own message.
///
/// # Examples
///
/// ```rust,no_run
/// use confwire::adapters::JsonFileReader;
/// use confwire::ports::FileReader;
/// use std::path::Path;
///
/// let config = JsonFileReader::new().read(Path::new("config/app.json")).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFileReader;

impl JsonFileReader {
    /// Creates a new JSON reader.
    pub fn new() -> Self {
        JsonFileReader
    }

    /// Parses JSON text that came from `path`.
    pub fn parse(&self, path: &Path, content: &str) -> Result<ConfigMap> {
        let value: ConfigValue = serde_json::from_str(content)
            .map_err(|e| ConfigError::invalid_syntax(path, "JSON", e))?;
        reader::expect_mapping(path, value)
    }
}

impl FileReader for JsonFileReader {
    fn name(&self) -> &str {
        "json"
    }

    fn read(&self, path: &Path) -> Result<ConfigMap> {
        let content = reader::read_to_string(path)?;
        self.parse(path, &content)
    }
}
