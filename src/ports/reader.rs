// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file reader trait definition.
//!
//! This module defines the `FileReader` trait, which provides an interface for
//! turning one configuration file (JSON, YAML, TOML, ...) into a nested mapping.

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use std::fs;
use std::path::Path;

/// Maximum allowed size for a single configuration file (10MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A trait for reading configuration files.
///
/// A reader is selected per file extension by the
/// [`ReaderFactory`](crate::adapters::ReaderFactory). It must read the whole
/// file, parse it, and return the top-level mapping. Any failure must name the
/// file, so callers can propagate the error unchanged.
///
/// # Examples
///
/// ```rust
/// use confwire::ports::FileReader;
/// use confwire::domain::{ConfigMap, Result};
/// use std::path::Path;
///
/// struct EmptyReader;
///
/// impl FileReader for EmptyReader {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn read(&self, _path: &Path) -> Result<ConfigMap> {
///         Ok(ConfigMap::new())
///     }
/// }
///
/// let reader = EmptyReader;
/// assert!(reader.read(Path::new("anything")).unwrap().is_empty());
/// ```
pub trait FileReader: Send + Sync {
    /// Returns a short name for the format, used in logs.
    fn name(&self) -> &str;

    /// Reads the file at `path` into a configuration mapping.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigMap)` - The top-level mapping of the file
    /// * `Err(ConfigError::InvalidConfig)` - The content is not valid configuration
    fn read(&self, path: &Path) -> Result<ConfigMap>;
}

/// Reads a configuration file into a string, enforcing [`MAX_CONFIG_FILE_SIZE`].
///
/// The file is opened, read and closed before this function returns.
pub fn read_to_string(path: &Path) -> Result<String> {
    let file = path.display().to_string();
    let unreadable = |e: std::io::Error| ConfigError::InvalidConfig {
        message: format!("Failed to read \"{}\": {}", file, e),
        file: file.clone(),
        source: Some(Box::new(e)),
    };

    let metadata = fs::metadata(path).map_err(unreadable)?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::InvalidConfig {
            message: format!(
                "\"{}\" is too large: {} bytes (max {} bytes)",
                file,
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
            file: file.clone(),
            source: None,
        });
    }
    fs::read_to_string(path).map_err(unreadable)
}

/// Requires a parsed document to be a mapping.
pub fn expect_mapping(path: &Path, value: ConfigValue) -> Result<ConfigMap> {
    match value {
        ConfigValue::Mapping(map) => Ok(map),
        _ => Err(ConfigError::not_a_mapping(path)),
    }
}
