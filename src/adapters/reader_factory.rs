// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection of file readers by extension.

use crate::domain::{ConfigError, Result};
use crate::ports::FileReader;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Builds a reader instance for one extension.
pub type ReaderConstructor = Box<dyn Fn() -> Arc<dyn FileReader> + Send + Sync>;

/// Maps file extensions to [`FileReader`] implementations.
///
/// Extensions are registered with their leading dot (`.json`). Each reader is
/// constructed on first use and the same instance is returned for every later
/// file with that extension.
///
/// # Examples
///
/// ```rust
/// use confwire::adapters::{JsonFileReader, ReaderFactory};
/// use std::sync::Arc;
///
/// let factory = ReaderFactory::new()
///     .with_reader(".json", || Arc::new(JsonFileReader::new()));
///
/// let first = factory.create("a.json").unwrap();
/// let second = factory.create("b.json").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(factory.create("c.csv").is_err());
/// ```
pub struct ReaderFactory {
    registry: IndexMap<String, ReaderConstructor>,
    readers: RwLock<HashMap<String, Arc<dyn FileReader>>>,
}

impl ReaderFactory {
    /// Creates a factory with no readers registered.
    pub fn new() -> Self {
        Self {
            registry: IndexMap::new(),
            readers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a reader constructor for `extension`.
    ///
    /// A missing leading dot is added. Registering the same extension again
    /// replaces the earlier constructor.
    pub fn with_reader<F>(mut self, extension: &str, constructor: F) -> Self
    where
        F: Fn() -> Arc<dyn FileReader> + Send + Sync + 'static,
    {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        self.registry.insert(extension, Box::new(constructor));
        self
    }

    /// Returns the registered extensions in registration order.
    pub fn extensions(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    /// Returns the reader for `path`'s extension.
    ///
    /// The extension is everything from the last `.` of the file name. Fails
    /// with [`ConfigError::UnknownFileType`] listing the registered extensions
    /// when no reader is registered for it.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<Arc<dyn FileReader>> {
        let extension = extension_of(path.as_ref());

        if let Ok(readers) = self.readers.read() {
            if let Some(reader) = readers.get(&extension) {
                tracing::trace!("Reusing '{}' reader for {}", reader.name(), extension);
                return Ok(Arc::clone(reader));
            }
        }

        let constructor =
            self.registry
                .get(&extension)
                .ok_or_else(|| ConfigError::UnknownFileType {
                    extension: extension.clone(),
                    available: self.extensions(),
                })?;

        let mut readers = self.readers.write().map_err(|_| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "reader cache lock poisoned",
            ))
        })?;
        let reader = readers
            .entry(extension.clone())
            .or_insert_with(|| constructor())
            .clone();
        tracing::debug!("Created '{}' reader for {}", reader.name(), extension);
        Ok(reader)
    }
}

fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) => name[idx..].to_string(),
        None => String::new(),
    }
}

impl Default for ReaderFactory {
    /// Registers every reader enabled by crate features.
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut factory =
            Self::new().with_reader(".json", || Arc::new(super::JsonFileReader::new()));

        #[cfg(feature = "yaml")]
        {
            factory = factory
                .with_reader(".yaml", || Arc::new(super::YamlFileReader::new()))
                .with_reader(".yml", || Arc::new(super::YamlFileReader::new()));
        }

        #[cfg(feature = "toml")]
        {
            factory = factory.with_reader(".toml", || Arc::new(super::TomlFileReader::new()));
        }

        factory
    }
}

impl fmt::Debug for ReaderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderFactory")
            .field("extensions", &self.extensions())
            .finish()
    }
}
