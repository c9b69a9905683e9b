// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading an `ApplicationConfig` from configuration files.
//!
//! Files are located by glob pattern, read with the reader registered for their
//! extension, and merged in order so that later files override earlier ones.

use crate::adapters::{FileLocator, ReaderFactory};
use crate::domain::{merge_maps, ApplicationConfig, ConfigError, ConfigMap, Result};

/// Builder that turns glob patterns into an [`ApplicationConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use confwire::service::ConfigLoader;
///
/// # fn main() -> confwire::domain::Result<()> {
/// let config = ConfigLoader::new()
///     .with_separator("/")
///     .load(&["config/*.json", "config/local.yaml"])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    locator: FileLocator,
    factory: ReaderFactory,
    separator: String,
}

impl ConfigLoader {
    /// Creates a loader with the default locator, readers and separator.
    pub fn new() -> Self {
        Self {
            locator: FileLocator::new(),
            factory: ReaderFactory::default(),
            separator: ApplicationConfig::DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Uses a custom file locator.
    pub fn with_locator(mut self, locator: FileLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Uses a custom reader table.
    pub fn with_reader_factory(mut self, factory: ReaderFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Uses a custom path separator for the resulting store.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Locates, reads and merges the files matching `patterns`.
    ///
    /// Fails with [`ConfigError::NoMatchingFiles`] when nothing matches. Any
    /// reader error aborts the whole load and is returned unchanged.
    pub fn load_map<S: AsRef<str>>(&self, patterns: &[S]) -> Result<ConfigMap> {
        let files = self.locator.locate(patterns)?;

        if files.is_empty() {
            return Err(ConfigError::NoMatchingFiles {
                patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            });
        }

        let mut merged = ConfigMap::new();
        for file in &files {
            let reader = self.factory.create(file)?;
            tracing::debug!("Reading {} with the '{}' reader", file.display(), reader.name());
            merged = merge_maps(merged, reader.read(file)?);
        }

        tracing::debug!("Merged {} configuration file(s)", files.len());
        Ok(merged)
    }

    /// Locates, reads and merges the files matching `patterns` into a store.
    pub fn load<S: AsRef<str>>(&self, patterns: &[S]) -> Result<ApplicationConfig> {
        let merged = self.load_map(patterns)?;
        Ok(ApplicationConfig::with_separator(merged, self.separator.clone()))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationConfig {
    /// Loads and merges the files matching `patterns` using the default readers.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use confwire::domain::ApplicationConfig;
    ///
    /// # fn main() -> confwire::domain::Result<()> {
    /// let config = ApplicationConfig::from_files(&["config/*.json"])?;
    /// let host = config.get("database.host")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_files<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        ConfigLoader::new().load(patterns)
    }

    /// Loads and merges the files matching `patterns` with a custom separator.
    pub fn from_files_with_separator<S: AsRef<str>>(
        patterns: &[S],
        separator: impl Into<String>,
    ) -> Result<Self> {
        ConfigLoader::new().with_separator(separator).load(patterns)
    }
}
