// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when locating, reading,
//! merging or querying configuration, and when wiring services into a container.
//! All errors use `thiserror` for proper error handling and conversion.

use std::path::Path;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Every failure is reported to the caller immediately; nothing in this crate
/// retries or continues with a partial result. The enum is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use confwire::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::EntryDoesNotExist {
///         key: "database.host".to_string(),
///     })
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No file matched any of the supplied patterns.
    #[error("No files found matching patterns: {}", list_to_string(.patterns))]
    NoMatchingFiles {
        /// The patterns that were tried
        patterns: Vec<String>,
    },

    /// A glob pattern could not be compiled.
    #[error("Invalid file pattern \"{pattern}\": {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why the pattern was rejected
        message: String,
    },

    /// No reader is registered for a file extension.
    #[error(
        "No reader configured for \"{extension}\" files; readers are available for {}.",
        list_to_string(.available)
    )]
    UnknownFileType {
        /// The extension that was requested
        extension: String,
        /// The extensions that do have a reader
        available: Vec<String>,
    },

    /// A file's content could not be interpreted as configuration.
    #[error("{message}")]
    InvalidConfig {
        /// The file that failed
        file: String,
        /// A description naming the file and the cause
        message: String,
        /// The underlying parser error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A dotted path could not be resolved.
    #[error("No entry found for \"{key}\"")]
    EntryDoesNotExist {
        /// The full requested path
        key: String,
    },

    /// A mutation was attempted on a read-only store.
    #[error("{type_name} is read only")]
    ReadOnly {
        /// The type that refused the mutation
        type_name: String,
    },

    /// A container adapter does not support a requested feature.
    #[error("{feature} are not supported by the {container} container")]
    UnsupportedFeature {
        /// The feature that was requested
        feature: String,
        /// The container that refused it
        container: String,
    },

    /// A service definition refers to a type identifier nobody registered.
    #[error(
        "Unknown service type \"{class}\"; known types are {}",
        list_to_string(.available)
    )]
    UnknownServiceType {
        /// The requested type identifier
        class: String,
        /// The registered type identifiers
        available: Vec<String>,
    },

    /// A service or inflector definition is malformed.
    #[error("Invalid definition for \"{name}\": {message}")]
    InvalidServiceDefinition {
        /// The service or inflector name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// A service was requested from a container that does not know it.
    #[error("Service not found: {name}")]
    ServiceNotFound {
        /// The requested service name
        name: String,
    },

    /// A setter method was called that the service does not expose.
    #[error("Service \"{service}\" has no method \"{method}\"")]
    UnknownMethod {
        /// The service type
        service: String,
        /// The method name
        method: String,
    },

    /// A configurator setting was unknown or had the wrong type.
    #[error("Invalid setting \"{name}\": {message}")]
    InvalidSetting {
        /// The setting name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error("Failed to convert configuration value for key '{key}' to type {target_type}")]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an `InvalidConfig` error for a file whose syntax could not be parsed.
    pub fn invalid_syntax<E>(file: &Path, format: &str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let file = file.display().to_string();
        ConfigError::InvalidConfig {
            message: format!("Invalid {} in \"{}\": {}", format, file, err),
            file,
            source: Some(Box::new(err)),
        }
    }

    /// Creates an `InvalidConfig` error for a file that did not yield a mapping.
    pub fn not_a_mapping(file: &Path) -> Self {
        let file = file.display().to_string();
        ConfigError::InvalidConfig {
            message: format!("\"{}\" does not contain a configuration mapping.", file),
            file,
            source: None,
        }
    }

    /// Creates a `ReadOnly` error for the given type.
    pub fn read_only<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        ConfigError::ReadOnly {
            type_name: short.to_string(),
        }
    }
}

fn list_to_string(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
