// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture crate for file-based configuration and service wiring.
//!
//! This crate reads configuration from JSON, YAML and TOML files (or literal
//! maps), merges it into a single read-only tree addressed by dotted paths, and
//! can use part of that tree to declare services in a dependency-injection
//! container.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`ConfigValue`, `ApplicationConfig`, merge, errors)
//! - **Ports**: Trait definitions that define interfaces (`FileReader`, `Container`, `Service`)
//! - **Adapters**: Implementations for file formats, file discovery and an in-memory container
//! - **Service**: The loader and the configurator that orchestrate everything
//!
//! # Features
//!
//! - **Multiple Formats**: JSON always, YAML and TOML behind feature flags
//! - **Glob Patterns**: Files are located with shell-style patterns, in pattern order
//! - **Overlay Merge**: Later files override earlier ones, nested mappings merge recursively
//! - **Service Wiring**: Constructor arguments, setter calls, singletons and inflectors
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `toml`: Enable TOML file support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use confwire::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = ApplicationConfig::from_files(&["config/*.json", "config/local.yaml"])?;
//! println!("database host: {}", config.get("database.host")?);
//!
//! let mut container = InMemoryContainer::new();
//! Configurator::apply()
//!     .config_from_files(&["config/*.json"])?
//!     .with_singleton_services(true)
//!     .to(&mut container, &ServiceCatalog::new())?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::config_map;
    pub use crate::domain::{ApplicationConfig, ConfigError, ConfigMap, ConfigValue, Result};
    pub use crate::ports::{Container, FileReader, Service};
    pub use crate::service::{ConfigLoader, Configurator, ServiceCatalog};

    pub use crate::adapters::{FileLocator, InMemoryContainer, JsonFileReader, ReaderFactory};
    // Re-export adapters based on feature flags
    #[cfg(feature = "toml")]
    pub use crate::adapters::TomlFileReader;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlFileReader;
}
