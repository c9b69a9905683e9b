// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer tying the domain, ports and adapters together.
//!
//! This module contains the `ConfigLoader` that turns glob patterns into an
//! `ApplicationConfig`, and the `Configurator` that applies configuration to a
//! dependency-injection container using the types known to a `ServiceCatalog`.

pub mod catalog;
pub mod configurator;
pub mod definition;
pub mod loader;

// Re-export commonly used types
pub use catalog::{ServiceCatalog, ServiceConstructor};
pub use configurator::{Configurator, ConfiguratorSettings};
pub use definition::{InflectorDefinition, ServiceDefinition};
pub use loader::ConfigLoader;
