// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for reading configuration files and for the dependency-injection container
//! the configuration is applied to. These traits are implemented by adapters in
//! the adapters layer.

pub mod container;
pub mod reader;

// Re-export commonly used types
pub use container::{Container, Inflector, MethodCall, Service, ServiceFactory};
pub use reader::FileReader;
