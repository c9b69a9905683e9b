// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the configuration value tree, the overlay merge, the
//! read-only configuration store and the error type. It is independent of any
//! file format or container and defines the fundamental concepts used
//! throughout the library.

pub mod application_config;
pub mod config_value;
pub mod errors;
pub mod merge;

// Re-export commonly used types
pub use application_config::ApplicationConfig;
pub use config_value::{ConfigMap, ConfigValue};
pub use errors::{ConfigError, Result};
pub use merge::{merge_all, merge_maps, merge_values};
