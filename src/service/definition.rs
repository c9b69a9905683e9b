// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative service and inflector definitions.
//!
//! Definitions are read out of the merged configuration tree with serde. A
//! service looks like this in YAML:
//!
//! ```yaml
//! di:
//!   services:
//!     mailer:
//!       class: app::Mailer
//!       arguments: [config.mail.host]
//!       methods:
//!         setRetries: [3]
//!       singleton: true
//!   inflectors:
//!     app::LoggerAware:
//!       setLogger: [config.log.target]
//! ```

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One entry of the services mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceDefinition {
    /// Type identifier looked up in the [`ServiceCatalog`](super::ServiceCatalog)
    pub class: String,
    /// Constructor arguments, in order
    #[serde(default)]
    pub arguments: Vec<ConfigValue>,
    /// Setter calls made after construction, in order
    #[serde(default)]
    pub methods: IndexMap<String, Vec<ConfigValue>>,
    /// Lifecycle override; the configurator default applies when absent
    #[serde(default)]
    pub singleton: Option<bool>,
}

impl ServiceDefinition {
    /// Reads the definition of service `name`.
    pub fn from_value(name: &str, value: &ConfigValue) -> Result<Self> {
        decode(name, value)
    }
}

/// Setter calls applied to every service implementing one capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct InflectorDefinition {
    /// Setter name to arguments, in order
    pub methods: IndexMap<String, Vec<ConfigValue>>,
}

impl InflectorDefinition {
    /// Reads the inflector for `capability`.
    pub fn from_value(capability: &str, value: &ConfigValue) -> Result<Self> {
        decode(capability, value)
    }
}

/// Returns the entries of a services or inflectors section.
///
/// An empty sequence is treated as an empty mapping, since many formats write
/// an empty collection as `[]`.
pub fn section_entries<'a>(key: &str, value: &'a ConfigValue) -> Result<Vec<(&'a str, &'a ConfigValue)>> {
    match value {
        ConfigValue::Mapping(map) => Ok(entries(map)),
        ConfigValue::Sequence(items) if items.is_empty() => Ok(Vec::new()),
        ConfigValue::Null => Ok(Vec::new()),
        other => Err(ConfigError::InvalidServiceDefinition {
            name: key.to_string(),
            message: format!("expected a mapping, found a {}", other.type_name()),
        }),
    }
}

fn entries(map: &ConfigMap) -> Vec<(&str, &ConfigValue)> {
    map.iter().map(|(k, v)| (k.as_str(), v)).collect()
}

fn decode<T: DeserializeOwned>(name: &str, value: &ConfigValue) -> Result<T> {
    let invalid = |message: String| ConfigError::InvalidServiceDefinition {
        name: name.to_string(),
        message,
    };
    let json = serde_json::to_value(value).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_value(json).map_err(|e| invalid(e.to_string()))
}
