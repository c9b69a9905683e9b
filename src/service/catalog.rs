// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of constructible service types.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::Service;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Builds a service from its resolved constructor arguments.
pub type ServiceConstructor =
    Arc<dyn Fn(&[ConfigValue]) -> Result<Box<dyn Service>> + Send + Sync>;

/// Maps the type identifiers used in service definitions to constructors.
///
/// The `class` field of a service definition is looked up here.
///
/// # Examples
///
/// ```rust
/// use confwire::domain::{ConfigValue, Result};
/// use confwire::ports::Service;
/// use confwire::service::ServiceCatalog;
/// use std::any::Any;
///
/// struct Clock;
///
/// impl Service for Clock {
///     fn call_method(&mut self, _method: &str, _args: &[ConfigValue]) -> Result<()> {
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let catalog = ServiceCatalog::new().with_type("app::Clock", |_args| Ok(Box::new(Clock)));
/// assert!(catalog.contains("app::Clock"));
/// assert!(catalog.construct("app::Clock", &[]).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct ServiceCatalog {
    constructors: IndexMap<String, ServiceConstructor>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Registers a constructor under `identifier`, replacing any earlier one.
    pub fn register<F>(&mut self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn(&[ConfigValue]) -> Result<Box<dyn Service>> + Send + Sync + 'static,
    {
        self.constructors
            .insert(identifier.into(), Arc::new(constructor));
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_type<F>(mut self, identifier: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&[ConfigValue]) -> Result<Box<dyn Service>> + Send + Sync + 'static,
    {
        self.register(identifier, constructor);
        self
    }

    /// Returns `true` if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }

    /// Returns the registered identifiers in registration order.
    pub fn identifiers(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    /// Returns the constructor for `identifier`.
    pub fn constructor(&self, identifier: &str) -> Result<ServiceConstructor> {
        self.constructors
            .get(identifier)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownServiceType {
                class: identifier.to_string(),
                available: self.identifiers(),
            })
    }

    /// Builds a new instance of `identifier` with `args`.
    pub fn construct(&self, identifier: &str, args: &[ConfigValue]) -> Result<Box<dyn Service>> {
        (self.constructor(identifier)?)(args)
    }
}

impl fmt::Debug for ServiceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCatalog")
            .field("types", &self.identifiers())
            .finish()
    }
}
