// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory dependency-injection container.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::{Container, Inflector, Service, ServiceFactory};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

struct Registration {
    factory: ServiceFactory,
    singleton: bool,
}

/// A `HashMap`-backed container with singleton and inflector support.
///
/// Every time a service is built, the inflectors whose capability the new
/// instance implements are applied in registration order. Singletons are built
/// on first [`get`](Container::get) and shared afterwards.
///
/// # Examples
///
/// ```rust
/// use confwire::adapters::InMemoryContainer;
/// use confwire::domain::ConfigValue;
/// use confwire::ports::Container;
///
/// let mut container = InMemoryContainer::new();
/// container.set_value("config.name", ConfigValue::from("app")).unwrap();
/// assert_eq!(container.value("config.name").unwrap(), ConfigValue::from("app"));
/// ```
pub struct InMemoryContainer {
    values: HashMap<String, ConfigValue>,
    services: HashMap<String, Registration>,
    inflectors: Vec<Inflector>,
    singletons: RwLock<HashMap<String, Arc<dyn Service>>>,
}

impl InMemoryContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            services: HashMap::new(),
            inflectors: Vec::new(),
            singletons: RwLock::new(HashMap::new()),
        }
    }

    /// Returns `true` if a value or service is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.services.contains_key(name)
    }

    /// Returns the registered inflectors.
    pub fn inflectors(&self) -> &[Inflector] {
        &self.inflectors
    }

    fn build(&self, name: &str, registration: &Registration) -> Result<Arc<dyn Service>> {
        let mut instance = (registration.factory)()?;

        for inflector in &self.inflectors {
            if instance.implements(&inflector.capability) {
                tracing::trace!(
                    "Applying inflector for '{}' to service '{}'",
                    inflector.capability,
                    name
                );
                for call in &inflector.calls {
                    call.apply(instance.as_mut())?;
                }
            }
        }

        Ok(Arc::from(instance))
    }

    fn lock_error() -> ConfigError {
        ConfigError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "singleton cache lock poisoned",
        ))
    }
}

impl Default for InMemoryContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for InMemoryContainer {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn set_value(&mut self, name: &str, value: ConfigValue) -> Result<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn value(&self, name: &str) -> Result<ConfigValue> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::EntryDoesNotExist {
                key: name.to_string(),
            })
    }

    fn register(&mut self, name: &str, factory: ServiceFactory, singleton: bool) -> Result<()> {
        self.singletons
            .write()
            .map_err(|_| Self::lock_error())?
            .remove(name);
        self.services
            .insert(name.to_string(), Registration { factory, singleton });
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Arc<dyn Service>> {
        let registration = self
            .services
            .get(name)
            .ok_or_else(|| ConfigError::ServiceNotFound {
                name: name.to_string(),
            })?;

        if !registration.singleton {
            return self.build(name, registration);
        }

        let mut singletons = self.singletons.write().map_err(|_| Self::lock_error())?;
        if let Some(instance) = singletons.get(name) {
            return Ok(Arc::clone(instance));
        }
        let instance = self.build(name, registration)?;
        singletons.insert(name.to_string(), Arc::clone(&instance));
        Ok(instance)
    }

    fn supports_inflectors(&self) -> bool {
        true
    }

    fn add_inflector(&mut self, inflector: Inflector) -> Result<()> {
        self.inflectors.push(inflector);
        Ok(())
    }
}

impl fmt::Debug for InMemoryContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryContainer")
            .field("values", &self.values.len())
            .field("services", &self.services.len())
            .field("inflectors", &self.inflectors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MethodCall;
    use std::any::Any;

    #[derive(Default)]
    struct Counter {
        value: Option<ConfigValue>,
    }

    impl Service for Counter {
        fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()> {
            match method {
                "setValue" => {
                    self.value = args.first().cloned();
                    Ok(())
                }
                _ => Err(ConfigError::UnknownMethod {
                    service: "Counter".to_string(),
                    method: method.to_string(),
                }),
            }
        }

        fn implements(&self, capability: &str) -> bool {
            capability == "HasValue"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn counter_factory() -> ServiceFactory {
        Arc::new(|| -> Result<Box<dyn Service>> { Ok(Box::new(Counter::default())) })
    }

    #[test]
    fn test_values() {
        let mut container = InMemoryContainer::new();
        container.set_value("config.a", ConfigValue::from(1)).unwrap();
        assert!(container.has("config.a"));
        assert_eq!(container.value("config.a").unwrap(), ConfigValue::Integer(1));
        assert!(matches!(
            container.value("config.b"),
            Err(ConfigError::EntryDoesNotExist { .. })
        ));
    }

    #[test]
    fn test_non_singleton_builds_each_time() {
        let mut container = InMemoryContainer::new();
        container.register("counter", counter_factory(), false).unwrap();
        let first = container.get("counter").unwrap();
        let second = container.get("counter").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_singleton_is_shared() {
        let mut container = InMemoryContainer::new();
        container.register("counter", counter_factory(), true).unwrap();
        let first = container.get("counter").unwrap();
        let second = container.get("counter").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_service() {
        let container = InMemoryContainer::new();
        assert!(matches!(
            container.get("nothing"),
            Err(ConfigError::ServiceNotFound { ref name }) if name == "nothing"
        ));
    }

    #[test]
    fn test_inflector_applies_to_implementers() {
        let mut container = InMemoryContainer::new();
        container.register("counter", counter_factory(), false).unwrap();
        container
            .add_inflector(Inflector {
                capability: "HasValue".to_string(),
                calls: vec![MethodCall::new("setValue", vec![ConfigValue::from("inflected")])],
            })
            .unwrap();

        let service = container.get("counter").unwrap();
        let counter = service.downcast_ref::<Counter>().unwrap();
        assert_eq!(counter.value, Some(ConfigValue::from("inflected")));
        assert_eq!(container.inflectors().len(), 1);
    }

    #[test]
    fn test_inflector_skips_other_capabilities() {
        let mut container = InMemoryContainer::new();
        container.register("counter", counter_factory(), false).unwrap();
        container
            .add_inflector(Inflector {
                capability: "Other".to_string(),
                calls: vec![MethodCall::new("missing", vec![])],
            })
            .unwrap();

        let service = container.get("counter").unwrap();
        assert!(service.downcast_ref::<Counter>().unwrap().value.is_none());
    }

    #[test]
    fn test_reregistering_drops_cached_singleton() {
        let mut container = InMemoryContainer::new();
        container.register("counter", counter_factory(), true).unwrap();
        let first = container.get("counter").unwrap();
        container.register("counter", counter_factory(), true).unwrap();
        let second = container.get("counter").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_factory_error_propagates() {
        let mut container = InMemoryContainer::new();
        let failing: ServiceFactory = Arc::new(|| -> Result<Box<dyn Service>> {
            Err(ConfigError::UnknownServiceType {
                class: "Nope".to_string(),
                available: vec![],
            })
        });
        container.register("broken", failing, true).unwrap();
        assert!(container.get("broken").is_err());
    }
}
