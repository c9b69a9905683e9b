// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency-injection container boundary.
//!
//! This module defines the `Container` trait that the configurator registers
//! configuration values and services into, along with the `Service` trait that
//! every wired instance implements.

use crate::domain::{ConfigError, ConfigValue, Result};
use std::any::Any;
use std::sync::Arc;

/// An instance managed by a container.
///
/// Services are built by a constructor registered in a
/// [`ServiceCatalog`](crate::service::ServiceCatalog) and then configured through
/// named setter calls, so the configuration can address them without
/// reflection.
///
/// # Examples
///
/// ```rust
/// use confwire::ports::Service;
/// use confwire::domain::{ConfigError, ConfigValue, Result};
/// use std::any::Any;
///
/// #[derive(Default)]
/// struct Mailer {
///     host: String,
/// }
///
/// impl Service for Mailer {
///     fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()> {
///         match method {
///             "setHost" => {
///                 self.host = args.first().map(|a| a.to_string()).unwrap_or_default();
///                 Ok(())
///             }
///             _ => Err(ConfigError::UnknownMethod {
///                 service: "Mailer".to_string(),
///                 method: method.to_string(),
///             }),
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let mut mailer = Mailer::default();
/// mailer.call_method("setHost", &[ConfigValue::from("smtp.local")]).unwrap();
/// assert_eq!(mailer.host, "smtp.local");
/// ```
pub trait Service: Any + Send + Sync {
    /// Invokes the named setter with the given arguments.
    fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()>;

    /// Returns `true` if this service provides the named capability.
    ///
    /// Inflectors registered for a capability are applied to every service that
    /// answers `true` here.
    fn implements(&self, _capability: &str) -> bool {
        false
    }

    /// Returns `self` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Service {
    /// Downcasts a service to its concrete type.
    pub fn downcast_ref<T: Service>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Builds a fresh, fully configured service instance.
pub type ServiceFactory = Arc<dyn Fn() -> Result<Box<dyn Service>> + Send + Sync>;

/// A single setter call with its already-resolved arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    /// The setter name
    pub method: String,
    /// The arguments, in order
    pub arguments: Vec<ConfigValue>,
}

impl MethodCall {
    /// Creates a method call.
    pub fn new(method: impl Into<String>, arguments: Vec<ConfigValue>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Applies this call to a service.
    pub fn apply(&self, service: &mut dyn Service) -> Result<()> {
        service.call_method(&self.method, &self.arguments)
    }
}

/// Setter calls applied to every service that implements a capability.
#[derive(Clone, Debug, PartialEq)]
pub struct Inflector {
    /// The capability the target services must implement
    pub capability: String,
    /// The calls to make, in order
    pub calls: Vec<MethodCall>,
}

/// A trait for dependency-injection containers.
///
/// Containers hold two kinds of entries: plain configuration values, and
/// services produced by a [`ServiceFactory`]. Singleton services are built once
/// and shared; the others are built on every [`get`](Container::get).
pub trait Container {
    /// Returns the name of this container, used in error messages.
    fn name(&self) -> &str;

    /// Stores a configuration value under `name`.
    fn set_value(&mut self, name: &str, value: ConfigValue) -> Result<()>;

    /// Returns the configuration value stored under `name`.
    fn value(&self, name: &str) -> Result<ConfigValue>;

    /// Registers a service factory under `name`.
    fn register(&mut self, name: &str, factory: ServiceFactory, singleton: bool) -> Result<()>;

    /// Returns the service registered under `name`.
    fn get(&self, name: &str) -> Result<Arc<dyn Service>>;

    /// Returns `true` if this container can apply inflectors.
    fn supports_inflectors(&self) -> bool {
        false
    }

    /// Registers an inflector.
    ///
    /// Containers that cannot apply inflectors keep this default, which fails
    /// with [`ConfigError::UnsupportedFeature`].
    fn add_inflector(&mut self, _inflector: Inflector) -> Result<()> {
        Err(unsupported_inflectors(self.name()))
    }
}

/// The error returned when inflectors are configured for a container without
/// inflector support.
pub fn unsupported_inflectors(container: &str) -> ConfigError {
    ConfigError::UnsupportedFeature {
        feature: "Inflectors".to_string(),
        container: container.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Service for Recorder {
        fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()> {
            self.calls.push(format!("{}({})", method, args.len()));
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct ValuesOnly;

    impl Container for ValuesOnly {
        fn name(&self) -> &str {
            "values-only"
        }

        fn set_value(&mut self, _name: &str, _value: ConfigValue) -> Result<()> {
            Ok(())
        }

        fn value(&self, name: &str) -> Result<ConfigValue> {
            Err(ConfigError::ServiceNotFound {
                name: name.to_string(),
            })
        }

        fn register(&mut self, _name: &str, _factory: ServiceFactory, _singleton: bool) -> Result<()> {
            Ok(())
        }

        fn get(&self, name: &str) -> Result<Arc<dyn Service>> {
            Err(ConfigError::ServiceNotFound {
                name: name.to_string(),
            })
        }
    }

    #[test]
    fn test_method_call_apply() {
        let mut recorder = Recorder::default();
        MethodCall::new("setValue", vec![ConfigValue::from("x")])
            .apply(&mut recorder)
            .unwrap();
        assert_eq!(recorder.calls, vec!["setValue(1)"]);
    }

    #[test]
    fn test_default_implements_is_false() {
        assert!(!Recorder::default().implements("Anything"));
    }

    #[test]
    fn test_downcast_ref() {
        let service: Arc<dyn Service> = Arc::new(Recorder::default());
        assert!(service.downcast_ref::<Recorder>().is_some());
    }

    #[test]
    fn test_default_add_inflector_is_unsupported() {
        let mut container = ValuesOnly;
        assert!(!container.supports_inflectors());
        let err = container
            .add_inflector(Inflector {
                capability: "Cap".to_string(),
                calls: vec![],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedFeature { ref container, .. } if container == "values-only"
        ));
    }
}
