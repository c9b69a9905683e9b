// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applying configuration to a dependency-injection container.
//!
//! The [`Configurator`] accumulates configuration from literal maps and files,
//! then registers it into a [`Container`]: every configuration path becomes a
//! container value, the services section becomes service factories, and the
//! inflectors section becomes container inflectors.

use super::catalog::ServiceCatalog;
use super::definition::{section_entries, InflectorDefinition, ServiceDefinition};
use super::loader::ConfigLoader;
use crate::domain::{merge_maps, ApplicationConfig, ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::container::unsupported_inflectors;
use crate::ports::{Container, Inflector, MethodCall, Service, ServiceFactory};
use indexmap::IndexMap;
use std::sync::Arc;

/// Settings controlling how configuration is mapped onto a container.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguratorSettings {
    /// Prefix of every registered configuration value; empty for none
    pub config_prefix: String,
    /// Separator used for configuration paths and registered value names
    pub config_separator: String,
    /// Path of the services section; `di<sep>services` when unset
    pub services_key: Option<String>,
    /// Path of the inflectors section; `di<sep>inflectors` when unset
    pub inflectors_key: Option<String>,
    /// Lifecycle of services that do not set `singleton` themselves
    pub singleton_services: bool,
}

impl ConfiguratorSettings {
    /// The path of the services section.
    pub fn services_key(&self) -> String {
        self.services_key
            .clone()
            .unwrap_or_else(|| format!("di{}services", self.config_separator))
    }

    /// The path of the inflectors section.
    pub fn inflectors_key(&self) -> String {
        self.inflectors_key
            .clone()
            .unwrap_or_else(|| format!("di{}inflectors", self.config_separator))
    }

    /// The container name a configuration path is registered under.
    pub fn value_name(&self, path: &str) -> String {
        if self.config_prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}{}{}", self.config_prefix, self.config_separator, path)
        }
    }
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            config_prefix: "config".to_string(),
            config_separator: ApplicationConfig::DEFAULT_SEPARATOR.to_string(),
            services_key: None,
            inflectors_key: None,
            singleton_services: false,
        }
    }
}

/// Fluent builder that wires configuration into a container.
///
/// # Examples
///
/// ```rust
/// use confwire::adapters::InMemoryContainer;
/// use confwire::config_map;
/// use confwire::ports::Container;
/// use confwire::service::{Configurator, ServiceCatalog};
///
/// # fn main() -> confwire::domain::Result<()> {
/// let mut container = InMemoryContainer::new();
///
/// Configurator::apply()
///     .config_from_map(config_map! { "db" => config_map! { "host" => "localhost" } })
///     .to(&mut container, &ServiceCatalog::new())?;
///
/// assert_eq!(container.value("config.db.host")?.as_str(), Some("localhost"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    config: ConfigMap,
    settings: ConfiguratorSettings,
}

impl Configurator {
    /// Starts an empty configurator with the default settings.
    pub fn apply() -> Self {
        Self::default()
    }

    /// Merges `map` over the configuration gathered so far.
    pub fn config_from_map(mut self, map: ConfigMap) -> Self {
        self.config = merge_maps(self.config, map);
        self
    }

    /// Loads the files matching `patterns` and merges them over the
    /// configuration gathered so far.
    pub fn config_from_files<S: AsRef<str>>(self, patterns: &[S]) -> Result<Self> {
        self.config_from_loader(&ConfigLoader::new(), patterns)
    }

    /// Like [`config_from_files`](Self::config_from_files) with a custom loader.
    pub fn config_from_loader<S: AsRef<str>>(
        self,
        loader: &ConfigLoader,
        patterns: &[S],
    ) -> Result<Self> {
        let map = loader.load_map(patterns)?;
        Ok(self.config_from_map(map))
    }

    /// Sets the prefix of registered configuration values.
    pub fn with_config_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.config_prefix = prefix.into();
        self
    }

    /// Sets the path separator.
    pub fn with_config_separator(mut self, separator: impl Into<String>) -> Self {
        self.settings.config_separator = separator.into();
        self
    }

    /// Sets the path of the services section.
    pub fn with_services_key(mut self, key: impl Into<String>) -> Self {
        self.settings.services_key = Some(key.into());
        self
    }

    /// Sets the path of the inflectors section.
    pub fn with_inflectors_key(mut self, key: impl Into<String>) -> Self {
        self.settings.inflectors_key = Some(key.into());
        self
    }

    /// Sets the lifecycle of services that do not choose one.
    pub fn with_singleton_services(mut self, singleton: bool) -> Self {
        self.settings.singleton_services = singleton;
        self
    }

    /// Applies a setting by name.
    ///
    /// Accepted names are `config_prefix`, `config_separator`, `services_key`
    /// and `inflectors_key` (strings) and `singleton_services` (boolean).
    pub fn with_setting(self, name: &str, value: impl Into<ConfigValue>) -> Result<Self> {
        let value = value.into();
        let invalid = |message: String| ConfigError::InvalidSetting {
            name: name.to_string(),
            message,
        };
        let string = |value: &ConfigValue| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("expected a string, found a {}", value.type_name())))
        };

        match name {
            "config_prefix" => Ok(self.with_config_prefix(string(&value)?)),
            "config_separator" => Ok(self.with_config_separator(string(&value)?)),
            "services_key" => Ok(self.with_services_key(string(&value)?)),
            "inflectors_key" => Ok(self.with_inflectors_key(string(&value)?)),
            "singleton_services" => match value.as_bool() {
                Some(singleton) => Ok(self.with_singleton_services(singleton)),
                None => Err(invalid(format!(
                    "expected a boolean, found a {}",
                    value.type_name()
                ))),
            },
            _ => Err(invalid("unknown setting".to_string())),
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &ConfiguratorSettings {
        &self.settings
    }

    /// Registers the gathered configuration into `container`.
    ///
    /// Service `class` identifiers are resolved through `catalog`. Returns the
    /// merged configuration store.
    pub fn to<C>(self, container: &mut C, catalog: &ServiceCatalog) -> Result<ApplicationConfig>
    where
        C: Container + ?Sized,
    {
        let Self { config, settings } = self;
        let config = ApplicationConfig::with_separator(config, settings.config_separator.clone());
        let wiring = Wiring {
            config: &config,
            settings: &settings,
        };

        wiring.check_inflector_support(container)?;
        wiring.register_values(container)?;
        wiring.register_services(container, catalog)?;
        wiring.register_inflectors(container)?;

        Ok(config)
    }
}

struct Wiring<'a> {
    config: &'a ApplicationConfig,
    settings: &'a ConfiguratorSettings,
}

impl Wiring<'_> {
    fn register_values<C: Container + ?Sized>(&self, container: &mut C) -> Result<()> {
        if !self.settings.config_prefix.is_empty() {
            container.set_value(
                &self.settings.config_prefix,
                ConfigValue::Mapping(self.config.as_map()),
            )?;
        }

        let entries = self.config.entries();
        for (path, value) in &entries {
            container.set_value(&self.settings.value_name(path), (*value).clone())?;
        }

        tracing::debug!("Registered {} configuration value(s)", entries.len());
        Ok(())
    }

    fn register_services<C: Container + ?Sized>(
        &self,
        container: &mut C,
        catalog: &ServiceCatalog,
    ) -> Result<()> {
        let key = self.settings.services_key();
        let Ok(section) = self.config.get(&key) else {
            return Ok(());
        };

        for (name, value) in section_entries(&key, section)? {
            let definition = ServiceDefinition::from_value(name, value)?;
            let constructor = catalog.constructor(&definition.class)?;
            let arguments = self.resolve_all(&definition.arguments);
            let calls = self.method_calls(&definition.methods);
            let singleton = definition
                .singleton
                .unwrap_or(self.settings.singleton_services);

            let factory: ServiceFactory = Arc::new(move || -> Result<Box<dyn Service>> {
                let mut service = constructor(arguments.as_slice())?;
                for call in &calls {
                    call.apply(service.as_mut())?;
                }
                Ok(service)
            });

            container.register(name, factory, singleton)?;
            tracing::debug!(
                "Registered service '{}' of type '{}' (singleton: {})",
                name,
                definition.class,
                singleton
            );
        }

        Ok(())
    }

    fn check_inflector_support<C: Container + ?Sized>(&self, container: &C) -> Result<()> {
        if self.config.exists(&self.settings.inflectors_key()) && !container.supports_inflectors() {
            return Err(unsupported_inflectors(container.name()));
        }
        Ok(())
    }

    fn register_inflectors<C: Container + ?Sized>(&self, container: &mut C) -> Result<()> {
        let key = self.settings.inflectors_key();
        let Ok(section) = self.config.get(&key) else {
            return Ok(());
        };

        for (capability, value) in section_entries(&key, section)? {
            let definition = InflectorDefinition::from_value(capability, value)?;
            container.add_inflector(Inflector {
                capability: capability.to_string(),
                calls: self.method_calls(&definition.methods),
            })?;
            tracing::debug!("Registered inflector for '{}'", capability);
        }

        Ok(())
    }

    fn method_calls(&self, methods: &IndexMap<String, Vec<ConfigValue>>) -> Vec<MethodCall> {
        methods
            .iter()
            .map(|(method, args)| MethodCall::new(method.clone(), self.resolve_all(args)))
            .collect()
    }

    fn resolve_all(&self, args: &[ConfigValue]) -> Vec<ConfigValue> {
        args.iter().map(|arg| self.resolve(arg)).collect()
    }

    /// Replaces a string naming a registered configuration value with that value.
    fn resolve(&self, arg: &ConfigValue) -> ConfigValue {
        let Some(name) = arg.as_str() else {
            return arg.clone();
        };

        let path = if self.settings.config_prefix.is_empty() {
            Some(name)
        } else {
            name.strip_prefix(self.settings.config_prefix.as_str())
                .and_then(|rest| rest.strip_prefix(self.settings.config_separator.as_str()))
        };

        match path.map(|path| self.config.get(path)) {
            Some(Ok(value)) => value.clone(),
            _ => arg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryContainer;
    use crate::config_map;

    #[test]
    fn test_default_settings() {
        let settings = ConfiguratorSettings::default();
        assert_eq!(settings.config_prefix, "config");
        assert_eq!(settings.config_separator, ".");
        assert_eq!(settings.services_key(), "di.services");
        assert_eq!(settings.inflectors_key(), "di.inflectors");
        assert!(!settings.singleton_services);
    }

    #[test]
    fn test_section_keys_follow_separator() {
        let configurator = Configurator::apply().with_config_separator("/");
        assert_eq!(configurator.settings().services_key(), "di/services");
        assert_eq!(configurator.settings().inflectors_key(), "di/inflectors");
    }

    #[test]
    fn test_value_name() {
        let mut settings = ConfiguratorSettings::default();
        assert_eq!(settings.value_name("a.b"), "config.a.b");
        settings.config_prefix = String::new();
        assert_eq!(settings.value_name("a.b"), "a.b");
    }

    #[test]
    fn test_with_setting() {
        let configurator = Configurator::apply()
            .with_setting("config_prefix", "settings")
            .unwrap()
            .with_setting("singleton_services", true)
            .unwrap()
            .with_setting("services_key", "di")
            .unwrap();
        let settings = configurator.settings();
        assert_eq!(settings.config_prefix, "settings");
        assert!(settings.singleton_services);
        assert_eq!(settings.services_key(), "di");
    }

    #[test]
    fn test_with_setting_rejects_unknown_name() {
        let err = Configurator::apply()
            .with_setting("colour", "blue")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { ref name, .. } if name == "colour"));
    }

    #[test]
    fn test_with_setting_rejects_wrong_type() {
        assert!(Configurator::apply()
            .with_setting("singleton_services", "yes")
            .is_err());
        assert!(Configurator::apply()
            .with_setting("config_prefix", false)
            .is_err());
    }

    #[test]
    fn test_config_from_map_cascades() {
        let mut container = InMemoryContainer::new();
        let config = Configurator::apply()
            .config_from_map(config_map! { "a" => 1, "b" => 1 })
            .config_from_map(config_map! { "b" => 2 })
            .to(&mut container, &ServiceCatalog::new())
            .unwrap();

        assert_eq!(config.get("b").unwrap(), &ConfigValue::Integer(2));
        assert_eq!(container.value("config.a").unwrap(), ConfigValue::Integer(1));
        assert_eq!(container.value("config.b").unwrap(), ConfigValue::Integer(2));
    }

    #[test]
    fn test_prefix_receives_root_mapping() {
        let mut container = InMemoryContainer::new();
        Configurator::apply()
            .config_from_map(config_map! { "a" => 1 })
            .to(&mut container, &ServiceCatalog::new())
            .unwrap();

        assert_eq!(
            container.value("config").unwrap(),
            ConfigValue::Mapping(config_map! { "a" => 1 })
        );
    }

    #[test]
    fn test_keys_containing_separator_are_registered() {
        let mut container = InMemoryContainer::new();
        Configurator::apply()
            .config_from_map(config_map! {
                "hosts" => config_map! { "example.com" => 1, "v1.2" => "old" }
            })
            .to(&mut container, &ServiceCatalog::new())
            .unwrap();

        assert_eq!(
            container.value("config.hosts.example.com").unwrap(),
            ConfigValue::Integer(1)
        );
        assert_eq!(container.value("config.hosts.v1.2").unwrap(), ConfigValue::from("old"));
    }

    #[test]
    fn test_unsupported_inflectors_register_nothing() {
        use crate::ports::{Service, ServiceFactory};

        #[derive(Default)]
        struct Recording {
            values: Vec<String>,
            services: Vec<String>,
        }

        impl Container for Recording {
            fn name(&self) -> &str {
                "recording"
            }

            fn set_value(&mut self, name: &str, _value: ConfigValue) -> Result<()> {
                self.values.push(name.to_string());
                Ok(())
            }

            fn value(&self, name: &str) -> Result<ConfigValue> {
                Err(ConfigError::EntryDoesNotExist {
                    key: name.to_string(),
                })
            }

            fn register(&mut self, name: &str, _factory: ServiceFactory, _singleton: bool) -> Result<()> {
                self.services.push(name.to_string());
                Ok(())
            }

            fn get(&self, name: &str) -> Result<Arc<dyn Service>> {
                Err(ConfigError::ServiceNotFound {
                    name: name.to_string(),
                })
            }
        }

        let catalog = ServiceCatalog::new().with_type("Unused", |_| {
            Err(ConfigError::UnknownServiceType {
                class: "Unused".to_string(),
                available: vec![],
            })
        });
        let mut container = Recording::default();
        let err = Configurator::apply()
            .config_from_map(config_map! {
                "keyA" => "valueA",
                "di" => config_map! {
                    "services" => config_map! { "unused" => config_map! { "class" => "Unused" } },
                    "inflectors" => Vec::<ConfigValue>::new()
                }
            })
            .to(&mut container, &catalog)
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnsupportedFeature { .. }));
        assert!(container.values.is_empty());
        assert!(container.services.is_empty());
    }

    #[test]
    fn test_resolve() {
        let config = ApplicationConfig::new(config_map! { "arg" => "value" });
        let settings = ConfiguratorSettings::default();
        let wiring = Wiring {
            config: &config,
            settings: &settings,
        };

        assert_eq!(wiring.resolve(&"config.arg".into()), ConfigValue::from("value"));
        assert_eq!(wiring.resolve(&"config.other".into()), ConfigValue::from("config.other"));
        assert_eq!(wiring.resolve(&"arg".into()), ConfigValue::from("arg"));
        assert_eq!(wiring.resolve(&"configarg".into()), ConfigValue::from("configarg"));
        assert_eq!(wiring.resolve(&ConfigValue::Integer(3)), ConfigValue::Integer(3));
    }

    #[test]
    fn test_resolve_without_prefix() {
        let config = ApplicationConfig::new(config_map! { "arg" => "value" });
        let settings = ConfiguratorSettings {
            config_prefix: String::new(),
            ..ConfiguratorSettings::default()
        };
        let wiring = Wiring {
            config: &config,
            settings: &settings,
        };

        assert_eq!(wiring.resolve(&"arg".into()), ConfigValue::from("value"));
        assert_eq!(wiring.resolve(&"config.arg".into()), ConfigValue::from("config.arg"));
    }
}
