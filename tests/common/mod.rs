// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures and mock services for integration tests.

#![allow(dead_code)]

use confwire::domain::{ConfigError, ConfigValue, Result};
use confwire::ports::Service;
use confwire::service::ServiceCatalog;
use std::any::Any;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Type identifier of [`ExampleClass`].
pub const EXAMPLE_CLASS: &str = "tests::mocks::ExampleClass";

/// Type identifier of [`ExampleClassWithArgs`].
pub const EXAMPLE_CLASS_WITH_ARGS: &str = "tests::mocks::ExampleClassWithArgs";

/// Capability implemented by [`ExampleClass`].
pub const EXAMPLE_INTERFACE: &str = "tests::mocks::ExampleInterface";

/// A service with a single settable value.
#[derive(Debug, Default)]
pub struct ExampleClass {
    value: Option<ConfigValue>,
}

impl ExampleClass {
    /// Returns the value given to `setValue`, if any.
    pub fn value(&self) -> Option<&ConfigValue> {
        self.value.as_ref()
    }
}

impl Service for ExampleClass {
    fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()> {
        match method {
            "setValue" => {
                self.value = args.first().cloned();
                Ok(())
            }
            _ => Err(ConfigError::UnknownMethod {
                service: "ExampleClass".to_string(),
                method: method.to_string(),
            }),
        }
    }

    fn implements(&self, capability: &str) -> bool {
        capability == EXAMPLE_INTERFACE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A service that records its constructor arguments.
#[derive(Debug)]
pub struct ExampleClassWithArgs {
    args: Vec<ConfigValue>,
}

impl ExampleClassWithArgs {
    /// Returns the constructor arguments.
    pub fn constructor_args(&self) -> &[ConfigValue] {
        &self.args
    }
}

impl Service for ExampleClassWithArgs {
    fn call_method(&mut self, method: &str, _args: &[ConfigValue]) -> Result<()> {
        Err(ConfigError::UnknownMethod {
            service: "ExampleClassWithArgs".to_string(),
            method: method.to_string(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A catalog knowing both mock services.
pub fn catalog() -> ServiceCatalog {
    ServiceCatalog::new()
        .with_type(EXAMPLE_CLASS, |_args| Ok(Box::new(ExampleClass::default())))
        .with_type(EXAMPLE_CLASS_WITH_ARGS, |args| {
            Ok(Box::new(ExampleClassWithArgs {
                args: args.to_vec(),
            }))
        })
}

/// A temporary directory holding configuration fixtures.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create fixture directory"),
        }
    }

    /// Writes `contents` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture subdirectory");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Returns `name` as a pattern rooted in the fixture directory.
    pub fn pattern(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Returns the fixture directory.
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
