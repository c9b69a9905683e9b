// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only configuration store with dotted-path access.
//!
//! `ApplicationConfig` wraps a fully merged configuration tree and resolves
//! paths such as `database.host` by walking nested mappings one segment at a
//! time. The store cannot be changed once built.

use crate::domain::config_value::{ConfigMap, ConfigValue};
use crate::domain::errors::{ConfigError, Result};
use crate::domain::merge::merge_maps;

/// Immutable, merged application configuration.
///
/// # Examples
///
/// ```
/// use confwire::config_map;
/// use confwire::domain::{ApplicationConfig, ConfigMap, ConfigValue};
///
/// let mut root = ConfigMap::new();
/// root.insert("group1".to_string(), ConfigValue::Mapping(config_map! { "keyA" => "valueA" }));
///
/// let config = ApplicationConfig::new(root);
/// assert_eq!(config.get("group1.keyA").unwrap(), &ConfigValue::from("valueA"));
/// assert!(config.get("group1").unwrap().is_mapping());
/// assert_eq!(config.keys(), vec!["group1.keyA".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationConfig {
    config: ConfigMap,
    separator: String,
}

impl ApplicationConfig {
    /// The separator used when none is given.
    pub const DEFAULT_SEPARATOR: &'static str = ".";

    /// Creates a store over `config` using the default `.` separator.
    pub fn new(config: ConfigMap) -> Self {
        Self::with_separator(config, Self::DEFAULT_SEPARATOR)
    }

    /// Creates a store over `config` using a custom path separator.
    ///
    /// The separator only affects how paths are split; it has no influence on
    /// the stored data.
    pub fn with_separator(config: ConfigMap, separator: impl Into<String>) -> Self {
        Self {
            config,
            separator: separator.into(),
        }
    }

    /// Returns the path separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns `true` if `path` resolves to a value.
    pub fn exists(&self, path: &str) -> bool {
        self.traverse(path).is_ok()
    }

    /// Resolves a dotted path.
    ///
    /// Fails with [`ConfigError::EntryDoesNotExist`] carrying the full path when
    /// a segment is missing or an intermediate value is not a mapping.
    pub fn get(&self, path: &str) -> Result<&ConfigValue> {
        self.traverse(path)
    }

    /// Resolves a dotted path, falling back to `default` when it does not exist.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a ConfigValue) -> &'a ConfigValue {
        self.traverse(path).unwrap_or(default)
    }

    /// Returns every path that leads to a non-mapping value.
    ///
    /// Paths of nested mappings are not listed themselves, only their
    /// descendants. Order is depth-first in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns every path in the tree, mappings included, in depth-first order.
    ///
    /// A mapping's own path comes before the paths of its children.
    pub fn paths(&self) -> Vec<String> {
        self.entries().into_iter().map(|(path, _)| path).collect()
    }

    /// Returns every `(path, value)` pair in the tree, mappings included, in
    /// the same order as [`paths`](Self::paths).
    ///
    /// Values are taken from the tree directly, so keys that contain the
    /// separator are listed even though [`get`](Self::get) cannot address them.
    pub fn entries(&self) -> Vec<(String, &ConfigValue)> {
        let mut out = Vec::new();
        collect_entries(&self.config, None, &self.separator, &mut out);
        out
    }

    /// Iterates `(path, value)` pairs in the same order as [`keys`](Self::keys).
    pub fn iter(&self) -> Iter<'_> {
        let mut entries = Vec::new();
        collect_leaves(&self.config, None, &self.separator, &mut entries);
        Iter {
            inner: entries.into_iter(),
        }
    }

    /// Returns a copy of the whole configuration tree.
    pub fn as_map(&self) -> ConfigMap {
        self.config.clone()
    }

    /// Returns a new store with `overlay` merged over this one.
    pub fn merged_with(&self, overlay: ConfigMap) -> Self {
        Self {
            config: merge_maps(self.config.clone(), overlay),
            separator: self.separator.clone(),
        }
    }

    /// Always fails: the store is read only.
    pub fn set(&mut self, _path: &str, _value: ConfigValue) -> Result<()> {
        Err(ConfigError::read_only::<Self>())
    }

    /// Always fails: the store is read only.
    pub fn unset(&mut self, _path: &str) -> Result<()> {
        Err(ConfigError::read_only::<Self>())
    }

    fn split<'p>(&self, path: &'p str) -> Vec<&'p str> {
        if self.separator.is_empty() {
            vec![path]
        } else {
            path.split(self.separator.as_str()).collect()
        }
    }

    fn traverse(&self, path: &str) -> Result<&ConfigValue> {
        let not_found = || ConfigError::EntryDoesNotExist {
            key: path.to_string(),
        };

        let mut segments = self.split(path).into_iter();
        let first = segments.next().ok_or_else(not_found)?;
        let mut pointer = self.config.get(first).ok_or_else(not_found)?;

        for segment in segments {
            pointer = match pointer {
                ConfigValue::Mapping(map) => map.get(segment).ok_or_else(not_found)?,
                _ => return Err(not_found()),
            };
        }

        Ok(pointer)
    }
}

fn join(prefix: Option<&str>, key: &str, separator: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, separator, key),
        None => key.to_string(),
    }
}

fn collect_leaves<'a>(
    map: &'a ConfigMap,
    prefix: Option<&str>,
    separator: &str,
    out: &mut Vec<(String, &'a ConfigValue)>,
) {
    for (key, value) in map {
        let path = join(prefix, key, separator);
        match value {
            ConfigValue::Mapping(child) => collect_leaves(child, Some(&path), separator, out),
            leaf => out.push((path, leaf)),
        }
    }
}

fn collect_entries<'a>(
    map: &'a ConfigMap,
    prefix: Option<&str>,
    separator: &str,
    out: &mut Vec<(String, &'a ConfigValue)>,
) {
    for (key, value) in map {
        let path = join(prefix, key, separator);
        out.push((path.clone(), value));
        if let ConfigValue::Mapping(child) = value {
            collect_entries(child, Some(&path), separator, out);
        }
    }
}

/// Iterator over the leaf entries of an [`ApplicationConfig`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: std::vec::IntoIter<(String, &'a ConfigValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (String, &'a ConfigValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ApplicationConfig {
    type Item = (String, &'a ConfigValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<ConfigMap> for ApplicationConfig {
    fn from(config: ConfigMap) -> Self {
        Self::new(config)
    }
}
