// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file discovery.
//!
//! This module expands shell-style glob patterns into the list of
//! configuration files to load.

use crate::domain::{ConfigError, Result};
use directories::ProjectDirs;
use glob::MatchOptions;
use std::path::{Path, PathBuf};

/// Expands glob patterns into existing file paths.
///
/// Patterns support `*`, `?` and `[...]` character classes; hidden files are
/// only matched by patterns that spell out the leading dot. Results keep the
/// order of the patterns; within one pattern, matches come back in the order
/// the glob walk yields them (alphabetical per directory). A file matched by
/// two patterns is listed twice.
///
/// # Examples
///
/// ```rust,no_run
/// use confwire::adapters::FileLocator;
///
/// let locator = FileLocator::with_base_dir("/etc/myapp");
/// let files = locator.locate(&["config/*.json", "local.yaml"]).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    base_dir: Option<PathBuf>,
}

impl FileLocator {
    /// Creates a locator that resolves relative patterns against the working directory.
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Creates a locator that resolves relative patterns against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Creates a locator rooted at the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Failed to determine project directories",
            ))
        })?;

        Ok(Self::with_base_dir(proj_dirs.config_dir()))
    }

    /// Returns the directory relative patterns are resolved against, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Expands `patterns` into the matching regular files.
    ///
    /// An empty result is not an error here; callers decide whether that is
    /// acceptable.
    pub fn locate<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let resolved = self.resolve(pattern);
            let paths = glob::glob_with(&resolved, Self::match_options()).map_err(|e| {
                ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                }
            })?;

            let before = files.len();
            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!("Skipping unreadable match for '{}': {}", pattern, e);
                    }
                }
            }
            tracing::debug!(
                "Pattern '{}' matched {} file(s)",
                pattern,
                files.len() - before
            );
        }

        Ok(files)
    }

    /// Wildcards never match a leading `.`, as in a POSIX shell.
    fn match_options() -> MatchOptions {
        MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        }
    }

    fn resolve(&self, pattern: &str) -> String {
        match &self.base_dir {
            Some(base) if Path::new(pattern).is_relative() => {
                let escaped = glob::Pattern::escape(&base.to_string_lossy());
                format!("{}/{}", escaped.trim_end_matches('/'), pattern)
            }
            _ => pattern.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "{}").unwrap();
        path
    }

    #[test]
    fn test_locate_star_pattern() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.json");
        let b = touch(dir.path(), "b.json");
        touch(dir.path(), "c.yaml");

        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["*.json"])
            .unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_locate_star_skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        let hidden = touch(dir.path(), ".hidden.json");
        let a = touch(dir.path(), "a.json");
        touch(dir.path(), ".conf/b.json");

        let locator = FileLocator::with_base_dir(dir.path());
        assert_eq!(locator.locate(&["*.json"]).unwrap(), vec![a]);
        assert!(locator.locate(&["*/b.json"]).unwrap().is_empty());
        assert_eq!(locator.locate(&[".*.json"]).unwrap(), vec![hidden]);
    }

    #[test]
    fn test_locate_keeps_pattern_order() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.json");
        let z = touch(dir.path(), "z.json");

        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["z.json", "a.json"])
            .unwrap();
        assert_eq!(files, vec![z, a]);
    }

    #[test]
    fn test_locate_does_not_dedupe_across_patterns() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.json");

        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["a.json", "*.json"])
            .unwrap();
        assert_eq!(files, vec![a.clone(), a]);
    }

    #[test]
    fn test_locate_question_mark_and_class() {
        let dir = TempDir::new().unwrap();
        let one = touch(dir.path(), "env1.json");
        touch(dir.path(), "env22.json");
        let two = touch(dir.path(), "env2.json");
        touch(dir.path(), "env3.json");

        let locator = FileLocator::with_base_dir(dir.path());
        assert_eq!(locator.locate(&["env?.json"]).unwrap().len(), 3);
        assert_eq!(locator.locate(&["env[12].json"]).unwrap(), vec![one, two]);
    }

    #[test]
    fn test_locate_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        let file = touch(dir.path(), "real.json");

        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["*.json"])
            .unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_locate_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = touch(dir.path(), "config/app.json");

        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["config/*.json"])
            .unwrap();
        assert_eq!(files, vec![nested]);
    }

    #[test]
    fn test_locate_absolute_pattern_ignores_base_dir() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "abs.json");
        let pattern = file.to_string_lossy().to_string();

        let files = FileLocator::with_base_dir("/nonexistent")
            .locate(&[pattern])
            .unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_locate_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = FileLocator::with_base_dir(dir.path())
            .locate(&["*.unknownext"])
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_locate_invalid_pattern() {
        let result = FileLocator::new().locate(&["[unclosed"]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern { ref pattern, .. }) if pattern == "[unclosed"
        ));
    }

    #[test]
    fn test_base_dir_accessor() {
        assert!(FileLocator::new().base_dir().is_none());
        let locator = FileLocator::with_base_dir("/etc/app");
        assert_eq!(locator.base_dir(), Some(Path::new("/etc/app")));
    }
}
