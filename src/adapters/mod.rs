// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing file readers, file discovery and containers.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: one `FileReader` per supported format, the `ReaderFactory` that
//! picks between them, the glob-based `FileLocator`, and an in-memory
//! `Container`.

pub mod file_locator;
pub mod json_file;
pub mod memory_container;
pub mod reader_factory;
#[cfg(feature = "toml")]
pub mod toml_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use file_locator::FileLocator;
pub use json_file::JsonFileReader;
pub use memory_container::InMemoryContainer;
pub use reader_factory::{ReaderConstructor, ReaderFactory};
#[cfg(feature = "toml")]
pub use toml_file::TomlFileReader;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlFileReader;
