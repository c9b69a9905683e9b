// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the confwire crate.
//!
//! This example demonstrates:
//! - Loading and merging a JSON and a YAML file
//! - Reading values by dotted path
//! - Typed conversions and default values
//! - Listing every leaf path
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use confwire::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== confwire: Basic Usage ===\n");

    let config = ConfigLoader::new()
        .with_locator(FileLocator::with_base_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/demos/config"
        )))
        .load(&["*.json", "*.yaml"])?;

    println!("--- Values ---");
    println!("app.name    = {}", config.get("app.name")?);
    println!("app.port    = {}", config.get("app.port")?.try_i64("app.port")?);
    println!("app.debug   = {}", config.get("app.debug")?.try_bool("app.debug")?);
    println!("mail.host   = {}", config.get("mail.host")?);

    let fallback = ConfigValue::from("info");
    println!("log.level   = {} (default)", config.get_or("log.level", &fallback));

    println!("\n--- All keys ---");
    for (key, value) in &config {
        println!("{} = {}", key, value);
    }

    println!("\n--- Read only ---");
    let mut config = config;
    if let Err(e) = config.set("app.name", ConfigValue::from("changed")) {
        println!("set failed as expected: {}", e);
    }

    Ok(())
}
