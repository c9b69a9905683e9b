// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service wiring example for the confwire crate.
//!
//! This example demonstrates:
//! - Registering service types in a `ServiceCatalog`
//! - Declaring services and inflectors in a YAML file
//! - Resolving `config.*` arguments from the merged configuration
//! - Singleton and per-request services
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example service_wiring
//! ```

use confwire::prelude::*;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug)]
struct Mailer {
    host: String,
    retries: i64,
    owner: Option<String>,
}

impl Service for Mailer {
    fn call_method(&mut self, method: &str, args: &[ConfigValue]) -> Result<()> {
        match (method, args) {
            ("setRetries", [retries]) => {
                self.retries = retries.try_i64("retries")?;
                Ok(())
            }
            ("setOwner", [owner]) => {
                self.owner = Some(owner.try_string("owner")?);
                Ok(())
            }
            _ => Err(ConfigError::UnknownMethod {
                service: "Mailer".to_string(),
                method: method.to_string(),
            }),
        }
    }

    fn implements(&self, capability: &str) -> bool {
        capability == "demo::Named"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct AuditLog {
    channel: String,
}

impl Service for AuditLog {
    fn call_method(&mut self, method: &str, _args: &[ConfigValue]) -> Result<()> {
        Err(ConfigError::UnknownMethod {
            service: "AuditLog".to_string(),
            method: method.to_string(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn catalog() -> ServiceCatalog {
    ServiceCatalog::new()
        .with_type("demo::Mailer", |args| {
            let host = match args.first() {
                Some(host) => host.try_string("mailer.host")?,
                None => "localhost".to_string(),
            };
            Ok(Box::new(Mailer {
                host,
                retries: 0,
                owner: None,
            }))
        })
        .with_type("demo::AuditLog", |args| {
            Ok(Box::new(AuditLog {
                channel: args.first().map(ToString::to_string).unwrap_or_default(),
            }))
        })
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== confwire: Service Wiring ===\n");

    let loader = ConfigLoader::new().with_locator(FileLocator::with_base_dir(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demos/config"
    )));

    let mut container = InMemoryContainer::new();
    Configurator::apply()
        .config_from_loader(&loader, &["app.json", "local.yaml"])?
        .to(&mut container, &catalog())?;

    println!("config.app.port = {}", container.value("config.app.port")?);

    let mailer = container.get("mailer")?;
    if let Some(mailer) = mailer.downcast_ref::<Mailer>() {
        println!(
            "mailer: host={} retries={} owner={:?}",
            mailer.host, mailer.retries, mailer.owner
        );
    }
    println!(
        "mailer is a singleton: {}",
        Arc::ptr_eq(&mailer, &container.get("mailer")?)
    );

    let audit = container.get("audit")?;
    if let Some(audit) = audit.downcast_ref::<AuditLog>() {
        println!("audit channel: {}", audit.channel);
    }
    println!(
        "audit is a singleton: {}",
        Arc::ptr_eq(&audit, &container.get("audit")?)
    );

    Ok(())
}
