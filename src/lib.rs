//! Subrules - rule subscription parser and formatter
//!
//! This library crate exposes config loading and document summaries for the
//! binary and for integration testing.

pub mod config;
pub mod summary;

pub use config::{load_config, load_config_or_default, Config};
pub use summary::{InvalidGroup, Summary};

use anyhow::{Context, Result};
use std::path::Path;
use subrules_model::{Subscription, SubscriptionCodec};

/// Read and parse a subscription file
pub fn read_subscription(path: &Path, codec: &SubscriptionCodec) -> Result<Subscription> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read subscription file: {:?}", path))?;

    codec
        .parse(&content)
        .with_context(|| format!("Failed to parse subscription file: {:?}", path))
}
