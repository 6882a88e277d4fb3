//! Session setup shared by every command
//!
//! This module contains:
//! - `load_config` - Resolve config layers plus the `--api-url` flag
//! - `open_session` - Build the sync controller and load the cache once
//! - `parse_category` - Validate a category argument against the fixed set

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use spendlens_core::{BootstrapOutcome, Cache, Category, Config, HttpRemoteStore, SyncController};
use tracing::debug;

/// Resolve configuration, letting `--api-url` win over every other layer
pub fn load_config(config_path: Option<&Path>, api_url: Option<&str>) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load config")?;
    if let Some(url) = api_url {
        config.api_url = url.to_string();
    }
    config.validate().context("Invalid config")?;
    Ok(config)
}

/// Connect to the remote store and bootstrap the cache
///
/// A store that cannot be reached leaves the cache empty; the failure is
/// logged and read-only commands still run on the empty snapshot.
pub async fn open_session(config: &Config) -> Result<SyncController> {
    let store = HttpRemoteStore::from_config(config).context("Failed to create HTTP client")?;
    debug!(url = %config.api_url, "Using remote store");

    let controller = SyncController::new(Arc::new(store), Arc::new(Cache::new()));
    let outcome = controller.bootstrap().await;
    if let Some(notice) = bootstrap_notice(&outcome, &config.api_url) {
        println!("{}", notice);
    }
    Ok(controller)
}

/// Warning naming whichever collections failed to load, if any
pub fn bootstrap_notice(outcome: &BootstrapOutcome, api_url: &str) -> Option<String> {
    let missing = match (outcome.expenses_loaded, outcome.budgets_loaded) {
        (true, true) => return None,
        (false, false) => "expenses and budgets",
        (false, true) => "expenses",
        (true, false) => "budgets",
    };
    Some(format!(
        "⚠️  Could not load {} from {} - continuing without them",
        missing, api_url
    ))
}

/// Parse a category argument, returning its canonical spelling
pub fn parse_category(raw: &str) -> Result<Category> {
    raw.parse::<Category>().map_err(|e| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("{} (expected one of: {})", e, known.join(", "))
    })
}
