//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration. A missing
//! file is not an error: every setting has a documented default and
//! credentials come from the environment anyway.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// Falls back to built-in defaults when `path` does not exist.
///
/// # Errors
/// Returns a detailed error if the file exists but cannot be read,
/// TOML parsing fails, or validation rules are violated.
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
  } else {
    info!(path = %path.display(), "No config file found, using defaults");
    AppConfig::default()
  };

  validate_config(&config)?;

  info!(
    venue = %config.venue.ws_url,
    oracle = %config.oracle.base_url,
    bind = %config.server.bind_address,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    config.venue.ws_url.starts_with("ws://") || config.venue.ws_url.starts_with("wss://"),
    "venue.ws_url must be a ws:// or wss:// URL, got {:?}",
    config.venue.ws_url
  );
  anyhow::ensure!(
    config.oracle.base_url.starts_with("http://")
      || config.oracle.base_url.starts_with("https://"),
    "oracle.base_url must be an http(s) URL, got {:?}",
    config.oracle.base_url
  );
  anyhow::ensure!(
    !config.oracle.model.is_empty(),
    "oracle.model must not be empty"
  );
  anyhow::ensure!(
    config.oracle.timeout_seconds > 0,
    "oracle.timeout_seconds must be positive"
  );
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );

  Ok(())
}
