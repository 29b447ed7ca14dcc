//! Configuration Module - TOML-based Bot Configuration
//!
//! Loads endpoint and runtime settings from `config.toml`; credentials
//! come from environment variables and are held as a separate
//! [`Credentials`] value. Nothing secret lives in the TOML file.

pub mod loader;

use serde::Deserialize;

/// Environment variable carrying the venue authorization token.
pub const VENUE_TOKEN_VAR: &str = "DERIV_API_TOKEN";

/// Environment variable carrying the oracle API key.
pub const ORACLE_KEY_VAR: &str = "OPENAI_API_KEY";

/// Top-level bot configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// control surface starts listening.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Bot identity and logging.
  #[serde(default)]
  pub bot: BotConfig,
  /// Trading venue endpoint.
  #[serde(default)]
  pub venue: VenueConfig,
  /// Decision oracle endpoint and model.
  #[serde(default)]
  pub oracle: OracleConfig,
  /// Control-surface HTTP server.
  #[serde(default)]
  pub server: ServerConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      bot: BotConfig::default(),
      venue: VenueConfig::default(),
      oracle: OracleConfig::default(),
      server: ServerConfig::default(),
    }
  }
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable bot name.
  #[serde(default = "default_bot_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for BotConfig {
  fn default() -> Self {
    Self {
      name: default_bot_name(),
      log_level: default_log_level(),
    }
  }
}

/// Trading venue configuration.
///
/// The endpoint is fixed per deployment; the `app_id` query parameter
/// is part of the venue's WebSocket URL contract.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
  /// WebSocket endpoint, authorization-first protocol.
  #[serde(default = "default_venue_ws_url")]
  pub ws_url: String,
}

impl Default for VenueConfig {
  fn default() -> Self {
    Self {
      ws_url: default_venue_ws_url(),
    }
  }
}

/// Decision oracle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
  /// Chat-completions base URL (OpenAI-compatible).
  #[serde(default = "default_oracle_base_url")]
  pub base_url: String,
  /// Completion model name.
  #[serde(default = "default_oracle_model")]
  pub model: String,
  /// Request timeout in seconds.
  #[serde(default = "default_oracle_timeout")]
  pub timeout_seconds: u64,
}

impl Default for OracleConfig {
  fn default() -> Self {
    Self {
      base_url: default_oracle_base_url(),
      model: default_oracle_model(),
      timeout_seconds: default_oracle_timeout(),
    }
  }
}

/// Control-surface HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind address for the control surface + metrics.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
    }
  }
}

/// Opaque external credentials, read once from the environment.
///
/// Absence of either value is a configuration error detected by the
/// lifecycle controller at `start()`, not a load failure: the control
/// surface must come up and report the problem as a structured error.
/// The core never mutates these.
#[derive(Clone, Default)]
pub struct Credentials {
  venue_token: Option<String>,
  oracle_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
  // Token values never reach logs.
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("venue_token", &self.venue_token.as_ref().map(|_| "<redacted>"))
      .field("oracle_key", &self.oracle_key.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl Credentials {
  /// Read both credentials from the process environment.
  ///
  /// Empty or whitespace-only values count as absent.
  pub fn from_env() -> Self {
    Self {
      venue_token: read_var(VENUE_TOKEN_VAR),
      oracle_key: read_var(ORACLE_KEY_VAR),
    }
  }

  /// Build credentials from explicit values (tests, embedding).
  pub fn new(venue_token: Option<String>, oracle_key: Option<String>) -> Self {
    Self {
      venue_token,
      oracle_key,
    }
  }

  /// Venue authorization token, if set.
  pub fn venue_token(&self) -> Option<&str> {
    self.venue_token.as_deref()
  }

  /// Oracle API key, if set.
  pub fn oracle_key(&self) -> Option<&str> {
    self.oracle_key.as_deref()
  }
}

fn read_var(name: &str) -> Option<String> {
  std::env::var(name)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

// Default value functions for serde

fn default_bot_name() -> String {
  "deriv-signal-bot".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_venue_ws_url() -> String {
  "wss://ws.binaryws.com/websockets/v3?app_id=1089".to_string()
}

fn default_oracle_base_url() -> String {
  "https://api.openai.com/v1".to_string()
}

fn default_oracle_model() -> String {
  "gpt-4".to_string()
}

fn default_oracle_timeout() -> u64 {
  30
}

fn default_bind_address() -> String {
  "0.0.0.0:8000".to_string()
}
