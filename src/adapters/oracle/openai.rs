//! Decision Oracle Client - OpenAI-Compatible Completion Endpoint
//!
//! Implements the `DecisionOracle` port over reqwest. The client
//! formats a natural-language market prompt, posts it to the
//! chat-completions endpoint, and parses the reply text as the strict
//! `{"signal": "buy"|"sell"|"hold"}` JSON shape.
//!
//! Construction validates the API key without any network I/O; the
//! lifecycle controller relies on that as its pre-flight check.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::OracleConfig;
use crate::domain::{BotError, DecisionSignal, OracleError};
use crate::ports::oracle::{DecisionOracle, OracleProvider};

/// Oracle client against an OpenAI-compatible chat-completions API.
pub struct OpenAiOracle {
    /// Shared HTTP client with the configured timeout.
    http: Client,
    /// API base URL, e.g. `https://api.openai.com/v1`.
    base_url: String,
    /// Completion model name.
    model: String,
    /// Bearer credential; validated at construction, never logged.
    api_key: String,
}

impl OpenAiOracle {
    /// Construct a client, failing fast on an unusable key.
    ///
    /// # Errors
    /// Returns [`BotError::Configuration`] when the key is empty or
    /// contains whitespace. No network call is made.
    pub fn new(api_key: &str, config: &OracleConfig) -> Result<Self, BotError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(BotError::Configuration(
                "oracle API key is empty".to_string(),
            ));
        }
        if api_key.chars().any(char::is_whitespace) {
            return Err(BotError::Configuration(
                "oracle API key contains whitespace".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BotError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl DecisionOracle for OpenAiOracle {
    #[instrument(skip(self, market_context))]
    async fn signal(
        &self,
        symbol: &str,
        market_context: &Value,
    ) -> Result<DecisionSignal, OracleError> {
        let prompt = format!(
            "Analyze {symbol} data: {market_context}. \
             Return JSON: {{\"signal\": \"buy|sell|hold\"}}"
        );

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                OracleError::MalformedReply("completion has no message content".to_string())
            })?;

        let signal = parse_signal_reply(content)?;
        debug!(%symbol, %signal, "Oracle signal parsed");
        Ok(signal)
    }
}

/// Strict reply shape; any extra member fails the parse.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignalReply {
    signal: DecisionSignal,
}

/// Parse the completion text as the exact signal JSON.
///
/// Direct parse only: prose wrapped around the JSON is a failure, not
/// something to extract from.
fn parse_signal_reply(content: &str) -> Result<DecisionSignal, OracleError> {
    let reply: SignalReply = serde_json::from_str(content.trim())
        .map_err(|e| OracleError::MalformedReply(e.to_string()))?;
    Ok(reply.signal)
}

/// Builds [`OpenAiOracle`] clients for the lifecycle controller.
pub struct OpenAiOracleProvider {
    config: OracleConfig,
}

impl OpenAiOracleProvider {
    /// Create a provider for the configured endpoint and model.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }
}

impl OracleProvider for OpenAiOracleProvider {
    fn build(&self, api_key: &str) -> Result<Arc<dyn DecisionOracle>, BotError> {
        Ok(Arc::new(OpenAiOracle::new(api_key, &self.config)?))
    }
}
