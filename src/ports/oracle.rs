//! Decision Oracle Port - Trading Signal Interface
//!
//! The oracle is a remote completion endpoint that answers a
//! natural-language market prompt with a constrained JSON signal.
//! The provider half exists so the lifecycle controller can verify
//! client constructibility (credential shape) as a pre-flight check
//! without any network I/O.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BotError, DecisionSignal, OracleError};

/// Asks the remote oracle for a trading signal.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Format a prompt embedding `symbol` and the market-data payload,
    /// send it to the completion endpoint, and parse the reply as
    /// strict `{"signal": "buy"|"sell"|"hold"}` JSON.
    ///
    /// # Errors
    /// Transport failure, non-success status, or a reply that is not
    /// exactly the signal JSON (prose wrapping included) all surface
    /// as [`OracleError`].
    async fn signal(
        &self,
        symbol: &str,
        market_context: &serde_json::Value,
    ) -> Result<DecisionSignal, OracleError>;
}

/// Builds oracle clients from externally supplied credentials.
///
/// `build` must fail fast with a configuration error when the key is
/// absent or malformed, independent of any network call. The lifecycle
/// controller relies on this as its oracle pre-flight check; the built
/// client is discarded, not retained (start is a health gate, not a
/// warm-up).
pub trait OracleProvider: Send + Sync {
    /// Validate `api_key` and construct a client. No network I/O.
    ///
    /// # Errors
    /// Returns [`BotError::Configuration`] on an unusable key.
    fn build(&self, api_key: &str) -> Result<Arc<dyn DecisionOracle>, BotError>;
}
