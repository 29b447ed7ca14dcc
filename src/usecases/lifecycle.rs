//! Bot Lifecycle - Online/Offline Gate and Startup Checks
//!
//! `start()` is a dependency health-check gate, not a warm-up: it
//! verifies both external dependencies in a fixed order and flips the
//! gate online, retaining nothing it built. Every trade re-validates
//! connectivity from scratch afterwards, so no stale-connection bug is
//! possible, at the price of per-trade connection latency.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::{Credentials, ORACLE_KEY_VAR, VENUE_TOKEN_VAR};
use crate::domain::{BotError, BotState};
use crate::ports::oracle::OracleProvider;
use crate::ports::venue::VenueConnector;

/// The process-wide online/offline gate.
///
/// An explicit, injectable object rather than a module-level singleton:
/// the controller and the pipeline each hold an `Arc` to the same gate.
/// Atomic so that concurrent start/stop/execute calls can only race
/// benignly (a trade is admitted or rejected on a momentarily stale
/// value, never on torn state).
#[derive(Debug)]
pub struct BotGate {
    online: AtomicBool,
}

impl BotGate {
    /// A fresh gate starts offline; there is no persisted state.
    pub fn new() -> Self {
        Self {
            online: AtomicBool::new(false),
        }
    }

    /// Current gate value.
    pub fn state(&self) -> BotState {
        if self.online.load(Ordering::SeqCst) {
            BotState::Online
        } else {
            BotState::Offline
        }
    }

    /// Whether trades are currently admitted.
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn set(&self, state: BotState) {
        self.online.store(state == BotState::Online, Ordering::SeqCst);
    }
}

impl Default for BotGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the gate transitions; the only component that mutates it.
pub struct LifecycleController {
    /// Shared gate, also read by the trade pipeline.
    gate: Arc<BotGate>,
    /// Externally supplied credentials, never mutated.
    credentials: Credentials,
    /// Venue connector used for the connect+close round trip.
    venue: Arc<dyn VenueConnector>,
    /// Oracle provider used for the constructibility check.
    oracle: Arc<dyn OracleProvider>,
}

impl LifecycleController {
    /// Wire a controller onto a shared gate.
    pub fn new(
        gate: Arc<BotGate>,
        credentials: Credentials,
        venue: Arc<dyn VenueConnector>,
        oracle: Arc<dyn OracleProvider>,
    ) -> Self {
        Self {
            gate,
            credentials,
            venue,
            oracle,
        }
    }

    /// Verify both dependencies and flip the gate online.
    ///
    /// Checks run in order and short-circuit: venue token presence,
    /// venue connect+close round trip, oracle key presence, oracle
    /// client constructibility. The first failure is the single
    /// reported error and leaves the gate offline. Nothing created
    /// here is retained for trade execution.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), BotError> {
        let token = self.credentials.venue_token().ok_or_else(|| {
            BotError::Configuration(format!("{VENUE_TOKEN_VAR} not set"))
        })?;

        let mut session = self.venue.connect(token).await.map_err(|e| {
            warn!(error = %e, "Venue connectivity check failed");
            BotError::from(e)
        })?;
        session.close().await;

        let key = self.credentials.oracle_key().ok_or_else(|| {
            BotError::Configuration(format!("{ORACLE_KEY_VAR} not set"))
        })?;
        let _oracle = self.oracle.build(key)?;

        self.gate.set(BotState::Online);
        info!("Bot is ready to trade");
        Ok(())
    }

    /// Flip the gate offline. Always succeeds, even when already
    /// offline.
    pub fn stop(&self) {
        self.gate.set(BotState::Offline);
        info!("Bot stopped");
    }

    /// Pure gate read, no side effects.
    pub fn status(&self) -> BotState {
        self.gate.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_gate_is_offline() {
        let gate = BotGate::new();
        assert_eq!(gate.state(), BotState::Offline);
        assert!(!gate.is_online());
    }

    #[test]
    fn test_gate_flips_both_ways() {
        let gate = BotGate::new();
        gate.set(BotState::Online);
        assert!(gate.is_online());
        gate.set(BotState::Offline);
        assert!(!gate.is_online());
    }

    #[test]
    fn test_gate_set_is_idempotent() {
        let gate = BotGate::new();
        gate.set(BotState::Offline);
        gate.set(BotState::Offline);
        assert_eq!(gate.state(), BotState::Offline);
    }

    #[tokio::test]
    async fn test_concurrent_flips_never_tear() {
        let gate = Arc::new(BotGate::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let gate = Arc::clone(&gate);
            handles.push(tokio::spawn(async move {
                let state = if i % 2 == 0 {
                    BotState::Online
                } else {
                    BotState::Offline
                };
                gate.set(state);
                gate.state()
            }));
        }
        for handle in handles {
            let state = handle.await.unwrap();
            assert!(matches!(state, BotState::Online | BotState::Offline));
        }
    }
}
