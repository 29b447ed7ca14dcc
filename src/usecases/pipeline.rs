//! Trade Execution Pipeline - Per-Request Orchestration
//!
//! One call, one session: check the gate, derive the order intent,
//! open a fresh authenticated venue session, place exactly one order,
//! and close the session before returning no matter what happened.
//!
//! There is no idempotency key, no deduplication of concurrent
//! identical requests, and no queue; each call is independent and
//! stateless beyond the shared gate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{Credentials, VENUE_TOKEN_VAR};
use crate::domain::{BotError, OrderIntent, TradeRequest};
use crate::ports::venue::VenueConnector;
use crate::usecases::lifecycle::BotGate;

/// Result of one executed trade.
#[derive(Debug, Clone, Serialize)]
pub struct TradeOutcome {
    /// Correlation ID assigned to this execution, also in the logs.
    pub request_id: Uuid,
    /// When the venue reply was received.
    pub executed_at: DateTime<Utc>,
    /// Raw venue reply, passed through untouched.
    pub venue_response: Value,
}

/// Per-request trade orchestrator.
pub struct TradePipeline {
    /// Shared gate; trades are admitted only while it reads online.
    gate: Arc<BotGate>,
    /// Externally supplied credentials, never mutated.
    credentials: Credentials,
    /// Venue connector; a fresh session is opened per call.
    venue: Arc<dyn VenueConnector>,
}

impl TradePipeline {
    /// Wire a pipeline onto the shared gate and venue connector.
    pub fn new(
        gate: Arc<BotGate>,
        credentials: Credentials,
        venue: Arc<dyn VenueConnector>,
    ) -> Self {
        Self {
            gate,
            credentials,
            venue,
        }
    }

    /// Execute one trade request end to end.
    ///
    /// Rejects with [`BotError::NotOnline`] before any venue I/O while
    /// the gate is offline. On a connect failure no order is placed.
    /// The session is closed exactly once regardless of whether order
    /// placement succeeded.
    #[instrument(skip(self, request), fields(request_id = tracing::field::Empty))]
    pub async fn execute(&self, request: TradeRequest) -> Result<TradeOutcome, BotError> {
        if !self.gate.is_online() {
            return Err(BotError::NotOnline);
        }

        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let intent = OrderIntent::from_request(&request);
        info!(
            symbol = %intent.symbol,
            kind = %intent.contract_kind,
            stake = intent.stake,
            "Executing trade"
        );

        // Token may be absent even with the gate online; keep this typed.
        let token = self.credentials.venue_token().ok_or_else(|| {
            BotError::Configuration(format!("{VENUE_TOKEN_VAR} not set"))
        })?;

        let mut session = self.venue.connect(token).await?;
        let placed = session.place_order(&intent).await;
        session.close().await;

        let venue_response = placed?;
        info!(%request_id, "Trade executed");

        Ok(TradeOutcome {
            request_id,
            executed_at: Utc::now(),
            venue_response,
        })
    }
}
