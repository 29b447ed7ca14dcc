//! Deriv Venue Connector - Authorize-First WebSocket Protocol
//!
//! Implements the `VenueConnector` port against the Deriv WebSocket
//! API: open the transport, send `{"authorize": <token>}`, read one
//! reply, and hand back an exclusively owned session on success.
//!
//! One session per logical operation, deliberately. Connection setup
//! costs a round trip per trade, but a dropped session can never
//! poison the next one.

use async_trait::async_trait;
use serde_json::json;
use tokio_tungstenite::connect_async;
use tracing::{debug, info, instrument, warn};

use super::session::DerivSession;
use crate::config::VenueConfig;
use crate::domain::VenueError;
use crate::ports::venue::{VenueConnector, VenueSession};

/// Venue connector for the Deriv authorize-first WebSocket protocol.
pub struct DerivVenue {
    /// WebSocket endpoint including the app_id query parameter.
    ws_url: String,
}

impl DerivVenue {
    /// Create a connector for the configured endpoint.
    pub fn new(config: &VenueConfig) -> Self {
        Self {
            ws_url: config.ws_url.clone(),
        }
    }
}

#[async_trait]
impl VenueConnector for DerivVenue {
    #[instrument(skip(self, token))]
    async fn connect(&self, token: &str) -> Result<Box<dyn VenueSession>, VenueError> {
        debug!(url = %self.ws_url, "Opening venue WebSocket");

        let (ws, _) = connect_async(&self.ws_url)
            .await
            .map_err(|e| VenueError::Transport(e.to_string()))?;

        let mut session = DerivSession::new(ws);
        let reply = match session.exchange(&json!({ "authorize": token })).await {
            Ok(reply) => reply,
            Err(e) => {
                session.close().await;
                return Err(e);
            }
        };

        // Success means the authorize reply carries no error member.
        if let Some(error) = reply.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("authorization refused")
                .to_string();
            warn!(message = %message, "Venue refused authorization");
            session.close().await;
            return Err(VenueError::Rejected(message));
        }

        info!("Venue session authorized");
        Ok(Box::new(session))
    }
}
