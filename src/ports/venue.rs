//! Venue Port - Session-Oriented Order Placement Interface
//!
//! The venue protocol is session-oriented: authorize once per
//! connection, then one stateful request per session. The port splits
//! this into a connector (opens authenticated sessions) and a session
//! (one send/receive exchange, then close).
//!
//! Key design decisions:
//! - One fresh session per logical operation, no pooling: a dropped
//!   session cannot poison subsequent trades.
//! - No transient/permanent failure distinction; every connect may fail
//!   and callers re-attempt with a fresh connect.

use async_trait::async_trait;

use crate::domain::{OrderIntent, VenueError};

/// Opens authenticated sessions against the trading venue.
#[async_trait]
pub trait VenueConnector: Send + Sync {
    /// Open a transport connection, send the authorization message
    /// carrying `token`, and read exactly one reply.
    ///
    /// # Errors
    /// Any transport failure or an authorization reply carrying an
    /// error member normalizes to [`VenueError`].
    async fn connect(&self, token: &str) -> Result<Box<dyn VenueSession>, VenueError>;
}

/// One authenticated, single-use connection to the venue.
///
/// Exclusively owned: created by [`VenueConnector::connect`], consumed
/// by exactly one order exchange, destroyed by [`VenueSession::close`].
/// Never shared across concurrent operations, never reused after close.
#[async_trait]
pub trait VenueSession: Send {
    /// Send a single order message over the authenticated session and
    /// return the raw venue reply. Exactly one request/response pair;
    /// no retry, no partial-fill handling, no cancellation path.
    async fn place_order(
        &mut self,
        intent: &OrderIntent,
    ) -> Result<serde_json::Value, VenueError>;

    /// Release the transport. Safe to call on an already-closed or
    /// half-dead session; never errors.
    async fn close(&mut self);
}
