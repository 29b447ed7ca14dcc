//! Deriv Venue Session - One Authenticated Connection, One Order
//!
//! Wraps a tokio-tungstenite WebSocket stream as a single-use order
//! session. The venue protocol is strictly request/response over the
//! authorized connection: one JSON message out, one JSON reply in.
//!
//! Sessions are exclusively owned and never pooled. `close` takes the
//! stream out of the handle, so a second close (or a close after a
//! transport death) is a no-op.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, instrument};

use crate::domain::{OrderIntent, VenueError};
use crate::ports::venue::VenueSession;

/// Fixed order fields per the venue contract.
const ORDER_CURRENCY: &str = "USD";
const ORDER_BASIS: &str = "stake";
const ORDER_DURATION: u32 = 1;
const ORDER_DURATION_UNIT: &str = "m";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A single authenticated WebSocket session against the Deriv venue.
pub struct DerivSession {
    /// Underlying stream; `None` once closed.
    ws: Option<WsStream>,
}

impl DerivSession {
    /// Wrap a freshly opened (not yet authorized) stream.
    pub(crate) fn new(ws: WsStream) -> Self {
        Self { ws: Some(ws) }
    }

    /// Send one JSON request and read exactly one JSON reply.
    ///
    /// Non-text frames (pings, pongs) are skipped; tungstenite answers
    /// pings on flush without our involvement.
    pub(crate) async fn exchange(&mut self, request: &Value) -> Result<Value, VenueError> {
        let ws = self.ws.as_mut().ok_or(VenueError::SessionClosed)?;

        ws.send(Message::Text(request.to_string()))
            .await
            .map_err(|e| VenueError::Transport(e.to_string()))?;

        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(&text)
                        .map_err(|e| VenueError::Transport(format!("invalid reply JSON: {e}")));
                }
                Some(Ok(Message::Close(_))) | None => {
                    return Err(VenueError::Transport("connection closed by venue".to_string()));
                }
                Some(Ok(other)) => {
                    debug!(frame = ?other, "Skipping non-text frame");
                }
                Some(Err(e)) => {
                    return Err(VenueError::Transport(e.to_string()));
                }
            }
        }
    }
}

#[async_trait]
impl VenueSession for DerivSession {
    #[instrument(skip(self), fields(symbol = %intent.symbol, kind = %intent.contract_kind))]
    async fn place_order(&mut self, intent: &OrderIntent) -> Result<Value, VenueError> {
        let request = order_message(intent);
        let reply = self.exchange(&request).await?;
        debug!("Order reply received");
        Ok(reply)
    }

    async fn close(&mut self) {
        if let Some(mut ws) = self.ws.take() {
            // Best effort: the session is done either way.
            let _ = ws.close(None).await;
        }
    }
}

/// Build the venue's buy message for an order intent.
///
/// Currency, basis, and the one-minute duration are fixed by contract;
/// only symbol, stake, and contract kind vary per trade.
fn order_message(intent: &OrderIntent) -> Value {
    json!({
        "buy": 1,
        "price": intent.stake,
        "parameters": {
            "amount": intent.stake,
            "basis": ORDER_BASIS,
            "contract_type": intent.contract_kind.to_string(),
            "currency": ORDER_CURRENCY,
            "duration": ORDER_DURATION,
            "duration_unit": ORDER_DURATION_UNIT,
            "symbol": intent.symbol,
        }
    })
}
