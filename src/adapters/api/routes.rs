//! Control-surface route handlers.
//!
//! | Route          | Maps to                |
//! |----------------|------------------------|
//! | GET  /         | banner                 |
//! | GET  /status   | `lifecycle.status()`   |
//! | POST /start    | `lifecycle.start()`    |
//! | POST /stop     | `lifecycle.stop()`     |
//! | POST /trade    | `pipeline.execute()`   |
//! | GET  /metrics  | Prometheus exposition  |
//! | GET  /live     | liveness probe         |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::{ApiError, AppState, ErrorBody};
use crate::domain::{BotState, TradeRequest};
use crate::usecases::TradeOutcome;

/// Build the control-surface router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/status", get(status))
        .route("/start", post(start))
        .route("/stop", post(stop))
        .route("/trade", post(trade))
        .route("/metrics", get(metrics))
        .route("/live", get(|| async { StatusCode::OK }))
        .with_state(state)
}

/// GET / - Service banner with the route table.
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Trading bot control surface is running",
        "endpoints": ["/status", "/start", "/stop", "/trade", "/metrics"],
    }))
}

#[derive(Serialize)]
struct StatusResponse {
    bot: BotState,
}

/// GET /status - Gate value, pure read.
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        bot: state.lifecycle.status(),
    })
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// POST /start - Run the dependency checks and flip the gate online.
async fn start(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Err(e) = state.lifecycle.start().await {
        error!(error = %e, class = e.class(), "Startup check failed");
        state.metrics.start_failures.inc();
        return Err(e.into());
    }
    state.metrics.bot_online.set(1);
    Ok(Json(MessageResponse {
        message: "Bot is ready to trade",
    }))
}

/// POST /stop - Flip the gate offline; never fails.
async fn stop(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.lifecycle.stop();
    state.metrics.bot_online.set(0);
    Json(MessageResponse {
        message: "Bot stopped",
    })
}

#[derive(Serialize)]
struct TradeResponse {
    /// Always `"executed"`.
    status: &'static str,
    #[serde(flatten)]
    outcome: TradeOutcome,
}

/// POST /trade - Execute one trade.
///
/// An empty body means all-defaults; a present body must be a valid
/// JSON object, where missing fields fall back to the documented
/// defaults. A malformed body is rejected with 400 before any order
/// is placed, never silently turned into a default trade.
async fn trade(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TradeResponse>, Response> {
    let request = trade_request_from_body(&body).map_err(|e| {
        error!(error = %e, "Rejected malformed trade body");
        let body = ErrorBody {
            status: "error",
            message: format!("invalid trade request body: {e}"),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    })?;

    match state.pipeline.execute(request).await {
        Ok(outcome) => {
            state.metrics.trades_executed.inc();
            Ok(Json(TradeResponse {
                status: "executed",
                outcome,
            }))
        }
        Err(e) => {
            error!(error = %e, class = e.class(), "Trade failed");
            state.metrics.trades_failed.with_label_values(&[e.class()]).inc();
            Err(ApiError::from(e).into_response())
        }
    }
}

/// Parse the trade body: empty means all-defaults, anything else must
/// deserialize as a [`TradeRequest`] object.
fn trade_request_from_body(body: &[u8]) -> Result<TradeRequest, serde_json::Error> {
    if body.is_empty() {
        Ok(TradeRequest::default())
    } else {
        serde_json::from_slice(body)
    }
}

/// GET /metrics - Prometheus text exposition.
async fn metrics(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    state.metrics.encode().map_err(|e| {
        error!(error = %e, "Metrics encoding failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
