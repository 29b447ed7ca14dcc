//! HTTP Control Surface - Canonical Adapter
//!
//! The single HTTP adapter over the lifecycle controller and the trade
//! pipeline, mapped 1:1 to routes. Every failure leaves the process as
//! a structured `{status: "error", message}` body with an appropriate
//! status code; no panic or raw transport error reaches the wire.

pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::adapters::metrics::BotMetrics;
use crate::domain::BotError;
use crate::usecases::{LifecycleController, TradePipeline};

pub use routes::router;

/// Shared state behind every route handler.
pub struct AppState {
    /// Gate owner; start/stop/status.
    pub lifecycle: LifecycleController,
    /// Per-request trade orchestration.
    pub pipeline: TradePipeline,
    /// Prometheus registry served on /metrics.
    pub metrics: BotMetrics,
}

/// Structured error body for every failure route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `"error"`.
    pub status: &'static str,
    /// Human-readable failure description.
    pub message: String,
}

/// Wire-level wrapper converting [`BotError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub BotError);

impl From<BotError> for ApiError {
    fn from(err: BotError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self.0 {
            BotError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BotError::Connection(_) | BotError::Oracle(_) => StatusCode::BAD_GATEWAY,
            BotError::NotOnline => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            status: "error",
            message: self.0.to_string(),
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VenueError;

    #[test]
    fn test_error_codes_per_class() {
        let offline = ApiError(BotError::NotOnline).into_response();
        assert_eq!(offline.status(), StatusCode::BAD_REQUEST);

        let config =
            ApiError(BotError::Configuration("DERIV_API_TOKEN not set".into())).into_response();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let conn = ApiError(BotError::Connection(VenueError::Transport("reset".into())))
            .into_response();
        assert_eq!(conn.status(), StatusCode::BAD_GATEWAY);
    }
}
