//! Deriv Signal Bot — Entry Point
//!
//! Initializes configuration, logging, and the control surface, then
//! serves until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (defaults if absent) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Read credentials from env (DERIV_API_TOKEN, OPENAI_API_KEY);
//!    absence surfaces later as a structured /start error
//! 4. Create the venue connector and oracle provider
//! 5. Wire the shared gate, lifecycle controller, and trade pipeline
//! 6. Serve the control surface until SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use deriv_signal_bot::adapters::api::{self, AppState};
use deriv_signal_bot::adapters::metrics::BotMetrics;
use deriv_signal_bot::adapters::oracle::OpenAiOracleProvider;
use deriv_signal_bot::adapters::venue::DerivVenue;
use deriv_signal_bot::config::{self, Credentials};
use deriv_signal_bot::usecases::{BotGate, LifecycleController, TradePipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bot.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Deriv signal bot"
    );

    // ── 3. Read credentials from env ────────────────────────
    // Missing values are reported by /start, not here: the control
    // surface must come up so the caller sees a structured error.
    let credentials = Credentials::from_env();
    info!(
        venue_token_present = credentials.venue_token().is_some(),
        oracle_key_present = credentials.oracle_key().is_some(),
        "Credentials loaded"
    );

    // ── 4. Venue connector + oracle provider ────────────────
    let venue = Arc::new(DerivVenue::new(&config.venue));
    let oracle = Arc::new(OpenAiOracleProvider::new(config.oracle.clone()));

    // ── 5. Shared gate, lifecycle, pipeline, metrics ────────
    let gate = Arc::new(BotGate::new());
    let lifecycle = LifecycleController::new(
        Arc::clone(&gate),
        credentials.clone(),
        venue.clone(),
        oracle,
    );
    let pipeline = TradePipeline::new(Arc::clone(&gate), credentials, venue);
    let metrics = BotMetrics::new().context("Failed to register metrics")?;

    let state = Arc::new(AppState {
        lifecycle,
        pipeline,
        metrics,
    });

    // ── 6. Serve the control surface until SIGINT ───────────
    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;

    info!(address = %config.server.bind_address, "Control surface listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("SIGINT received, shutting down");
        })
        .await
        .context("Control surface server failed")?;

    info!("Shutdown complete");
    Ok(())
}
