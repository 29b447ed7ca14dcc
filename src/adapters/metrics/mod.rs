//! Prometheus Metrics Registry - Bot Observability
//!
//! Registers and exposes Prometheus metrics for the control surface.
//! Covers the gate value, trade outcomes by error class, and venue
//! connectivity checks. Served as text exposition on `GET /metrics`.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the trading bot.
///
/// All metrics follow the naming convention `deriv_bot_*`.
pub struct BotMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Gate value (1 = online, 0 = offline).
    pub bot_online: IntGauge,
    /// Total trades executed successfully.
    pub trades_executed: IntCounter,
    /// Total trades failed, labeled by error class.
    pub trades_failed: IntCounterVec,
    /// Total start() attempts that failed a dependency check.
    pub start_failures: IntCounter,
}

impl BotMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let bot_online = IntGauge::new(
            "deriv_bot_online",
            "Online/offline gate value (1 = online)",
        )?;

        let trades_executed = IntCounter::new(
            "deriv_bot_trades_executed_total",
            "Total trades executed successfully",
        )?;

        let trades_failed = IntCounterVec::new(
            Opts::new("deriv_bot_trades_failed_total", "Total trades failed"),
            &["class"],
        )?;

        let start_failures = IntCounter::new(
            "deriv_bot_start_failures_total",
            "Total failed startup dependency checks",
        )?;

        registry.register(Box::new(bot_online.clone()))?;
        registry.register(Box::new(trades_executed.clone()))?;
        registry.register(Box::new(trades_failed.clone()))?;
        registry.register(Box::new(start_failures.clone()))?;

        Ok(Self {
            registry,
            bot_online,
            trades_executed,
            trades_failed,
            start_failures,
        })
    }

    /// Encode all registered metrics as Prometheus text exposition.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
