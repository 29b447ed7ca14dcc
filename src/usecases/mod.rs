//! Usecases Layer - Orchestration Logic
//!
//! Business orchestration over the ports:
//! - `lifecycle`: the online/offline gate and dependency health checks
//! - `pipeline`: per-request trade execution

pub mod lifecycle;
pub mod pipeline;

pub use lifecycle::{BotGate, LifecycleController};
pub use pipeline::{TradeOutcome, TradePipeline};
