//! Adapters Layer - External World Implementations
//!
//! Implements the ports against real collaborators:
//! - `venue`: Deriv WebSocket connector and single-use sessions
//! - `oracle`: OpenAI-compatible decision endpoint
//! - `api`: the HTTP control surface
//! - `metrics`: Prometheus registry

pub mod api;
pub mod metrics;
pub mod oracle;
pub mod venue;
