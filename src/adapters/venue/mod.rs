//! Venue Adapter - Deriv WebSocket Implementation
//!
//! Implements the venue ports over tokio-tungstenite:
//! - `client`: connector speaking the authorize-first protocol
//! - `session`: single-use order session over the open stream

pub mod client;
pub mod session;

pub use client::DerivVenue;
pub use session::DerivSession;
