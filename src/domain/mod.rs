//! Domain Layer - Pure Business Types
//!
//! The inner ring of the hexagonal architecture: trade requests,
//! order intents, the online/offline gate value, decision signals,
//! and the error taxonomy. No I/O, no async, no adapter imports.

pub mod error;
pub mod trade;

pub use error::{BotError, OracleError, VenueError};
pub use trade::{BotState, ContractKind, DecisionSignal, OrderIntent, TradeRequest};
