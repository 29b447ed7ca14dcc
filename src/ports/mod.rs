//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `VenueConnector` / `VenueSession`: authenticated single-use order
//!   sessions against the trading venue
//! - `DecisionOracle` / `OracleProvider`: trading-signal requests and
//!   fail-fast credential validation

pub mod oracle;
pub mod venue;
