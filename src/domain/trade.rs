//! Core trading domain types.
//!
//! Defines the caller-facing trade request, the derived order intent
//! sent to the venue, and the oracle's decision signal. These types
//! are the foundation of the hexagonal architecture's inner ring and
//! carry no I/O.

use serde::{Deserialize, Serialize};

/// Default instrument when the caller omits `symbol`.
pub const DEFAULT_SYMBOL: &str = "frxEURUSD";

/// Default action when the caller omits `action`.
pub const DEFAULT_ACTION: &str = "BUY";

/// Default stake when the caller omits `amount`.
pub const DEFAULT_STAKE: f64 = 1.0;

/// Online/offline gate value for the whole bot process.
///
/// Mutated only by the lifecycle controller; always `Offline` on
/// process start (no persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    /// Trades are rejected; dependencies not yet verified.
    Offline,
    /// Both dependencies verified; trades are admitted.
    Online,
}

impl std::fmt::Display for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offline => write!(f, "offline"),
            Self::Online => write!(f, "online"),
        }
    }
}

/// The venue's binary order-direction classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractKind {
    /// Price-rises contract, mapped from a buy intent.
    Call,
    /// Price-falls contract, mapped from everything else.
    Put,
}

impl ContractKind {
    /// Map a caller action string to a contract kind.
    ///
    /// Total and two-valued: a case-insensitive `"BUY"` yields `Call`,
    /// every other string (including `"SELL"`, `"hold"`, garbage)
    /// yields `Put`. Unrecognized actions are not rejected.
    pub fn from_action(action: &str) -> Self {
        if action.trim().eq_ignore_ascii_case("BUY") {
            Self::Call
        } else {
            Self::Put
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Caller input for one trade, as posted to the control surface.
///
/// Missing fields fall back to documented defaults. No validation of
/// symbol existence or stake bounds happens here; the venue is the
/// authority on both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Instrument identifier, e.g. `frxEURUSD`.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Caller intent, `"BUY"` or `"SELL"` (case-insensitive).
    #[serde(default = "default_action")]
    pub action: String,
    /// Stake in account currency.
    #[serde(default = "default_stake")]
    pub amount: f64,
}

impl Default for TradeRequest {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            action: default_action(),
            amount: default_stake(),
        }
    }
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_action() -> String {
    DEFAULT_ACTION.to_string()
}

fn default_stake() -> f64 {
    DEFAULT_STAKE
}

/// Immutable order derived from a [`TradeRequest`], ready for the venue.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    /// Instrument identifier.
    pub symbol: String,
    /// Stake in account currency.
    pub stake: f64,
    /// CALL/PUT direction derived from the caller action.
    pub contract_kind: ContractKind,
}

impl OrderIntent {
    /// Derive an intent from a caller request.
    pub fn from_request(request: &TradeRequest) -> Self {
        Self {
            symbol: request.symbol.clone(),
            stake: request.amount,
            contract_kind: ContractKind::from_action(&request.action),
        }
    }
}

/// Trading signal returned by the decision oracle.
///
/// Fetched through [`crate::ports::oracle::DecisionOracle`] but not
/// consulted by the order mapping: the pipeline maps BUY→CALL /
/// else→PUT regardless. Signal-driven gating is the documented
/// extension point, not current behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSignal {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for DecisionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Hold => write!(f, "hold"),
        }
    }
}
