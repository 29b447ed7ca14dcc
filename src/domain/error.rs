//! Error taxonomy for the bot core.
//!
//! Every failure a caller can observe is one of four classes:
//! configuration (detected without network I/O), venue connection,
//! oracle, or the offline gate. All are terminal for the triggering
//! call; nothing is retried inside the core.

use thiserror::Error;

/// Venue transport or authorization failure.
///
/// Deliberately coarse: DNS, TLS, timeout, reset, and a reply carrying
/// an error member all collapse into one class. Callers must assume any
/// connect may fail and re-attempt with a fresh session, never by
/// reusing state.
#[derive(Debug, Error)]
pub enum VenueError {
    /// The transport itself failed before a reply was read.
    #[error("venue transport failure: {0}")]
    Transport(String),

    /// The venue replied, and the reply carried an error member.
    #[error("venue rejected the request: {0}")]
    Rejected(String),

    /// The session was used after being closed or consumed.
    #[error("venue session is closed")]
    SessionClosed,
}

/// Decision-oracle transport or reply-format failure.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The HTTP request did not complete.
    #[error("oracle request failed: {0}")]
    Transport(String),

    /// The oracle answered with a non-success HTTP status.
    #[error("oracle returned HTTP {0}")]
    Status(u16),

    /// The reply text was not the strict `{"signal": ...}` JSON shape.
    /// Explanatory prose around the JSON counts as malformed.
    #[error("oracle reply is not a valid signal: {0}")]
    MalformedReply(String),
}

/// Top-level error surfaced at the lifecycle/pipeline boundary.
#[derive(Debug, Error)]
pub enum BotError {
    /// Missing or malformed credentials, detected without network I/O.
    #[error("{0}")]
    Configuration(String),

    /// Venue connect or order placement failed.
    #[error("Failed to connect to venue: {0}")]
    Connection(#[from] VenueError),

    /// Oracle request or reply parsing failed.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Trade attempted while the gate is offline.
    #[error("Bot is offline. Start the bot first.")]
    NotOnline,
}

impl BotError {
    /// Short machine-readable class name, used in logs and metrics labels.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Connection(_) => "connection",
            Self::Oracle(_) => "oracle",
            Self::NotOnline => "not_online",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_message_names_the_venue() {
        let err = BotError::from(VenueError::Transport("dns failure".to_string()));
        assert!(err.to_string().starts_with("Failed to connect"));
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(BotError::NotOnline.class(), "not_online");
        assert_eq!(
            BotError::Configuration("DERIV_API_TOKEN not set".to_string()).class(),
            "configuration"
        );
        assert_eq!(
            BotError::from(OracleError::Status(429)).class(),
            "oracle"
        );
    }
}
