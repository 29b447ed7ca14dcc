//! Integration Tests — Lifecycle Gate and Trade Pipeline
//!
//! Tests the interaction between usecases and mocked ports. Uses
//! mockall for trait mocking and tokio::test for async tests. The
//! venue mocks count calls, so zero-I/O and exactly-one-close
//! properties are verified, not just assumed.

use std::sync::Arc;

use mockall::mock;
use mockall::predicate::*;
use serde_json::json;

use deriv_signal_bot::config::Credentials;
use deriv_signal_bot::domain::{BotError, BotState, OrderIntent, TradeRequest, VenueError};
use deriv_signal_bot::ports::oracle::{DecisionOracle, OracleProvider};
use deriv_signal_bot::ports::venue::{VenueConnector, VenueSession};
use deriv_signal_bot::usecases::{BotGate, LifecycleController, TradePipeline};

// ---- Mock Definitions ----

mock! {
    pub Venue {}

    #[async_trait::async_trait]
    impl VenueConnector for Venue {
        async fn connect(
            &self,
            token: &str,
        ) -> Result<Box<dyn VenueSession>, VenueError>;
    }
}

mock! {
    pub Session {}

    #[async_trait::async_trait]
    impl VenueSession for Session {
        async fn place_order(
            &mut self,
            intent: &OrderIntent,
        ) -> Result<serde_json::Value, VenueError>;

        async fn close(&mut self);
    }
}

mock! {
    pub Oracle {}

    #[async_trait::async_trait]
    impl DecisionOracle for Oracle {
        async fn signal(
            &self,
            symbol: &str,
            market_context: &serde_json::Value,
        ) -> Result<deriv_signal_bot::domain::DecisionSignal, deriv_signal_bot::domain::OracleError>;
    }
}

mock! {
    pub Provider {}

    impl OracleProvider for Provider {
        fn build(
            &self,
            api_key: &str,
        ) -> Result<Arc<dyn DecisionOracle>, BotError>;
    }
}

// ---- Helpers ----

fn full_credentials() -> Credentials {
    Credentials::new(Some("venue-token".to_string()), Some("sk-test".to_string()))
}

/// A venue whose connect succeeds with a session expecting only close.
fn healthy_venue(times: usize) -> MockVenue {
    let mut venue = MockVenue::new();
    venue
        .expect_connect()
        .with(eq("venue-token"))
        .times(times)
        .returning(|_| {
            let mut session = MockSession::new();
            session.expect_close().times(1).return_const(());
            Ok(Box::new(session) as Box<dyn VenueSession>)
        });
    venue
}

fn working_provider() -> MockProvider {
    let mut provider = MockProvider::new();
    provider
        .expect_build()
        .with(eq("sk-test"))
        .returning(|_| Ok(Arc::new(MockOracle::new()) as Arc<dyn DecisionOracle>));
    provider
}

fn controller(
    gate: &Arc<BotGate>,
    credentials: Credentials,
    venue: MockVenue,
    provider: MockProvider,
) -> LifecycleController {
    LifecycleController::new(
        Arc::clone(gate),
        credentials,
        Arc::new(venue),
        Arc::new(provider),
    )
}

// ---- Lifecycle ----

#[tokio::test]
async fn start_with_missing_venue_token_is_configuration_error() {
    let gate = Arc::new(BotGate::new());
    let mut venue = MockVenue::new();
    venue.expect_connect().times(0);
    let mut provider = MockProvider::new();
    provider.expect_build().times(0);

    let credentials = Credentials::new(None, Some("sk-test".to_string()));
    let lifecycle = controller(&gate, credentials, venue, provider);

    let err = lifecycle.start().await.unwrap_err();
    assert!(matches!(err, BotError::Configuration(_)));
    assert!(err.to_string().contains("DERIV_API_TOKEN"));
    assert_eq!(lifecycle.status(), BotState::Offline);
}

#[tokio::test]
async fn start_short_circuits_before_oracle_on_venue_failure() {
    let gate = Arc::new(BotGate::new());
    let mut venue = MockVenue::new();
    venue
        .expect_connect()
        .times(1)
        .returning(|_| Err(VenueError::Transport("connection reset".to_string())));

    // The oracle check must never run once the venue check failed.
    let mut provider = MockProvider::new();
    provider.expect_build().times(0);

    let lifecycle = controller(&gate, full_credentials(), venue, provider);

    let err = lifecycle.start().await.unwrap_err();
    assert!(matches!(err, BotError::Connection(_)));
    assert_eq!(lifecycle.status(), BotState::Offline);
}

#[tokio::test]
async fn start_with_missing_oracle_key_fails_after_venue_check() {
    let gate = Arc::new(BotGate::new());
    let venue = healthy_venue(1);
    let mut provider = MockProvider::new();
    provider.expect_build().times(0);

    let credentials = Credentials::new(Some("venue-token".to_string()), None);
    let lifecycle = controller(&gate, credentials, venue, provider);

    let err = lifecycle.start().await.unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    assert_eq!(lifecycle.status(), BotState::Offline);
}

#[tokio::test]
async fn start_with_both_dependencies_goes_online() {
    let gate = Arc::new(BotGate::new());
    let lifecycle = controller(&gate, full_credentials(), healthy_venue(1), working_provider());

    lifecycle.start().await.unwrap();
    assert_eq!(lifecycle.status(), BotState::Online);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let gate = Arc::new(BotGate::new());
    let lifecycle = controller(
        &gate,
        full_credentials(),
        MockVenue::new(),
        MockProvider::new(),
    );

    assert_eq!(lifecycle.status(), BotState::Offline);
    lifecycle.stop();
    lifecycle.stop();
    assert_eq!(lifecycle.status(), BotState::Offline);
}

#[tokio::test]
async fn stop_after_start_goes_back_offline() {
    let gate = Arc::new(BotGate::new());
    let lifecycle = controller(&gate, full_credentials(), healthy_venue(1), working_provider());

    lifecycle.start().await.unwrap();
    lifecycle.stop();
    assert_eq!(lifecycle.status(), BotState::Offline);
}

// ---- Pipeline ----

/// Bring a shared gate online through the controller, the only
/// component allowed to mutate it.
async fn online_gate() -> Arc<BotGate> {
    let gate = Arc::new(BotGate::new());
    let lifecycle = controller(&gate, full_credentials(), healthy_venue(1), working_provider());
    lifecycle.start().await.unwrap();
    gate
}

#[tokio::test]
async fn execute_while_offline_performs_zero_venue_io() {
    let gate = Arc::new(BotGate::new());
    let mut venue = MockVenue::new();
    venue.expect_connect().times(0);

    let pipeline = TradePipeline::new(gate, full_credentials(), Arc::new(venue));

    let err = pipeline.execute(TradeRequest::default()).await.unwrap_err();
    assert!(matches!(err, BotError::NotOnline));
}

#[tokio::test]
async fn execute_returns_raw_venue_reply() {
    let gate = online_gate().await;

    let mut venue = MockVenue::new();
    venue.expect_connect().times(1).returning(|_| {
        let mut session = MockSession::new();
        session
            .expect_place_order()
            .times(1)
            .withf(|intent| {
                intent.symbol == "frxEURUSD"
                    && intent.contract_kind.to_string() == "CALL"
                    && (intent.stake - 5.0).abs() < f64::EPSILON
            })
            .returning(|_| Ok(json!({ "buy": { "contract_id": 7 } })));
        session.expect_close().times(1).return_const(());
        Ok(Box::new(session) as Box<dyn VenueSession>)
    });

    let pipeline = TradePipeline::new(gate, full_credentials(), Arc::new(venue));
    let request = TradeRequest {
        symbol: "frxEURUSD".to_string(),
        action: "BUY".to_string(),
        amount: 5.0,
    };

    let outcome = pipeline.execute(request).await.unwrap();
    assert_eq!(outcome.venue_response["buy"]["contract_id"], 7);
}

#[tokio::test]
async fn execute_with_connect_failure_places_no_order() {
    let gate = online_gate().await;

    let mut venue = MockVenue::new();
    venue
        .expect_connect()
        .times(1)
        .returning(|_| Err(VenueError::Transport("dns failure".to_string())));

    let pipeline = TradePipeline::new(gate, full_credentials(), Arc::new(venue));

    let err = pipeline.execute(TradeRequest::default()).await.unwrap_err();
    assert!(matches!(err, BotError::Connection(_)));
    assert!(err.to_string().starts_with("Failed to connect"));
}

#[tokio::test]
async fn execute_closes_session_even_when_order_fails() {
    let gate = online_gate().await;

    let mut venue = MockVenue::new();
    venue.expect_connect().times(1).returning(|_| {
        let mut session = MockSession::new();
        session
            .expect_place_order()
            .times(1)
            .returning(|_| Err(VenueError::Transport("reset mid-order".to_string())));
        // Exactly one close, despite the failed order. The mock panics
        // on drop if this expectation is unmet.
        session.expect_close().times(1).return_const(());
        Ok(Box::new(session) as Box<dyn VenueSession>)
    });

    let pipeline = TradePipeline::new(gate, full_credentials(), Arc::new(venue));

    let err = pipeline.execute(TradeRequest::default()).await.unwrap_err();
    assert!(matches!(err, BotError::Connection(_)));
}

#[tokio::test]
async fn execute_maps_non_buy_actions_to_put() {
    let gate = online_gate().await;

    let mut venue = MockVenue::new();
    venue.expect_connect().times(1).returning(|_| {
        let mut session = MockSession::new();
        session
            .expect_place_order()
            .times(1)
            .withf(|intent| intent.contract_kind.to_string() == "PUT")
            .returning(|_| Ok(json!({ "buy": { "contract_id": 8 } })));
        session.expect_close().times(1).return_const(());
        Ok(Box::new(session) as Box<dyn VenueSession>)
    });

    let pipeline = TradePipeline::new(gate, full_credentials(), Arc::new(venue));
    let request = TradeRequest {
        action: "hold".to_string(),
        ..TradeRequest::default()
    };

    pipeline.execute(request).await.unwrap();
}
