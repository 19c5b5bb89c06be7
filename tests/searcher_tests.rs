//! Searcher agent behaviour with real signing and policy over scripted and
//! in-process relays.

mod support;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use relay_searcher::adapter::outbound::relay::options::RelayOptions;
use relay_searcher::adapter::outbound::signer::Eip712BidSigner;
use relay_searcher::adapter::policy::FixedBidPolicy;
use relay_searcher::application::config::SearcherConfig;
use relay_searcher::application::searcher::SearcherAgent;
use relay_searcher::application::state::AgentState;
use relay_searcher::domain::bid::DEFAULT_BID_VALIDITY;
use relay_searcher::domain::status::BidStatus;
use relay_searcher::error::{Error, RelayError};
use relay_searcher::infrastructure::bootstrap;
use relay_searcher::testkit::domain::{disconnect_event, opportunity_event, status_event};
use relay_searcher::testkit::relay::ScriptedRelay;
use relay_searcher::testkit::stream::{channel_event_stream, ScriptedEventStream};
use serde_json::json;
use tokio::sync::oneshot;
use url::Url;

use support::fixtures::{status_push, wait_until, TEST_ADDRESS, TEST_CHAIN, TEST_KEY};
use support::mock_relay::MockRelay;

const NOW: u64 = 1_700_000_000;

fn config() -> SearcherConfig {
    SearcherConfig::new(Url::parse("http://localhost:9000").unwrap(), TEST_CHAIN)
}

fn agent_with(relay: Arc<ScriptedRelay>) -> Arc<SearcherAgent> {
    let config = config();
    let policy = FixedBidPolicy::new(config.bid_amount, DEFAULT_BID_VALIDITY);
    let signer = Eip712BidSigner::from_hex(TEST_KEY).unwrap();
    Arc::new(
        SearcherAgent::new(config, relay, Arc::new(policy), Arc::new(signer))
            .with_clock(Arc::new(|| NOW)),
    )
}

#[tokio::test]
async fn opportunity_is_signed_and_submitted() {
    let relay = Arc::new(ScriptedRelay::new().with_submit_results(vec![Ok("b-1".into())]));
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let mut events = ScriptedEventStream::new(vec![opportunity_event("op-1")]);
    let reason = agent.run(&mut events).await;

    assert_eq!(reason, "event stream ended");
    let submitted = relay.submitted();
    assert_eq!(submitted.len(), 1);
    let bid = &submitted[0];
    assert_eq!(bid.opportunity_id.as_str(), "op-1");
    assert_eq!(bid.amount, U256::from(100u64));
    assert_eq!(bid.valid_until, NOW + 86_400);
    assert_eq!(bid.executor.to_checksum(None), TEST_ADDRESS);
    assert_eq!(bid.signature.len(), 2 + 65 * 2);
    assert_eq!(agent.ledger().open_bids(), 1);
    assert_eq!(agent.state(), AgentState::Closed);
}

#[tokio::test]
async fn failed_submission_does_not_block_other_opportunities() {
    let relay = Arc::new(
        ScriptedRelay::new()
            .with_submit_delay(Duration::from_millis(50))
            .with_submit_results(vec![
                Err(RelayError::Rejected("relay unavailable".into()).into()),
                Ok("b-2".into()),
            ]),
    );
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let mut events = ScriptedEventStream::new(vec![
        opportunity_event("op-1"),
        opportunity_event("op-2"),
    ]);
    agent.run(&mut events).await;

    assert_eq!(relay.submit_count(), 2);
    assert_eq!(agent.ledger().open_bids(), 1);
    assert_eq!(agent.ledger().claimed(), 2);
    assert_eq!(relay.peak_submits_in_flight(), 2);
}

#[tokio::test]
async fn opportunities_are_handled_concurrently() {
    let relay = Arc::new(ScriptedRelay::new().with_submit_delay(Duration::from_millis(50)));
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let mut events = ScriptedEventStream::new(
        (0..8).map(|n| opportunity_event(&format!("op-{n}"))).collect(),
    );
    agent.run(&mut events).await;

    assert_eq!(relay.submit_count(), 8);
    assert_eq!(agent.ledger().open_bids(), 8);
    assert!(
        relay.peak_submits_in_flight() > 1,
        "submissions ran one at a time"
    );
}

#[tokio::test]
async fn redelivered_opportunity_is_submitted_once() {
    let relay = Arc::new(ScriptedRelay::new().with_submit_delay(Duration::from_millis(20)));
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let mut events = ScriptedEventStream::new(
        (0..5).map(|_| opportunity_event("op-1")).collect(),
    );
    agent.run(&mut events).await;

    assert_eq!(relay.submit_count(), 1);
}

#[tokio::test]
async fn unknown_status_does_not_stop_processing() {
    let relay = Arc::new(ScriptedRelay::new());
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let mut events = ScriptedEventStream::new(vec![
        status_event(
            "b-404",
            BidStatus::Other {
                tag: "rolled_back".into(),
            },
        ),
        opportunity_event("op-1"),
        disconnect_event("closed by relay"),
    ]);
    let reason = agent.run(&mut events).await;

    assert_eq!(reason, "closed by relay");
    assert_eq!(relay.submit_count(), 1);
}

#[tokio::test]
async fn status_updates_settle_acknowledged_bids() {
    let relay = Arc::new(ScriptedRelay::new().with_submit_results(vec![Ok("b-1".into())]));
    let agent = agent_with(relay.clone());
    agent.start().await.unwrap();

    let (mut events, handle) = channel_event_stream(16);
    let runner = {
        let agent = Arc::clone(&agent);
        tokio::spawn(async move { agent.run(&mut events).await })
    };

    handle.send(opportunity_event("op-1")).await;
    wait_until(|| agent.ledger().open_bids() == 1).await;

    handle
        .send(status_event(
            "b-1",
            BidStatus::Submitted {
                result: "0xabc".into(),
                index: 2,
            },
        ))
        .await;
    handle
        .send(status_event(
            "b-1",
            BidStatus::Lost {
                result: Some("0xdef".into()),
            },
        ))
        .await;
    wait_until(|| agent.ledger().open_bids() == 0).await;

    handle.close().await;
    assert_eq!(runner.await.unwrap(), "event stream ended");
}

#[tokio::test]
async fn subscribe_failure_closes_relay_once() {
    let relay = Arc::new(
        ScriptedRelay::new().with_subscribe_results(vec![Err(RelayError::Rejected(
            "chain not supported".into(),
        )
        .into())]),
    );
    let agent = agent_with(relay.clone());

    let err = agent.start().await.unwrap_err();

    assert!(matches!(err, Error::Relay(RelayError::Rejected(_))));
    assert_eq!(agent.state(), AgentState::Closed);
    assert_eq!(relay.close_count(), 1);
    assert_eq!(relay.submit_count(), 0);
}

#[tokio::test]
async fn searcher_bids_over_websocket_relay() {
    let mut relay = MockRelay::accepting().await;
    let config = SearcherConfig::new(relay.endpoint.clone(), TEST_CHAIN)
        .with_bid_amount(U256::from(250u64));

    let searcher = bootstrap::launch(config, TEST_KEY, &RelayOptions::default())
        .await
        .expect("launch");
    let agent = Arc::clone(&searcher.agent);
    assert_eq!(agent.state(), AgentState::Active);

    let subscribe = relay.next_request().await;
    assert_eq!(subscribe["method"], "subscribe");
    assert_eq!(subscribe["params"]["chain_ids"], json!([TEST_CHAIN]));

    let runner = tokio::spawn(searcher.run());

    relay.push(&support::fixtures::opportunity_push("op-1"));
    let post = relay.next_request().await;
    assert_eq!(post["method"], "post_opportunity_bid");
    assert_eq!(post["params"]["opportunity_id"], "op-1");
    let bid = &post["params"]["opportunity_bid"];
    assert_eq!(bid["amount"], "250");
    assert_eq!(bid["executor"], TEST_ADDRESS);
    assert_eq!(bid["permission_key"], "0xdeadbeef");
    assert_eq!(bid["signature"].as_str().map(str::len), Some(132));

    wait_until(|| agent.ledger().open_bids() == 1).await;
    relay.push(&status_push("b-1", json!({"type": "won", "result": "0xfeed"})));
    wait_until(|| agent.ledger().open_bids() == 0).await;

    relay.close();
    let reason = tokio::time::timeout(Duration::from_secs(5), runner)
        .await
        .expect("searcher did not stop")
        .unwrap();

    assert_eq!(reason, "closed by relay");
    assert_eq!(agent.state(), AgentState::Closed);
}

#[tokio::test]
async fn shutdown_closes_websocket_relay_and_returns() {
    let mut relay = MockRelay::start(Box::new(|request| match request["method"].as_str() {
        Some("subscribe") => Some(support::fixtures::success(request, serde_json::Value::Null)),
        _ => None,
    }))
    .await;
    let config = SearcherConfig::new(relay.endpoint.clone(), TEST_CHAIN);

    let searcher = bootstrap::launch(config, TEST_KEY, &RelayOptions::default())
        .await
        .expect("launch");
    let agent = Arc::clone(&searcher.agent);
    relay.next_request().await;

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let runner = tokio::spawn(searcher.run_until(async move {
        let _ = stop_rx.await;
    }));

    relay.push(&support::fixtures::opportunity_push("op-1"));
    let post = relay.next_request().await;
    assert_eq!(post["method"], "post_opportunity_bid");

    stop_tx.send(()).unwrap();
    let stopped = tokio::time::timeout(Duration::from_secs(5), runner)
        .await
        .expect("searcher did not stop")
        .unwrap();

    assert_eq!(stopped, None);
    assert_eq!(agent.state(), AgentState::Closed);
    assert_eq!(agent.ledger().open_bids(), 0);
}

#[tokio::test]
async fn launch_rejects_invalid_key_before_connecting() {
    let config = SearcherConfig::new(Url::parse("http://127.0.0.1:1").unwrap(), TEST_CHAIN);

    let result = bootstrap::launch(config, "not-a-key", &RelayOptions::default()).await;

    assert!(matches!(result, Err(Error::Signing(_))));
}
