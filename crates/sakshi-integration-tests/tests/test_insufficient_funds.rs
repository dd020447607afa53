//! An unfunded submitter is refused atomically at broadcast.
//!
//! The refusal must name the shortfall, charge nothing, and leave no trace
//! on the ledger — no pending transaction, no record, no receipt.

use std::sync::Arc;
use std::time::Duration;

use sakshi_client::{HttpLedgerRpc, LedgerClient, LedgerRpc};
use sakshi_core::{ExternalRef, SealError, SequenceId};
use sakshi_crypto::{KeyProvider, LocalKeyProvider};
use sakshi_node::config::NodeConfig;
use sakshi_node::state::AppState;
use sakshi_workflow::SealFlow;

async fn start_node() -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind to random port");
    let port = listener.local_addr().unwrap().port();

    let config = NodeConfig {
        bind_addr: listener.local_addr().unwrap(),
        block_interval: Duration::from_millis(50),
        submission_fee: 10,
        faucet_enabled: true,
    };
    let state = AppState::new(config);
    tokio::spawn(sakshi_node::producer::run(
        state.clone(),
        Duration::from_millis(50),
    ));

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let app = sakshi_node::app(state);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .ok();
    });

    let base = format!("http://127.0.0.1:{port}");
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client.get(format!("{base}/health")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    (base, tx)
}

#[tokio::test]
async fn unfunded_submitter_is_refused_with_shortfall_and_no_ledger_trace() {
    let (base, _shutdown) = start_node().await;

    let signer = Arc::new(LocalKeyProvider::generate());
    let expected_address = signer.address().unwrap();
    let rpc = HttpLedgerRpc::new(&base).unwrap();
    let client = LedgerClient::new(rpc, signer, 10);

    let flow = SealFlow::new(ExternalRef::new("ipfs://bafy-unfunded").unwrap())
        .hash_bytes(b"unfunded submission");

    match flow.broadcast(&client).await {
        Err(SealError::InsufficientFunds {
            address,
            required,
            available,
        }) => {
            assert_eq!(address, expected_address.to_string());
            assert_eq!(required, 10);
            assert_eq!(available, 0);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }

    // Nothing was charged (a refused broadcast is fee-free by definition of
    // the error) and nothing reached the ledger.
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(client.get_record(SequenceId(0)).await.unwrap().is_none());

    let head: serde_json::Value = reqwest::Client::new()
        .get(format!("{base}/v1/records/head"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(head["next_sequence_id"], serde_json::json!(0));
}

#[tokio::test]
async fn partially_funded_submitter_reports_its_balance() {
    let (base, _shutdown) = start_node().await;

    let signer = Arc::new(LocalKeyProvider::generate());
    let rpc = HttpLedgerRpc::new(&base).unwrap();
    rpc.fund(&signer.address().unwrap(), 7).await.unwrap();
    let client = LedgerClient::new(rpc, signer, 10);

    let result = client
        .submit(
            sakshi_crypto::hash_bytes(b"x"),
            ExternalRef::new("ipfs://bafy-short").unwrap(),
        )
        .await;

    match result {
        Err(SealError::InsufficientFunds {
            required,
            available,
            ..
        }) => {
            assert_eq!(required, 10);
            assert_eq!(available, 7);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}
