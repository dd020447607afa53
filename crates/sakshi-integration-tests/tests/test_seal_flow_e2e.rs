//! End-to-end seal flow against a real in-process node.
//!
//! Test strategy:
//! 1. Start a sakshi-node HTTP server on a random port, producer running
//! 2. Fund the submitter via the dev faucet
//! 3. Drive a SealFlow from a file on disk to the SEALED phase
//! 4. Read the record back over the public API and compare digests

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use sakshi_client::{HttpLedgerRpc, LedgerClient, LedgerRpc};
use sakshi_core::{ExternalRef, SequenceId};
use sakshi_crypto::{KeyProvider, LocalKeyProvider};
use sakshi_node::config::NodeConfig;
use sakshi_node::state::AppState;
use sakshi_workflow::SealFlow;

/// Start a node on a random available port. Returns the base URL and a
/// shutdown sender; the block producer runs unless `block_interval` is
/// `None`.
async fn start_node(
    block_interval: Option<Duration>,
) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind to random port");
    let port = listener.local_addr().unwrap().port();

    let config = NodeConfig {
        bind_addr: listener.local_addr().unwrap(),
        block_interval: block_interval.unwrap_or(Duration::from_millis(50)),
        submission_fee: 10,
        faucet_enabled: true,
    };
    let state = AppState::new(config);

    if let Some(interval) = block_interval {
        tokio::spawn(sakshi_node::producer::run(state.clone(), interval));
    }

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
async fn file_seals_end_to_end_and_record_round_trips() {
    let (base, _shutdown) = start_node(Some(Duration::from_millis(50))).await;

    let signer = Arc::new(LocalKeyProvider::generate());
    let address = signer.address().unwrap();
    let rpc = HttpLedgerRpc::new(&base).unwrap();
    rpc.fund(&address, 100).await.unwrap();

    let client = LedgerClient::new(rpc, signer, 10);

    let mut evidence = tempfile::NamedTempFile::new().unwrap();
    evidence.write_all(b"bodycam clip, shift 3").unwrap();

    let sealed = SealFlow::new(ExternalRef::new("ipfs://bafy-shift3").unwrap())
        .hash_file(evidence.path())
        .unwrap()
        .broadcast(&client)
        .await
        .unwrap()
        .confirm(&client, Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(sealed.sequence_id(), SequenceId(0));
    assert!(sealed.receipt().block_ref.is_some());

    // The record the node serves must match what the flow computed locally.
    let record = sealed.fetch_record(&client).await.unwrap();
    assert_eq!(record.content_hash, sealed.content_hash());
    assert_eq!(record.external_ref.as_str(), "ipfs://bafy-shift3");
    assert_eq!(record.submitter, address);

    // And the fee is reflected on the account.
    let body: serde_json::Value = reqwest::Client::new()
        .get(format!("{base}/v1/accounts/{address}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["balance"], serde_json::json!(90));
}

#[tokio::test]
async fn repeat_seal_of_same_bytes_gets_a_new_sequence_id() {
    let (base, _shutdown) = start_node(Some(Duration::from_millis(50))).await;

    let signer = Arc::new(LocalKeyProvider::generate());
    let rpc = HttpLedgerRpc::new(&base).unwrap();
    rpc.fund(&signer.address().unwrap(), 100).await.unwrap();
    let client = LedgerClient::new(rpc, signer, 10);

    let reference = ExternalRef::new("ipfs://bafy-dup").unwrap();
    let mut sequence_ids = Vec::new();
    for _ in 0..2 {
        let sealed = SealFlow::new(reference.clone())
            .hash_bytes(b"identical evidence bytes")
            .broadcast(&client)
            .await
            .unwrap()
            .confirm(&client, Duration::from_secs(10))
            .await
            .unwrap();
        sequence_ids.push(sealed.sequence_id());
    }

    assert_eq!(sequence_ids, vec![SequenceId(0), SequenceId(1)]);

    // Both records exist and hold the same hash.
    let r0 = client.get_record(SequenceId(0)).await.unwrap().unwrap();
    let r1 = client.get_record(SequenceId(1)).await.unwrap().unwrap();
    assert_eq!(r0.content_hash, r1.content_hash);
    assert_ne!(r0.sequence_id, r1.sequence_id);
}
