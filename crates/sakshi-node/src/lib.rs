//! # sakshi-node — HTTP Node for the Evidence Ledger
//!
//! Hosts the single-node chain behind an Axum API. This is the successor of
//! the original relay backend: where that service exposed one `/store`
//! endpoint signing on behalf of every caller with a server-held key, this
//! node accepts client-signed transactions — key custody stays with the
//! submitter.
//!
//! ## API Surface
//!
//! | Endpoint | Method | Purpose |
//! |---|---|---|
//! | `/health` | GET | liveness probe |
//! | `/v1/transactions` | POST | broadcast a signed transaction (202) |
//! | `/v1/transactions/{id}` | GET | transaction receipt |
//! | `/v1/records` | GET | all records in submission order |
//! | `/v1/records/head` | GET | next sequence id, block height |
//! | `/v1/records/{seq}` | GET | record by sequence id |
//! | `/v1/events` | GET | ledger events in emission order |
//! | `/v1/faucet` | POST | dev funding (config-gated) |
//! | `/v1/accounts/{address}` | GET | fee balance |
//!
//! No authentication: the chain's own signature verification is the only
//! gate, and anyone may read the public ledger. (The original app's login
//! screens were prototype stubs, deliberately not reproduced.)

pub mod config;
pub mod error;
pub mod producer;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Body size limit: 1 MiB — transactions are small; evidence bytes never
/// travel through this API (only their hash does).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::transactions::router())
        .merge(routes::records::router())
        .merge(routes::faucet::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use sakshi_core::Timestamp;
    use sakshi_crypto::{KeyProvider, LocalKeyProvider};
    use sakshi_ledger::{SignedTransaction, TransactionPayload};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(crate::config::NodeConfig::default())
    }

    async fn response_json(
        response: axum::http::Response<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn signed_tx(provider: &LocalKeyProvider, label: &str) -> SignedTransaction {
        let payload = TransactionPayload::new(
            sakshi_crypto::hash_bytes(label.as_bytes()),
            sakshi_core::ExternalRef::new(format!("ipfs://{label}")).unwrap(),
            10,
        );
        SignedTransaction::sign(payload, provider).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app(test_state());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn broadcast_unfunded_is_payment_required() {
        let app = app(test_state());
        let provider = LocalKeyProvider::generate();
        let tx = signed_tx(&provider, "unfunded");
        let resp = app
            .oneshot(
                Request::post("/v1/transactions")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&tx).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"]["code"], "INSUFFICIENT_FUNDS");
    }

    #[tokio::test]
    async fn faucet_then_broadcast_then_record() {
        let state = test_state();
        let provider = LocalKeyProvider::generate();
        let address = provider.address().unwrap();

        // Fund.
        let resp = app(state.clone())
            .oneshot(
                Request::post("/v1/faucet")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"address": address, "amount": 100}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 100);

        // Broadcast.
        let tx = signed_tx(&provider, "seal-me");
        let resp = app(state.clone())
            .oneshot(
                Request::post("/v1/transactions")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&tx).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let tx_id = body["transaction_id"].as_str().unwrap().to_string();

        // Receipt is pending before any block.
        let resp = app(state.clone())
            .oneshot(
                Request::get(format!("/v1/transactions/{tx_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "pending");

        // Cut a block, then the record exists at sequence 0.
        state.chain.write().produce_block(Timestamp::now()).unwrap();
        let resp = app(state.clone())
            .oneshot(Request::get("/v1/records/0").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["external_ref"], "ipfs://seal-me");
        assert_eq!(body["submitter"], address.to_string());
    }

    #[tokio::test]
    async fn record_past_head_is_not_found() {
        let app = app(test_state());
        let resp = app
            .oneshot(Request::get("/v1/records/99").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, body) = response_json(resp).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn faucet_disabled_is_forbidden() {
        let mut config = crate::config::NodeConfig::default();
        config.faucet_enabled = false;
        let app = app(AppState::new(config));
        let resp = app
            .oneshot(
                Request::post("/v1/faucet")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "address": sakshi_core::ChainAddress::from_bytes([1u8; 20]),
                            "amount": 1
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_receipt_is_not_found() {
        let app = app(test_state());
        let id = sakshi_core::TransactionId::from_bytes([3u8; 32]);
        let resp = app
            .oneshot(
                Request::get(format!("/v1/transactions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
