//! # Ledger RPC — Node API Seam
//!
//! [`LedgerRpc`] abstracts the node's HTTP surface so the client and the
//! seal workflow can be exercised against scripted implementations in
//! tests. [`HttpLedgerRpc`] is the production implementation over reqwest.
//!
//! ## Error mapping
//!
//! The node's machine-readable error codes are part of the wire contract;
//! this module is where they become seal-taxonomy values:
//!
//! - transport failure after retries → `NetworkUnavailable`
//! - `402 INSUFFICIENT_FUNDS` → `InsufficientFunds` (amounts from details)
//! - other 4xx → `Rejected { fee_charged: false }` (refused at broadcast)
//! - 5xx → `NetworkUnavailable` (node replied, but unusably)
//! - `404` on read endpoints → `Ok(None)`, not an error
//!
//! Transport failures (refused connection, reset, timeout) are retried per
//! the rpc's [`RetryPolicy`] before becoming `NetworkUnavailable`. Anything
//! the node actually answered is never retried here — a rejected broadcast
//! must not be re-broadcast, and the receipt poll loop in
//! [`LedgerClient`](crate::LedgerClient) owns read-path repetition.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use sakshi_core::{
    EvidenceRecord, SealError, SequenceId, TransactionId, TransactionReceipt,
};
use sakshi_ledger::SignedTransaction;

/// Ledger head summary, as reported by `/v1/records/head`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerHead {
    /// The sequence id the next confirmed submission will receive.
    pub next_sequence_id: SequenceId,
    /// Number of blocks produced.
    pub block_height: u64,
}

/// Remote interface to a ledger node.
///
/// Implementations must be `Send + Sync` so one rpc handle can serve
/// concurrent seal workflows. Methods return explicitly `Send` futures so
/// callers can spawn them onto a multi-threaded runtime.
pub trait LedgerRpc: Send + Sync {
    /// Broadcast a signed transaction; resolves with the id once the node
    /// accepts it into the pending pool.
    fn broadcast(
        &self,
        tx: &SignedTransaction,
    ) -> impl Future<Output = Result<TransactionId, SealError>> + Send;

    /// The receipt for a transaction, `None` if the node does not know the id.
    fn receipt(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<Option<TransactionReceipt>, SealError>> + Send;

    /// The record at a sequence id, `None` past the head.
    fn record(
        &self,
        sequence_id: SequenceId,
    ) -> impl Future<Output = Result<Option<EvidenceRecord>, SealError>> + Send;

    /// The ledger head.
    fn head(&self) -> impl Future<Output = Result<LedgerHead, SealError>> + Send;
}

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Backoff schedule applied to transport failures.
///
/// Retries only cover requests the node never answered; they are safe to
/// repeat for every endpoint here because broadcasting the same signed
/// envelope twice is a duplicate the chain refuses, and reads are pure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retry attempts after the initial request.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Fail on the first transport error. Used by tests and interactive
    /// callers that prefer a fast verdict over ride-through.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based).
    fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Wire shape of the node's error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Wire shape of a successful broadcast response.
#[derive(Debug, Deserialize)]
struct BroadcastResponse {
    transaction_id: TransactionId,
}

/// reqwest-backed [`LedgerRpc`] implementation.
#[derive(Debug, Clone)]
pub struct HttpLedgerRpc {
    client: reqwest::Client,
    base: Url,
    retry: RetryPolicy,
}

impl HttpLedgerRpc {
    /// Create a client for a node at `base_url` (e.g. `http://127.0.0.1:8545`)
    /// with the default retry policy.
    pub fn new(base_url: &str) -> Result<Self, SealError> {
        let base = Url::parse(base_url)
            .map_err(|e| SealError::NetworkUnavailable(format!("invalid node url: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the transport retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, SealError> {
        self.base
            .join(path)
            .map_err(|e| SealError::NetworkUnavailable(format!("invalid endpoint {path}: {e}")))
    }

    /// Send a request, retrying transport failures per the policy.
    ///
    /// Anything the node answered — any status code — is returned as-is;
    /// only errors where no response exists consume retry attempts.
    async fn send_with_retry<F, Fut>(&self, send: F) -> Result<reqwest::Response, SealError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        for attempt in 0..self.retry.max_retries {
            match send().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let delay = self.retry.delay(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        "node request failed, retrying in {delay:?}: {e}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
        send().await.map_err(transport_error)
    }

    /// Credit an address via the dev faucet. Not part of [`LedgerRpc`] —
    /// funding is a development concern, not a ledger operation.
    pub async fn fund(&self, address: &sakshi_core::ChainAddress, amount: u64) -> Result<u64, SealError> {
        let url = self.endpoint("/v1/faucet")?;
        let body = serde_json::json!({"address": address, "amount": amount});
        let resp = self
            .send_with_retry(|| self.client.post(url.clone()).json(&body).send())
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        #[derive(Deserialize)]
        struct BalanceResponse {
            balance: u64,
        }
        let parsed: BalanceResponse = resp.json().await.map_err(invalid_response)?;
        Ok(parsed.balance)
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, SealError> {
        let url = self.endpoint(path)?;
        let resp = self
            .send_with_retry(|| self.client.get(url.clone()).send())
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let parsed = resp.json().await.map_err(invalid_response)?;
        Ok(Some(parsed))
    }
}

impl LedgerRpc for HttpLedgerRpc {
    async fn broadcast(&self, tx: &SignedTransaction) -> Result<TransactionId, SealError> {
        let url = self.endpoint("/v1/transactions")?;
        let resp = self
            .send_with_retry(|| self.client.post(url.clone()).json(tx).send())
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let parsed: BroadcastResponse = resp.json().await.map_err(invalid_response)?;
        tracing::debug!(transaction_id = %parsed.transaction_id, "transaction broadcast");
        Ok(parsed.transaction_id)
    }

    async fn receipt(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionReceipt>, SealError> {
        self.get_optional(&format!("/v1/transactions/{id}")).await
    }

    async fn record(&self, sequence_id: SequenceId) -> Result<Option<EvidenceRecord>, SealError> {
        self.get_optional(&format!("/v1/records/{sequence_id}")).await
    }

    async fn head(&self) -> Result<LedgerHead, SealError> {
        self.get_optional("/v1/records/head")
            .await?
            .ok_or_else(|| SealError::NetworkUnavailable("head endpoint missing".to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> SealError {
    SealError::NetworkUnavailable(e.to_string())
}

fn invalid_response(e: reqwest::Error) -> SealError {
    SealError::NetworkUnavailable(format!("invalid node response: {e}"))
}

/// Translate a non-success response into the seal taxonomy.
async fn error_from_response(resp: reqwest::Response) -> SealError {
    let status = resp.status();
    let body: Option<ErrorBody> = resp.json().await.ok();

    if status.is_server_error() {
        let msg = body
            .map(|b| b.error.message)
            .unwrap_or_else(|| status.to_string());
        return SealError::NetworkUnavailable(format!("node error: {msg}"));
    }

    match body {
        Some(b) if b.error.code == "INSUFFICIENT_FUNDS" => {
            let details = b.error.details.unwrap_or_default();
            SealError::InsufficientFunds {
                address: details["address"].as_str().unwrap_or_default().to_string(),
                required: details["required"].as_u64().unwrap_or_default(),
                available: details["available"].as_u64().unwrap_or_default(),
            }
        }
        Some(b) => SealError::Rejected {
            reason: format!("{}: {}", b.error.code, b.error.message),
            fee_charged: false,
        },
        None => SealError::Rejected {
            reason: status.to_string(),
            fee_charged: false,
        },
    }
}
