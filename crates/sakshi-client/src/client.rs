//! # Ledger Client — Submit and Await
//!
//! [`LedgerClient`] is the submitting side of the sealing pipeline. It
//! owns nothing chain-side: key custody comes in through an injected
//! [`KeyProvider`], transport through a [`LedgerRpc`] implementation.
//!
//! `await_confirmation` polls receipts against a deadline. The deadline is
//! checked before a receipt is reported, never after, so a transaction that
//! confirms past the deadline still surfaces as a timeout. A timeout says
//! "unknown at the deadline", not "failed" — the transaction may well
//! confirm later, and callers can re-poll the same id.

use std::sync::Arc;
use std::time::Duration;

use sakshi_core::{
    ChainAddress, ContentHash, EvidenceRecord, ExternalRef, SealError, SequenceId, TransactionId,
    TransactionReceipt,
};
use sakshi_crypto::KeyProvider;
use sakshi_ledger::{SignedTransaction, TransactionPayload};

use crate::rpc::LedgerRpc;

/// Receipt poll interval while awaiting confirmation.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Submitting client: signs payloads with an injected key and talks to a
/// node via an injected rpc.
pub struct LedgerClient<R: LedgerRpc> {
    rpc: R,
    signer: Arc<dyn KeyProvider>,
    fee: u64,
}

impl<R: LedgerRpc> LedgerClient<R> {
    pub fn new(rpc: R, signer: Arc<dyn KeyProvider>, fee: u64) -> Self {
        Self { rpc, signer, fee }
    }

    /// The chain address transactions from this client are debited against.
    pub fn address(&self) -> Result<ChainAddress, SealError> {
        Ok(self.signer.address()?)
    }

    /// Access the underlying rpc, e.g. for dev-only funding calls.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Sign and broadcast a submission. Resolves once the node accepts the
    /// transaction into its pending pool; confirmation is a separate step.
    ///
    /// A fresh nonce is drawn per call, so submitting the same hash and
    /// reference twice produces two distinct transactions.
    pub async fn submit(
        &self,
        content_hash: ContentHash,
        external_ref: ExternalRef,
    ) -> Result<TransactionId, SealError> {
        let payload = TransactionPayload::new(content_hash, external_ref, self.fee);
        let tx = SignedTransaction::sign(payload, self.signer.as_ref())?;
        let id = self.rpc.broadcast(&tx).await?;
        tracing::info!(transaction_id = %id, "submission broadcast");
        Ok(id)
    }

    /// Poll until the transaction's receipt is terminal or `timeout` elapses.
    ///
    /// Returns the terminal receipt — confirmed or failed — or
    /// [`SealError::Timeout`] if no terminal receipt was observed before the
    /// deadline. Transient rpc failures during polling are tolerated; only
    /// the deadline ends the wait.
    pub async fn await_confirmation(
        &self,
        id: &TransactionId,
        timeout: Duration,
    ) -> Result<TransactionReceipt, SealError> {
        let started = tokio::time::Instant::now();
        let deadline = started + timeout;
        loop {
            if tokio::time::Instant::now() >= deadline {
                return Err(SealError::Timeout {
                    waited: started.elapsed(),
                });
            }
            match self.rpc.receipt(id).await {
                Ok(Some(receipt)) if receipt.status.is_terminal() => {
                    // A poll that started in time but finished late still
                    // reports a timeout; the receipt itself is re-pollable.
                    if tokio::time::Instant::now() >= deadline {
                        return Err(SealError::Timeout {
                            waited: started.elapsed(),
                        });
                    }
                    return Ok(receipt);
                }
                Ok(_) => {}
                Err(SealError::NetworkUnavailable(reason)) => {
                    tracing::warn!(%reason, "receipt poll failed, retrying");
                }
                Err(other) => return Err(other),
            }
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
        }
    }

    /// Fetch the confirmed record at a sequence id.
    pub async fn get_record(
        &self,
        sequence_id: SequenceId,
    ) -> Result<Option<EvidenceRecord>, SealError> {
        self.rpc.record(sequence_id).await
    }
}
