//! # Seal Flow Typestate Machine
//!
//! Implements the seal lifecycle using the typestate pattern. Each phase is
//! a distinct type; invalid transitions are compile errors.
//!
//! ## Phases
//!
//! - `Idle` → flow created, nothing computed yet.
//! - `Hashed` → content digest computed locally.
//! - `Broadcast` → signed transaction accepted into the node's pending pool.
//! - `Sealed` → terminal, transaction confirmed into a ledger record.
//!
//! ## Allowed Transitions
//!
//! ```text
//! Idle ──hash_bytes()/hash_file()──▶ Hashed ──broadcast()──▶ Broadcast
//!                                                                │
//!                                                    confirm()───┘
//!                                                        │
//!                                                        ▼
//!                                                     Sealed
//! ```
//!
//! Failed transitions return `Err(SealError)` and consume the flow — there
//! is no retrying a dead flow; callers start over. The error says whether
//! the submission fee was spent: a broadcast refusal charges nothing, a
//! confirmed-then-reverted transaction does.
//!
//! ## Point of No Return
//!
//! Once `broadcast()` succeeds the transaction is in the node's pending
//! pool and nothing here can recall it. Dropping a `SealFlow<Broadcast>`
//! abandons the *wait*, not the transaction: it may still confirm, and the
//! id from [`SealFlow::transaction_id`] can be polled later.
//!
//! ## Compile-Time Safety Example
//!
//! The following does NOT compile — an unhashed flow has no `broadcast()`
//! method:
//!
//! ```compile_fail
//! use sakshi_workflow::SealFlow;
//! use sakshi_core::ExternalRef;
//!
//! let flow = SealFlow::new(ExternalRef::new("ipfs://x").unwrap());
//! // ERROR: no method named `broadcast` found for `SealFlow<Idle>`
//! let _ = flow.broadcast(todo!());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use sakshi_client::{LedgerClient, LedgerRpc};
use sakshi_core::{
    ContentHash, EvidenceRecord, ExternalRef, ReceiptStatus, SealError, SequenceId, Timestamp,
    TransactionId, TransactionReceipt,
};
use sakshi_crypto::hasher;

// ─── Phase Types (state-specific data lives on the phase) ────────────

/// Seal phase: flow created, nothing computed yet.
#[derive(Debug, Clone, Copy)]
pub struct Idle;

/// Seal phase: content digest computed locally.
#[derive(Debug, Clone)]
pub struct Hashed {
    content_hash: ContentHash,
}

/// Seal phase: transaction accepted into the node's pending pool.
#[derive(Debug, Clone)]
pub struct Broadcast {
    content_hash: ContentHash,
    transaction_id: TransactionId,
}

/// Seal phase: terminal, transaction confirmed into a ledger record.
#[derive(Debug, Clone)]
pub struct Sealed {
    content_hash: ContentHash,
    transaction_id: TransactionId,
    sequence_id: SequenceId,
    receipt: TransactionReceipt,
}

// ─── Sealed Trait ────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::Idle {}
    impl Sealed for super::Hashed {}
    impl Sealed for super::Broadcast {}
    impl Sealed for super::Sealed {}
}

/// Marker trait for the valid seal phases.
///
/// Sealed — only the four phases defined in this module implement it.
pub trait SealPhase: private::Sealed + std::fmt::Debug {
    /// Canonical phase name (e.g., "HASHED").
    fn name() -> &'static str;

    /// Whether this phase is terminal.
    fn is_terminal() -> bool {
        false
    }
}

impl SealPhase for Idle {
    fn name() -> &'static str {
        "IDLE"
    }
}
impl SealPhase for Hashed {
    fn name() -> &'static str {
        "HASHED"
    }
}
impl SealPhase for Broadcast {
    fn name() -> &'static str {
        "BROADCAST"
    }
}
impl SealPhase for Sealed {
    fn name() -> &'static str {
        "SEALED"
    }
    fn is_terminal() -> bool {
        true
    }
}

// ─── Phase Record ────────────────────────────────────────────────────

/// Record of a single phase transition in the seal lifecycle.
///
/// Every transition is logged with its timestamp, giving a chain-of-custody
/// trail a caller can attach to the evidence bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Phase before the transition.
    pub from_phase: String,
    /// Phase after the transition.
    pub to_phase: String,
    /// When the transition occurred (UTC).
    pub timestamp: Timestamp,
    /// Human-readable detail for the transition.
    pub detail: Option<String>,
}

// ─── The Flow ────────────────────────────────────────────────────────

/// A seal flow parameterized by its lifecycle phase.
///
/// Only phase-appropriate methods are available at compile time:
/// `SealFlow<Hashed>` has `.broadcast()` but not `.confirm()`;
/// `SealFlow<Broadcast>` has `.confirm()` but not `.broadcast()`.
#[derive(Debug)]
pub struct SealFlow<S: SealPhase> {
    /// Off-chain locator recorded alongside the hash.
    external_ref: ExternalRef,
    /// When the flow was created.
    started_at: Timestamp,
    /// Log of all phase transitions.
    phase_log: Vec<PhaseRecord>,
    state: S,
}

impl<S: SealPhase> SealFlow<S> {
    /// Canonical name of the current phase.
    pub fn phase_name(&self) -> &'static str {
        S::name()
    }

    /// The off-chain reference this flow seals.
    pub fn external_ref(&self) -> &ExternalRef {
        &self.external_ref
    }

    /// When the flow was created.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// The immutable phase log.
    pub fn phase_log(&self) -> &[PhaseRecord] {
        &self.phase_log
    }

    fn transition_to<T: SealPhase>(mut self, state: T, detail: Option<String>) -> SealFlow<T> {
        self.phase_log.push(PhaseRecord {
            from_phase: S::name().to_string(),
            to_phase: T::name().to_string(),
            timestamp: Timestamp::now(),
            detail,
        });
        SealFlow {
            external_ref: self.external_ref,
            started_at: self.started_at,
            phase_log: self.phase_log,
            state,
        }
    }
}

impl SealFlow<Idle> {
    /// Create a new flow for an off-chain reference.
    pub fn new(external_ref: ExternalRef) -> Self {
        Self {
            external_ref,
            started_at: Timestamp::now(),
            phase_log: Vec::new(),
            state: Idle,
        }
    }

    /// Hash in-memory evidence bytes (IDLE → HASHED).
    pub fn hash_bytes(self, bytes: &[u8]) -> SealFlow<Hashed> {
        let content_hash = hasher::hash_bytes(bytes);
        self.transition_to(
            Hashed { content_hash },
            Some(format!("hashed {} bytes", bytes.len())),
        )
    }

    /// Hash an evidence file from disk (IDLE → HASHED).
    ///
    /// The file is streamed, never loaded whole; an unreadable file is an
    /// input error and charges nothing.
    pub fn hash_file(self, path: impl AsRef<Path>) -> Result<SealFlow<Hashed>, SealError> {
        let path = path.as_ref();
        let content_hash = hasher::hash_file(path)?;
        let detail = format!("hashed file {}", path.display());
        Ok(self.transition_to(Hashed { content_hash }, Some(detail)))
    }
}

impl SealFlow<Hashed> {
    /// The computed content digest.
    pub fn content_hash(&self) -> ContentHash {
        self.state.content_hash
    }

    /// Sign and broadcast the submission (HASHED → BROADCAST).
    ///
    /// On `Err` the transaction was never accepted and no fee was spent.
    pub async fn broadcast<R: LedgerRpc>(
        self,
        client: &LedgerClient<R>,
    ) -> Result<SealFlow<Broadcast>, SealError> {
        let content_hash = self.state.content_hash;
        let transaction_id = client
            .submit(content_hash, self.external_ref.clone())
            .await?;
        tracing::info!(%transaction_id, %content_hash, "seal broadcast accepted");
        Ok(self.transition_to(
            Broadcast {
                content_hash,
                transaction_id,
            },
            Some(format!("broadcast as {transaction_id}")),
        ))
    }
}

impl SealFlow<Broadcast> {
    /// The computed content digest.
    pub fn content_hash(&self) -> ContentHash {
        self.state.content_hash
    }

    /// The broadcast transaction's id. Survives the flow: capture it before
    /// `confirm()` if you may need to re-poll after a timeout.
    pub fn transaction_id(&self) -> TransactionId {
        self.state.transaction_id
    }

    /// Await confirmation (BROADCAST → SEALED).
    ///
    /// Error semantics at this phase:
    ///
    /// - a failed receipt becomes `Rejected { fee_charged: true }` — the
    ///   transaction was included and reverted, so the fee is gone;
    /// - `Timeout` means unknown-at-deadline, not failed; the transaction
    ///   may still confirm and its id can be re-polled.
    pub async fn confirm<R: LedgerRpc>(
        self,
        client: &LedgerClient<R>,
        timeout: Duration,
    ) -> Result<SealFlow<Sealed>, SealError> {
        let id = self.state.transaction_id;
        let receipt = client.await_confirmation(&id, timeout).await?;
        match receipt.status {
            ReceiptStatus::Confirmed { sequence_id } => {
                tracing::info!(transaction_id = %id, %sequence_id, "evidence sealed");
                let content_hash = self.state.content_hash;
                Ok(self.transition_to(
                    Sealed {
                        content_hash,
                        transaction_id: id,
                        sequence_id,
                        receipt,
                    },
                    Some(format!("confirmed at sequence {sequence_id}")),
                ))
            }
            ReceiptStatus::Failed { reason } => Err(SealError::Rejected {
                reason,
                fee_charged: true,
            }),
            // await_confirmation only returns terminal receipts; a pending
            // one here means the node broke its receipt contract.
            ReceiptStatus::Pending => Err(SealError::NetworkUnavailable(
                "node returned a non-terminal receipt".to_string(),
            )),
        }
    }
}

impl SealFlow<Sealed> {
    /// The sealed content digest.
    pub fn content_hash(&self) -> ContentHash {
        self.state.content_hash
    }

    /// The confirmed transaction's id.
    pub fn transaction_id(&self) -> TransactionId {
        self.state.transaction_id
    }

    /// The ledger position assigned at confirmation.
    pub fn sequence_id(&self) -> SequenceId {
        self.state.sequence_id
    }

    /// The confirming receipt, including its block reference.
    pub fn receipt(&self) -> &TransactionReceipt {
        &self.state.receipt
    }

    /// Fetch the confirmed ledger record and check it matches what this
    /// flow submitted. A mismatch means the node served a record that is
    /// not ours and is reported as a rejection.
    pub async fn fetch_record<R: LedgerRpc>(
        &self,
        client: &LedgerClient<R>,
    ) -> Result<EvidenceRecord, SealError> {
        let record = client
            .get_record(self.state.sequence_id)
            .await?
            .ok_or_else(|| {
                SealError::NetworkUnavailable(format!(
                    "confirmed record {} missing from node",
                    self.state.sequence_id
                ))
            })?;
        if record.content_hash != self.state.content_hash {
            return Err(SealError::Rejected {
                reason: format!(
                    "record at sequence {} carries a different content hash",
                    self.state.sequence_id
                ),
                fee_charged: true,
            });
        }
        Ok(record)
    }
}
