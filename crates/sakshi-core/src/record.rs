//! # Evidence Data Model
//!
//! The two record shapes of the notarization flow:
//!
//! - [`EvidenceRecord`] — the on-chain record. Created exactly once per
//!   confirmed submission, never mutated or deleted.
//! - [`TransactionReceipt`] — the confirmation result surfaced to the
//!   caller, owned by the caller once returned.
//!
//! [`LedgerEvent`] mirrors the event the original contract emitted on each
//! stored record.

use serde::{Deserialize, Serialize};

use crate::digest::ContentHash;
use crate::identity::{BlockRef, ChainAddress, ExternalRef, SequenceId, TransactionId};
use crate::temporal::Timestamp;

/// An immutable on-chain evidence record.
///
/// # Invariants
///
/// - Created exactly once per confirmed transaction; no update or delete
///   operation exists anywhere in the stack.
/// - `sequence_id` values are assigned in strictly increasing order with no
///   gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Position of this record in the ledger.
    pub sequence_id: SequenceId,
    /// SHA-256 digest of the evidence bytes.
    pub content_hash: ContentHash,
    /// Off-chain pointer to the evidence bytes.
    pub external_ref: ExternalRef,
    /// Ledger time at which the record was appended (unix seconds on chain).
    pub submitted_at: Timestamp,
    /// Address that signed the submitting transaction.
    pub submitter: ChainAddress,
}

/// Status of a broadcast transaction as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Accepted into the pending pool, not yet included in a block.
    Pending,
    /// Included in a finalized block; the record exists.
    Confirmed {
        /// The sequence id the ledger assigned.
        sequence_id: SequenceId,
    },
    /// Included in a block and reverted. The fee was spent; no record exists.
    Failed {
        /// Why the ledger reverted the transaction.
        reason: String,
    },
}

impl ReceiptStatus {
    /// Whether this status is terminal (no further polling will change it).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// The confirmation result of a single submission.
///
/// Owned by the ledger client for the duration of one submission, then by
/// the caller. `block_ref` is present exactly when the transaction was
/// included in a block (confirmed or reverted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// The transaction this receipt describes.
    pub transaction_id: TransactionId,
    /// The including block, if the transaction has been included.
    pub block_ref: Option<BlockRef>,
    /// Current status.
    #[serde(flatten)]
    pub status: ReceiptStatus,
}

impl TransactionReceipt {
    /// A receipt for a transaction still in the pending pool.
    pub fn pending(transaction_id: TransactionId) -> Self {
        Self {
            transaction_id,
            block_ref: None,
            status: ReceiptStatus::Pending,
        }
    }
}

/// Event emitted by the ledger for each appended record.
///
/// The original contract `emit`ted the new record on every store; the
/// in-process ledger accumulates these so the node can expose them and
/// tests can assert on emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// The record that was appended.
    pub record: EvidenceRecord,
    /// The transaction that produced it.
    pub transaction_id: TransactionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> EvidenceRecord {
        EvidenceRecord {
            sequence_id: SequenceId(3),
            content_hash: ContentHash::from_bytes([9u8; 32]),
            external_ref: ExternalRef::new("ipfs://abc").unwrap(),
            submitted_at: Timestamp::parse("2026-02-19T12:00:00Z").unwrap(),
            submitter: ChainAddress::from_bytes([1u8; 20]),
        }
    }

    #[test]
    fn record_serde_roundtrip() {
        let rec = sample_record();
        let json = serde_json::to_string(&rec).unwrap();
        let back: EvidenceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn receipt_status_terminality() {
        assert!(!ReceiptStatus::Pending.is_terminal());
        assert!(ReceiptStatus::Confirmed {
            sequence_id: SequenceId(0)
        }
        .is_terminal());
        assert!(ReceiptStatus::Failed {
            reason: "reverted".into()
        }
        .is_terminal());
    }

    #[test]
    fn receipt_serde_tagged_status() {
        let receipt = TransactionReceipt {
            transaction_id: TransactionId::from_bytes([2u8; 32]),
            block_ref: Some(BlockRef {
                height: 7,
                block_hash: "abcd".into(),
            }),
            status: ReceiptStatus::Confirmed {
                sequence_id: SequenceId(4),
            },
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["sequence_id"], 4);
        let back: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert_eq!(back, receipt);
    }

    #[test]
    fn pending_receipt_has_no_block() {
        let r = TransactionReceipt::pending(TransactionId::from_bytes([0u8; 32]));
        assert!(r.block_ref.is_none());
        assert_eq!(r.status, ReceiptStatus::Pending);
    }
}
