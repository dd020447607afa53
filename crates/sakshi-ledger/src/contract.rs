//! # Evidence Ledger Contract
//!
//! The append-only mapping at the heart of the stack. One meaningful
//! transition (`submit`), one read accessor (`get`), no update, no delete.
//!
//! ## Invariants
//!
//! - Sequence ids are assigned in strictly increasing order with no gaps:
//!   the next id is always the current record count.
//! - A stored record is never altered or removed — the public interface
//!   exposes no mutation of existing entries, and accessors hand out shared
//!   references only.
//! - `submit` either appends a complete record and emits an event, or
//!   reverts leaving the ledger untouched (no partial record, no sequence
//!   id consumed).
//!
//! ## Validation
//!
//! The contract checks only what the original did: the external reference
//! must be non-empty and within the declared length bound. Content hashes
//! are validated by their fixed-length type; the contract does not inspect
//! them further. Clients validate `ExternalRef` at construction, but the
//! wire deserializes it verbatim — the inclusion-time check here is what a
//! hostile or buggy client actually runs into, and it reverts (fee spent)
//! rather than refusing at broadcast.

use sakshi_core::identity::MAX_EXTERNAL_REF_LEN;
use sakshi_core::{
    ChainAddress, ContentHash, EvidenceRecord, ExternalRef, LedgerEvent, SequenceId, Timestamp,
    TransactionId,
};

use crate::error::ContractError;

/// The append-only evidence ledger.
#[derive(Debug, Default)]
pub struct EvidenceLedger {
    records: Vec<EvidenceRecord>,
    events: Vec<LedgerEvent>,
}

impl EvidenceLedger {
    /// An empty ledger with `next_sequence_id() == 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sequence id the next successful submission will receive.
    pub fn next_sequence_id(&self) -> SequenceId {
        SequenceId(self.records.len() as u64)
    }

    /// Append a record for a confirmed submission.
    ///
    /// On success the new record occupies `next_sequence_id()` and an event
    /// carrying it is emitted. On revert the ledger is exactly as before —
    /// the failed call consumes no sequence id.
    ///
    /// # Errors
    ///
    /// `ContractError::ExternalRefRejected` if the reference is empty or
    /// exceeds [`MAX_EXTERNAL_REF_LEN`] bytes.
    pub fn submit(
        &mut self,
        submitter: ChainAddress,
        content_hash: ContentHash,
        external_ref: ExternalRef,
        submitted_at: Timestamp,
        transaction_id: TransactionId,
    ) -> Result<EvidenceRecord, ContractError> {
        if external_ref.as_str().trim().is_empty() {
            return Err(ContractError::ExternalRefRejected(
                "must not be empty".to_string(),
            ));
        }
        if external_ref.as_str().len() > MAX_EXTERNAL_REF_LEN {
            return Err(ContractError::ExternalRefRejected(format!(
                "{} bytes exceeds maximum {MAX_EXTERNAL_REF_LEN}",
                external_ref.as_str().len()
            )));
        }

        let record = EvidenceRecord {
            sequence_id: self.next_sequence_id(),
            content_hash,
            external_ref,
            submitted_at,
            submitter,
        };
        self.events.push(LedgerEvent {
            record: record.clone(),
            transaction_id,
        });
        self.records.push(record.clone());
        Ok(record)
    }

    /// Read accessor: the record at `sequence_id`, or `None` past the head.
    pub fn get(&self, sequence_id: SequenceId) -> Option<&EvidenceRecord> {
        self.records.get(sequence_id.value() as usize)
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in submission order.
    pub fn records(&self) -> &[EvidenceRecord] {
        &self.records
    }

    /// All emitted events in emission order.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_one(ledger: &mut EvidenceLedger, tag: u8) -> SequenceId {
        let rec = ledger
            .submit(
                ChainAddress::from_bytes([tag; 20]),
                ContentHash::from_bytes([tag; 32]),
                ExternalRef::new(format!("ipfs://item-{tag}")).unwrap(),
                Timestamp::parse("2026-02-19T12:00:00Z").unwrap(),
                TransactionId::from_bytes([tag; 32]),
            )
            .expect("valid submission");
        rec.sequence_id
    }

    #[test]
    fn empty_ledger_starts_at_zero() {
        let ledger = EvidenceLedger::new();
        assert_eq!(ledger.next_sequence_id(), SequenceId::ZERO);
        assert!(ledger.is_empty());
        assert!(ledger.get(SequenceId(0)).is_none());
    }

    #[test]
    fn sequence_ids_strictly_increasing_no_gaps() {
        let mut ledger = EvidenceLedger::new();
        for i in 0..5u8 {
            assert_eq!(submit_one(&mut ledger, i), SequenceId(i as u64));
        }
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.next_sequence_id(), SequenceId(5));
    }

    #[test]
    fn round_trip_law() {
        let mut ledger = EvidenceLedger::new();
        let hash = sakshi_crypto::hash_bytes(b"evidence-A");
        let ext = ExternalRef::new("ipfs://abc").unwrap();
        let submitter = ChainAddress::from_bytes([7u8; 20]);
        let rec = ledger
            .submit(
                submitter,
                hash,
                ext.clone(),
                Timestamp::now(),
                TransactionId::from_bytes([1u8; 32]),
            )
            .unwrap();
        let seq = rec.sequence_id;
        let got = ledger.get(seq).expect("record must exist");
        assert_eq!(got.content_hash, hash);
        assert_eq!(got.external_ref, ext);
        assert_eq!(got.submitter, submitter);
    }

    #[test]
    fn get_past_head_is_not_found() {
        let mut ledger = EvidenceLedger::new();
        submit_one(&mut ledger, 1);
        assert!(ledger.get(SequenceId(1)).is_none());
        assert!(ledger.get(SequenceId(u64::MAX)).is_none());
    }

    #[test]
    fn revert_consumes_no_sequence_id() {
        let mut ledger = EvidenceLedger::new();
        submit_one(&mut ledger, 1);
        // Oversized ref smuggled past client-side validation (wire is verbatim).
        let oversized: ExternalRef =
            serde_json::from_str(&format!("\"{}\"", "x".repeat(MAX_EXTERNAL_REF_LEN + 1)))
                .unwrap();
        let err = ledger
            .submit(
                ChainAddress::from_bytes([9u8; 20]),
                ContentHash::from_bytes([9u8; 32]),
                oversized,
                Timestamp::now(),
                TransactionId::from_bytes([9u8; 32]),
            )
            .unwrap_err();
        assert!(matches!(err, ContractError::ExternalRefRejected(_)));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.next_sequence_id(), SequenceId(1));
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn events_emitted_in_order() {
        let mut ledger = EvidenceLedger::new();
        submit_one(&mut ledger, 1);
        submit_one(&mut ledger, 2);
        let events = ledger.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].record.sequence_id, SequenceId(0));
        assert_eq!(events[1].record.sequence_id, SequenceId(1));
    }
}
