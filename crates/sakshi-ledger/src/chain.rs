//! # Single-Node Chain — Pending Pool, Blocks, Receipts
//!
//! The in-process stand-in for the external blockchain network. The design
//! relies on consensus to serialize submissions globally; here that guarantee
//! is provided by a single `Chain` value mutated under the node's lock.
//!
//! ## Lifecycle of a transaction
//!
//! 1. `broadcast` verifies the signature, checks the declared fee, and
//!    reserves the fee from the submitter's balance. Refusals here are
//!    atomic: nothing pooled, nothing spent.
//! 2. `produce_block` drains the pending pool into a block. Each transaction
//!    runs the contract's `submit`; success yields a `Confirmed` receipt with
//!    the assigned sequence id, a revert yields `Failed` — the reserved fee
//!    stays spent either way.
//! 3. `receipt` reports the current status; pending transactions stay
//!    `Pending` until a block includes them.
//!
//! Block hashes are SHA-256 over the canonical bytes of the block header,
//! chained through `parent_hash`.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use sakshi_core::{
    BlockRef, CanonicalBytes, CanonicalizationError, ChainAddress, EvidenceRecord, LedgerEvent,
    ReceiptStatus, SequenceId, Timestamp, TransactionId, TransactionReceipt,
};

use crate::contract::EvidenceLedger;
use crate::error::BroadcastError;
use crate::transaction::SignedTransaction;

/// Chain parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Flat fee reserved from the submitter at broadcast.
    pub submission_fee: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { submission_fee: 10 }
    }
}

/// A produced block: header fields plus the ids of included transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Height in the chain (first block is 0).
    pub height: u64,
    /// Hex hash of the preceding block, or all-zero for the first.
    pub parent_hash: String,
    /// Hex hash of this block's header.
    pub block_hash: String,
    /// Ids of transactions included in this block, in execution order.
    pub transaction_ids: Vec<TransactionId>,
    /// Ledger time at production.
    pub produced_at: Timestamp,
}

/// Header fields covered by the block hash.
#[derive(Serialize)]
struct BlockHeader<'a> {
    height: u64,
    parent_hash: &'a str,
    transaction_ids: &'a [TransactionId],
    produced_at: Timestamp,
}

/// The single-node chain: ledger, fee accounts, pool, blocks, receipts.
#[derive(Debug)]
pub struct Chain {
    config: ChainConfig,
    ledger: EvidenceLedger,
    balances: HashMap<ChainAddress, u64>,
    pending: VecDeque<SignedTransaction>,
    receipts: HashMap<TransactionId, TransactionReceipt>,
    blocks: Vec<Block>,
}

impl Chain {
    /// An empty chain with the given configuration.
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            ledger: EvidenceLedger::new(),
            balances: HashMap::new(),
            pending: VecDeque::new(),
            receipts: HashMap::new(),
            blocks: Vec::new(),
        }
    }

    /// The configured submission fee.
    pub fn submission_fee(&self) -> u64 {
        self.config.submission_fee
    }

    /// Credit an address. Dev-faucet path; real funds arrive off-system.
    pub fn credit(&mut self, address: ChainAddress, amount: u64) {
        let balance = self.balances.entry(address).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of an address (0 if never funded).
    pub fn balance(&self, address: &ChainAddress) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Accept a transaction into the pending pool.
    ///
    /// Verifies the signature, checks the declared fee against the chain's,
    /// and reserves the fee from the submitter. Returns the transaction id
    /// the moment the transaction is pooled — confirmation comes later.
    ///
    /// # Errors
    ///
    /// All refusals are atomic: no fee reserved, nothing pooled.
    pub fn broadcast(&mut self, tx: SignedTransaction) -> Result<TransactionId, BroadcastError> {
        tx.verify()
            .map_err(|e| BroadcastError::InvalidSignature(e.to_string()))?;

        let id = tx
            .transaction_id()
            .map_err(|e| BroadcastError::Malformed(e.to_string()))?;
        if self.receipts.contains_key(&id) {
            return Err(BroadcastError::DuplicateTransaction(id));
        }

        if tx.payload.fee != self.config.submission_fee {
            return Err(BroadcastError::FeeMismatch {
                declared: tx.payload.fee,
                expected: self.config.submission_fee,
            });
        }

        let submitter = tx.submitter();
        let available = self.balance(&submitter);
        if available < self.config.submission_fee {
            return Err(BroadcastError::InsufficientFunds {
                address: submitter.to_string(),
                required: self.config.submission_fee,
                available,
            });
        }

        // Reserve the fee now. If the transaction later reverts, it stays
        // spent — that is the "included and reverted" failure flavor.
        self.balances
            .insert(submitter, available - self.config.submission_fee);
        self.receipts.insert(id, TransactionReceipt::pending(id));
        self.pending.push_back(tx);
        tracing::debug!(transaction_id = %id, submitter = %submitter, "transaction pooled");
        Ok(id)
    }

    /// Drain the pending pool into a new block.
    ///
    /// Returns `Ok(None)` when the pool is empty (no empty blocks are
    /// produced). Execution order is pool order; the ledger assigns sequence
    /// ids in exactly that order.
    ///
    /// # Errors
    ///
    /// The block header is hashed before any transaction executes. If the
    /// header cannot be canonicalized, the drained transactions go back to
    /// the front of the pool unexecuted and the error is returned: nothing
    /// moved, the next production tick retries.
    pub fn produce_block(
        &mut self,
        now: Timestamp,
    ) -> Result<Option<BlockRef>, CanonicalizationError> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        let height = self.blocks.len() as u64;
        let parent_hash = self
            .blocks
            .last()
            .map(|b| b.block_hash.clone())
            .unwrap_or_else(|| "0".repeat(64));

        // Id derivation succeeded at broadcast; a failure here would be a
        // bug, surfaced by dropping the transaction rather than panicking.
        let mut batch: Vec<(SignedTransaction, TransactionId)> =
            Vec::with_capacity(self.pending.len());
        while let Some(tx) = self.pending.pop_front() {
            match tx.transaction_id() {
                Ok(id) => batch.push((tx, id)),
                Err(e) => tracing::error!(error = %e, "pooled transaction lost its id"),
            }
        }
        let included: Vec<TransactionId> = batch.iter().map(|(_, id)| *id).collect();

        let header = BlockHeader {
            height,
            parent_hash: &parent_hash,
            transaction_ids: &included,
            produced_at: now,
        };
        let block_hash = match CanonicalBytes::new(&header) {
            Ok(cb) => Sha256::digest(cb.as_bytes())
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>(),
            Err(e) => {
                for (tx, _) in batch.into_iter().rev() {
                    self.pending.push_front(tx);
                }
                return Err(e);
            }
        };

        let block_ref = BlockRef {
            height,
            block_hash: block_hash.clone(),
        };

        for (tx, id) in batch {
            let status = match self.ledger.submit(
                tx.submitter(),
                tx.payload.content_hash,
                tx.payload.external_ref.clone(),
                now,
                id,
            ) {
                Ok(record) => ReceiptStatus::Confirmed {
                    sequence_id: record.sequence_id,
                },
                Err(e) => {
                    tracing::warn!(transaction_id = %id, error = %e, "transaction reverted");
                    ReceiptStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            self.receipts.insert(
                id,
                TransactionReceipt {
                    transaction_id: id,
                    block_ref: Some(block_ref.clone()),
                    status,
                },
            );
        }

        tracing::info!(
            height,
            transactions = included.len(),
            block_hash = %block_hash,
            "block produced"
        );
        self.blocks.push(Block {
            height,
            parent_hash,
            block_hash,
            transaction_ids: included,
            produced_at: now,
        });
        Ok(Some(block_ref))
    }

    /// The receipt for a transaction, `None` if the id is unknown.
    pub fn receipt(&self, id: &TransactionId) -> Option<&TransactionReceipt> {
        self.receipts.get(id)
    }

    /// The record at `sequence_id`, `None` past the head.
    pub fn record(&self, sequence_id: SequenceId) -> Option<&EvidenceRecord> {
        self.ledger.get(sequence_id)
    }

    /// The sequence id the next confirmed submission will receive.
    pub fn next_sequence_id(&self) -> SequenceId {
        self.ledger.next_sequence_id()
    }

    /// All records in submission order.
    pub fn records(&self) -> &[EvidenceRecord] {
        self.ledger.records()
    }

    /// All ledger events in emission order.
    pub fn events(&self) -> &[LedgerEvent] {
        self.ledger.events()
    }

    /// Blocks produced so far.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of transactions waiting for inclusion.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}
