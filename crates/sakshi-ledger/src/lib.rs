//! # sakshi-ledger — Evidence Ledger Semantics
//!
//! Implements the on-chain side of the notarization flow:
//!
//! - **Contract** (`contract.rs`): the [`EvidenceLedger`], an append-only
//!   mapping from sequence id to evidence record with exactly one meaningful
//!   transition (`submit`) and one read accessor (`get`). No operation in
//!   its public interface alters or removes an existing record.
//!
//! - **Transaction envelope** (`transaction.rs`): the signed payload a
//!   client broadcasts. Signatures cover JCS-canonical bytes; the
//!   transaction id is the SHA-256 of the canonical signed envelope, so
//!   client and node derive it independently.
//!
//! - **Chain** (`chain.rs`): the single-node stand-in for the external
//!   network — pending pool, fee accounts, block production, receipts. The
//!   consensus layer the design relies on is external (spec-wise); here one
//!   `Chain` value behind the node's lock serializes all submissions.
//!
//! ## Fee Semantics
//!
//! The submission fee is reserved at broadcast: a signer that cannot cover
//! it is refused atomically — no fee spent, no sequence id consumed, nothing
//! enters the pool. A transaction that reaches a block and reverts has
//! already paid; its receipt says `Failed` and the fee is gone. These are
//! the only two failure flavors, and they are never conflated.

pub mod chain;
pub mod contract;
pub mod error;
pub mod transaction;

pub use chain::{Block, Chain, ChainConfig};
pub use contract::EvidenceLedger;
pub use error::{BroadcastError, ContractError};
pub use transaction::{SignedTransaction, TransactionPayload};
