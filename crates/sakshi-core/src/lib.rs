//! # sakshi-core — Foundational Types for the Sakshi Evidence Stack
//!
//! This crate is the bedrock of the Sakshi stack. It defines the type-system
//! primitives shared by every other crate: content hashes, chain identifiers,
//! timestamps, the on-chain evidence data model, and the error taxonomy that
//! a seal attempt can surface. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `SequenceId`,
//!    `TransactionId`, `ChainAddress`, `ExternalRef`, `ContentHash` — all
//!    newtypes with validated constructors. No bare strings or integers for
//!    identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** All transaction signing and
//!    transaction-id derivation flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for signed payloads. Evidence file content is
//!    the one exception — it is opaque binary and is hashed as-is.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision; the on-chain record exposes unix seconds.
//!
//! 4. **One error taxonomy.** `SealError` is the single vocabulary a failed
//!    submission speaks: `Input`, `NetworkUnavailable`, `InsufficientFunds`,
//!    `Rejected`, `Timeout`. The `Rejected` variant carries whether the
//!    transaction fee was spent, so a reverted-after-inclusion failure can
//!    never be confused with "never broadcast".
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sakshi-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a wire.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::ContentHash;
pub use error::{CanonicalizationError, CryptoError, SealError, ValidationError};
pub use identity::{BlockRef, ChainAddress, ExternalRef, SequenceId, TransactionId};
pub use record::{
    EvidenceRecord, LedgerEvent, ReceiptStatus, TransactionReceipt,
};
pub use temporal::Timestamp;
