//! Ledger error types.
//!
//! `BroadcastError` covers refusals at the pool boundary (nothing included,
//! no fee spent). `ContractError` covers reverts inside block execution
//! (fee already spent). Keeping them as separate types keeps the two
//! failure flavors apart in every signature that touches them.

use thiserror::Error;

use sakshi_core::TransactionId;

/// Refusal of a transaction at broadcast time.
///
/// None of these consume a fee or a sequence id — the transaction never
/// entered the pending pool.
#[derive(Error, Debug)]
pub enum BroadcastError {
    /// The envelope signature does not verify against its public key.
    #[error("invalid transaction signature: {0}")]
    InvalidSignature(String),

    /// The submitter cannot cover the submission fee.
    #[error("insufficient funds for {address}: required {required}, available {available}")]
    InsufficientFunds {
        /// The submitter address whose balance was checked.
        address: String,
        /// The fee the submission required.
        required: u64,
        /// The submitter's current balance.
        available: u64,
    },

    /// A transaction with this id is already known to the chain.
    #[error("duplicate transaction {0}")]
    DuplicateTransaction(TransactionId),

    /// The declared fee does not match the chain's submission fee.
    #[error("declared fee {declared} does not match submission fee {expected}")]
    FeeMismatch {
        /// Fee declared in the payload.
        declared: u64,
        /// Fee the chain requires.
        expected: u64,
    },

    /// The envelope could not be canonicalized for id derivation.
    #[error("malformed transaction: {0}")]
    Malformed(String),
}

/// Revert of a transaction during block execution.
///
/// By this point the fee is spent; the receipt reports `Failed` with the
/// revert reason and no record exists.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The external reference failed the contract's length/emptiness check.
    #[error("external ref rejected: {0}")]
    ExternalRefRejected(String),
}
