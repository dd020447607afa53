//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the Sakshi stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - `SealError` is the taxonomy a failed submission surfaces to its caller
//!   (unreadable input, unreachable node, unfunded signer, rejection,
//!   confirmation timeout). Nothing is silently swallowed.
//! - A rejection always says whether the transaction fee was spent.
//!   A transaction that was included in a block and reverted consumed the
//!   fee; one refused at broadcast did not. Conflating the two would let a
//!   caller re-submit and double-spend fees unknowingly.
//! - Cryptographic and canonicalization failures fail loudly with context.

use std::time::Duration;

use thiserror::Error;

/// The error taxonomy of a seal attempt.
///
/// Every failure an evidence submission can encounter maps onto exactly one
/// of these variants. The workflow propagates them unchanged to its caller;
/// retry policy, if any, belongs to the layer above.
#[derive(Error, Debug)]
pub enum SealError {
    /// The evidence input could not be read. Nothing was hashed or sent.
    #[error("evidence input unreadable: {0}")]
    Input(#[from] std::io::Error),

    /// The ledger node could not be reached. Nothing was broadcast.
    #[error("ledger node unreachable: {0}")]
    NetworkUnavailable(String),

    /// The signer cannot cover the submission fee. The transaction was
    /// refused at broadcast; no fee was spent and no sequence id consumed.
    #[error("insufficient funds for {address}: required {required}, available {available}")]
    InsufficientFunds {
        /// The submitter address whose balance was checked.
        address: String,
        /// The fee the submission required.
        required: u64,
        /// The balance the node reported.
        available: u64,
    },

    /// The node or the ledger rejected the transaction.
    ///
    /// `fee_charged` distinguishes the two rejection flavors callers must
    /// tell apart: `false` means the transaction never entered a block
    /// (safe to fix and re-submit), `true` means it was included and
    /// reverted — the fee is gone.
    #[error("submission rejected (fee charged: {fee_charged}): {reason}")]
    Rejected {
        /// Why the transaction was rejected.
        reason: String,
        /// Whether the submitter paid the fee for the failed transaction.
        fee_charged: bool,
    },

    /// Confirmation was not observed within the caller's deadline.
    ///
    /// The transaction may still confirm later — this error only means the
    /// local wait ended, not that the on-chain effect was retracted.
    #[error("confirmation not observed within {waited:?}")]
    Timeout {
        /// How long the caller waited before giving up.
        waited: Duration,
    },

    /// Canonical serialization of a transaction payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A signing or verification operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl SealError {
    /// Whether this failure consumed the submitter's transaction fee.
    ///
    /// Only an included-and-reverted rejection spends the fee. A timeout is
    /// indeterminate (the transaction may yet confirm) and reports `false`
    /// here; callers must check the receipt before re-submitting.
    pub fn fee_charged(&self) -> bool {
        matches!(self, Self::Rejected { fee_charged: true, .. })
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Fees and timestamps must be integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation, parsing, or loading failed.
    #[error("key error: {0}")]
    KeyError(String),
}

/// Error constructing a validated domain primitive.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An identifier string failed its format check.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The field that failed validation.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_distinguishes_fee_spent() {
        let reverted = SealError::Rejected {
            reason: "external ref too long".into(),
            fee_charged: true,
        };
        let refused = SealError::Rejected {
            reason: "bad signature".into(),
            fee_charged: false,
        };
        assert!(reverted.to_string().contains("fee charged: true"));
        assert!(refused.to_string().contains("fee charged: false"));
    }

    #[test]
    fn fee_charged_only_for_reverted_rejection() {
        assert!(SealError::Rejected {
            reason: "reverted".into(),
            fee_charged: true
        }
        .fee_charged());
        assert!(!SealError::Rejected {
            reason: "refused".into(),
            fee_charged: false
        }
        .fee_charged());
        assert!(!SealError::Timeout {
            waited: Duration::from_secs(5)
        }
        .fee_charged());
        assert!(!SealError::NetworkUnavailable("refused".into()).fee_charged());
    }

    #[test]
    fn insufficient_funds_display_carries_amounts() {
        let err = SealError::InsufficientFunds {
            address: "0xabc".into(),
            required: 10,
            available: 0,
        };
        let s = err.to_string();
        assert!(s.contains("required 10"));
        assert!(s.contains("available 0"));
    }
}
