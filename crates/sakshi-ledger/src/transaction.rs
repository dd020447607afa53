//! # Signed Transaction Envelope
//!
//! The wire form of a submission: a payload naming the content hash and
//! external reference, signed by the submitter's key over JCS-canonical
//! bytes.
//!
//! ## Identity
//!
//! The transaction id is SHA-256 over the canonical bytes of the complete
//! signed envelope. Client and node both derive it from the envelope alone,
//! so the client knows the id before the node ever sees the transaction.
//! A random nonce makes two submissions of identical evidence distinct.
//!
//! ## Verification
//!
//! The node re-canonicalizes the payload and checks the Ed25519 signature
//! against the embedded public key at broadcast. The submitter address is
//! derived from that key, never taken from the payload.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use sakshi_core::error::CryptoError;
use sakshi_core::{
    CanonicalBytes, CanonicalizationError, ChainAddress, ContentHash, ExternalRef, SealError,
    Timestamp, TransactionId,
};
use sakshi_crypto::key_provider::KeyProvider;
use sakshi_crypto::{Ed25519PublicKey, Ed25519Signature};

/// The signed portion of a submission transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Digest of the evidence being notarized.
    pub content_hash: ContentHash,
    /// Off-chain pointer to the evidence bytes.
    pub external_ref: ExternalRef,
    /// Fee the submitter agrees to pay. Must equal the chain's submission fee.
    pub fee: u64,
    /// Random value distinguishing otherwise-identical submissions.
    pub nonce: u64,
    /// The submitting client's clock. Informational — the ledger stamps the
    /// record with its own time at inclusion.
    pub submitted_at_client: Timestamp,
}

impl TransactionPayload {
    /// Build a payload with a fresh random nonce and the current client time.
    pub fn new(content_hash: ContentHash, external_ref: ExternalRef, fee: u64) -> Self {
        Self {
            content_hash,
            external_ref,
            fee,
            nonce: rand_core::OsRng.next_u64(),
            submitted_at_client: Timestamp::now(),
        }
    }

    /// The canonical bytes a signature over this payload covers.
    pub fn signing_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }
}

/// A payload plus the signature and public key that authorize it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The signed payload.
    pub payload: TransactionPayload,
    /// Public key of the submitter.
    pub public_key: Ed25519PublicKey,
    /// Ed25519 signature over the payload's canonical bytes.
    pub signature: Ed25519Signature,
}

impl SignedTransaction {
    /// Sign a payload with an injected key provider.
    pub fn sign(
        payload: TransactionPayload,
        provider: &dyn KeyProvider,
    ) -> Result<Self, SealError> {
        let bytes = payload.signing_bytes()?;
        let signature = provider.sign(&bytes)?;
        let public_key = provider.public_key()?;
        Ok(Self {
            payload,
            public_key,
            signature,
        })
    }

    /// Verify the signature against the embedded public key.
    pub fn verify(&self) -> Result<(), CryptoError> {
        let bytes = self
            .payload
            .signing_bytes()
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;
        self.public_key.verify(&bytes, &self.signature)
    }

    /// Derive the transaction id: SHA-256 of the canonical signed envelope.
    pub fn transaction_id(&self) -> Result<TransactionId, CanonicalizationError> {
        let bytes = CanonicalBytes::new(self)?;
        let digest = Sha256::digest(bytes.as_bytes());
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest);
        Ok(TransactionId::from_bytes(id))
    }

    /// The chain address this transaction debits and records as submitter.
    pub fn submitter(&self) -> ChainAddress {
        self.public_key.to_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sakshi_crypto::LocalKeyProvider;

    fn payload() -> TransactionPayload {
        TransactionPayload::new(
            sakshi_crypto::hash_bytes(b"evidence-A"),
            ExternalRef::new("ipfs://abc").unwrap(),
            10,
        )
    }

    #[test]
    fn sign_then_verify() {
        let provider = LocalKeyProvider::generate();
        let tx = SignedTransaction::sign(payload(), &provider).unwrap();
        tx.verify().expect("signature must verify");
    }

    #[test]
    fn tampering_breaks_verification() {
        let provider = LocalKeyProvider::generate();
        let mut tx = SignedTransaction::sign(payload(), &provider).unwrap();
        tx.payload.fee += 1;
        assert!(tx.verify().is_err());
    }

    #[test]
    fn transaction_id_is_stable_for_same_envelope() {
        let provider = LocalKeyProvider::generate();
        let tx = SignedTransaction::sign(payload(), &provider).unwrap();
        assert_eq!(tx.transaction_id().unwrap(), tx.transaction_id().unwrap());
    }

    #[test]
    fn nonce_distinguishes_identical_submissions() {
        let provider = LocalKeyProvider::generate();
        let tx1 = SignedTransaction::sign(payload(), &provider).unwrap();
        let tx2 = SignedTransaction::sign(payload(), &provider).unwrap();
        assert_ne!(tx1.transaction_id().unwrap(), tx2.transaction_id().unwrap());
    }

    #[test]
    fn submitter_matches_provider_address() {
        let provider = LocalKeyProvider::generate();
        let tx = SignedTransaction::sign(payload(), &provider).unwrap();
        assert_eq!(tx.submitter(), provider.address().unwrap());
    }

    #[test]
    fn wire_roundtrip_preserves_id() {
        let provider = LocalKeyProvider::generate();
        let tx = SignedTransaction::sign(payload(), &provider).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let back: SignedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.transaction_id().unwrap(), tx.transaction_id().unwrap());
        back.verify().expect("roundtripped envelope still verifies");
    }
}
