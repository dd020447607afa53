//! # Identity Types — Chain Identifier Newtypes
//!
//! Newtype wrappers for the identifiers that flow between the client, the
//! node, and the ledger. Validated constructors, no bare strings.
//!
//! - [`SequenceId`] — position of a record in the append-only ledger.
//! - [`TransactionId`] — 32-byte identifier of a broadcast transaction.
//! - [`ChainAddress`] — 20-byte submitter address derived from a public key.
//! - [`ExternalRef`] — off-chain pointer to the evidence bytes.
//! - [`BlockRef`] — height and hash of the block that confirmed a transaction.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Maximum accepted length of an external reference, in bytes.
///
/// The ledger stores the reference verbatim; an unbounded string would let a
/// single submission bloat every replica. Matches the inclusion-time check
/// in the ledger contract.
pub const MAX_EXTERNAL_REF_LEN: usize = 512;

// ---------------------------------------------------------------------------
// SequenceId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier of a ledger record.
///
/// Assigned by the ledger in strictly increasing order with no gaps; never
/// reused. Display form is the bare integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SequenceId(pub u64);

impl SequenceId {
    /// The first sequence id an empty ledger will assign.
    pub const ZERO: Self = Self(0);

    /// Return the raw integer value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The sequence id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

/// A 32-byte transaction identifier.
///
/// Derived as the SHA-256 of the canonical bytes of the signed transaction
/// envelope, so the client and the node independently compute the same id.
/// Serializes as a `0x`-prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId([u8; 32]);

impl TransactionId {
    /// Create a transaction id from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte id.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse from a hex string, with or without `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let stripped = hex.trim().strip_prefix("0x").unwrap_or(hex.trim());
        if stripped.len() != 64 {
            return Err(ValidationError::invalid(
                "transaction_id",
                format!("expected 64 hex chars, got {}", stripped.len()),
            ));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in stripped.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::invalid("transaction_id", "non-UTF8 hex"))?;
            bytes[i] = u8::from_str_radix(s, 16).map_err(|_| {
                ValidationError::invalid("transaction_id", format!("bad hex: {s:?}"))
            })?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransactionId(0x{}...)", &self.to_hex()[..8])
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ChainAddress
// ---------------------------------------------------------------------------

/// A 20-byte chain address identifying a fee account and submitter.
///
/// Derived from an Ed25519 public key as the last 20 bytes of its SHA-256
/// (derivation lives in `sakshi-crypto`). Serializes as a `0x`-prefixed
/// 40-character hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainAddress([u8; 20]);

impl ChainAddress {
    /// Create an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse from a hex string, with or without `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let stripped = hex.trim().strip_prefix("0x").unwrap_or(hex.trim());
        if stripped.len() != 40 {
            return Err(ValidationError::invalid(
                "chain_address",
                format!("expected 40 hex chars, got {}", stripped.len()),
            ));
        }
        let mut bytes = [0u8; 20];
        for (i, chunk) in stripped.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::invalid("chain_address", "non-UTF8 hex"))?;
            bytes[i] = u8::from_str_radix(s, 16)
                .map_err(|_| ValidationError::invalid("chain_address", format!("bad hex: {s:?}")))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainAddress(0x{})", self.to_hex())
    }
}

impl Serialize for ChainAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for ChainAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ExternalRef
// ---------------------------------------------------------------------------

/// An off-chain pointer to the evidence bytes (e.g. `ipfs://Qm...`).
///
/// The ledger stores the string verbatim and never dereferences it. The
/// constructor rejects empty and oversized references; everything else is
/// the off-chain store's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalRef(String);

impl ExternalRef {
    /// Create a validated external reference.
    ///
    /// # Errors
    ///
    /// Rejects empty strings and strings longer than
    /// [`MAX_EXTERNAL_REF_LEN`] bytes.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::invalid("external_ref", "must not be empty"));
        }
        if s.len() > MAX_EXTERNAL_REF_LEN {
            return Err(ValidationError::invalid(
                "external_ref",
                format!("{} bytes exceeds maximum {MAX_EXTERNAL_REF_LEN}", s.len()),
            ));
        }
        Ok(Self(s))
    }

    /// Return the reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// BlockRef
// ---------------------------------------------------------------------------

/// Reference to the block that confirmed a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    /// Height of the block in the chain (genesis is 0).
    pub height: u64,
    /// Hex-encoded hash of the block.
    pub block_hash: String,
}

impl std::fmt::Display for BlockRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block #{} ({})", self.height, self.block_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_id_ordering_and_next() {
        let a = SequenceId(0);
        let b = a.next();
        assert!(a < b);
        assert_eq!(b.value(), 1);
        assert_eq!(SequenceId::ZERO, SequenceId(0));
    }

    #[test]
    fn transaction_id_hex_roundtrip() {
        let id = TransactionId::from_bytes([7u8; 32]);
        let parsed = TransactionId::from_hex(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn chain_address_hex_roundtrip() {
        let addr = ChainAddress::from_bytes([0xfe; 20]);
        assert_eq!(addr.to_string().len(), 2 + 40);
        assert_eq!(ChainAddress::from_hex(&addr.to_string()).unwrap(), addr);
        assert_eq!(ChainAddress::from_hex(&addr.to_hex()).unwrap(), addr);
    }

    #[test]
    fn chain_address_rejects_wrong_length() {
        assert!(ChainAddress::from_hex("0x1234").is_err());
    }

    #[test]
    fn external_ref_accepts_ipfs_uri() {
        let r = ExternalRef::new("ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert!(r.as_str().starts_with("ipfs://"));
    }

    #[test]
    fn external_ref_rejects_empty() {
        assert!(ExternalRef::new("").is_err());
        assert!(ExternalRef::new("   ").is_err());
    }

    #[test]
    fn external_ref_rejects_oversized() {
        let long = "x".repeat(MAX_EXTERNAL_REF_LEN + 1);
        assert!(ExternalRef::new(long).is_err());
        let max = "x".repeat(MAX_EXTERNAL_REF_LEN);
        assert!(ExternalRef::new(max).is_ok());
    }

    #[test]
    fn serde_transparent_forms() {
        let r = ExternalRef::new("ipfs://abc").unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), r#""ipfs://abc""#);
        let s = serde_json::to_string(&SequenceId(42)).unwrap();
        assert_eq!(s, "42");
    }
}
