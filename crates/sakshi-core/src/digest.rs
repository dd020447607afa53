//! # Content Hash — Fixed-Length Evidence Digest
//!
//! Defines `ContentHash`, the 32-byte SHA-256 digest that identifies a piece
//! of evidence on the ledger. The ledger stores this digest; the original
//! bytes live off-chain behind an `ExternalRef`.
//!
//! Computation lives in `sakshi-crypto` (`hasher` module). This crate only
//! declares the type so the data model, contract, and wire formats can share
//! it without depending on the hashing implementation.
//!
//! ## Serde
//!
//! Serializes as a `0x`-prefixed lowercase 64-character hex string, the form
//! it takes in transaction payloads, on-chain records, and receipts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A 32-byte SHA-256 content digest of evidence bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a content hash from raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a content hash from a hex string, with or without `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let hex = hex.trim().strip_prefix("0x").unwrap_or(hex.trim());
        if hex.len() != 64 {
            return Err(ValidationError::invalid(
                "content_hash",
                format!("expected 64 hex chars, got {}", hex.len()),
            ));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::invalid("content_hash", "non-UTF8 hex"))?;
            bytes[i] = u8::from_str_radix(s, 16)
                .map_err(|_| ValidationError::invalid("content_hash", format!("bad hex: {s:?}")))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentHash(0x{}...)", &self.to_hex()[..8])
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
