//! # Key Provider Abstraction
//!
//! Abstracts signing-key storage behind a trait, keeping key custody an
//! injected dependency of the ledger client rather than anything this repo
//! manages. Backends:
//!
//! - [`LocalKeyProvider`]: in-memory key for development and testing.
//! - [`EnvKeyProvider`]: loads key material from an environment variable
//!   (hex-encoded 32-byte Ed25519 seed). Suitable for container deployments
//!   where secrets are injected via environment.
//!
//! ## Security Invariants
//!
//! - Key material is zeroized on drop (`ed25519_dalek::SigningKey` carries
//!   the `zeroize` feature).
//! - `KeyProvider` is `Send + Sync` for use across async tasks.
//! - Signing input is `&CanonicalBytes` (never raw bytes).
//! - No backend ever writes key material to disk or logs.

use sakshi_core::error::CryptoError;
use sakshi_core::{CanonicalBytes, ChainAddress};

use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Trait for signing-key storage and signing backends.
///
/// Implementations must be `Send + Sync` so a single provider can be shared
/// across concurrent seal workflows behind an `Arc`.
pub trait KeyProvider: Send + Sync {
    /// Sign canonicalized data with the managed key.
    fn sign(&self, data: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError>;

    /// Return the public key of the managed key pair.
    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError>;

    /// Human-readable name for this provider (for diagnostics/logging).
    fn provider_name(&self) -> &str;

    /// The chain address of the managed key.
    fn address(&self) -> Result<ChainAddress, CryptoError> {
        Ok(self.public_key()?.to_address())
    }
}

// ─── LocalKeyProvider ────────────────────────────────────────────────────

/// In-memory key provider for development and testing.
pub struct LocalKeyProvider {
    key: Ed25519KeyPair,
}

impl LocalKeyProvider {
    /// Create from an existing key pair.
    pub fn new(key: Ed25519KeyPair) -> Self {
        Self { key }
    }

    /// Generate a new random key using the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            key: Ed25519KeyPair::generate(),
        }
    }

    /// Create from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            key: Ed25519KeyPair::from_seed(seed),
        }
    }
}

impl KeyProvider for LocalKeyProvider {
    fn sign(&self, data: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError> {
        Ok(self.key.sign(data))
    }

    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        Ok(self.key.public_key())
    }

    fn provider_name(&self) -> &str {
        "LocalKeyProvider"
    }
}

// ─── EnvKeyProvider ──────────────────────────────────────────────────────

/// Loads an Ed25519 signing key from an environment variable.
///
/// The variable must contain a 64-character hex string encoding the 32-byte
/// Ed25519 seed. The key is loaded once at construction and held in memory
/// (zeroized on drop).
///
/// ## Example
///
/// ```bash
/// export SAKSHI_SIGNING_KEY="deadbeef..."  # 64 hex chars
/// ```
pub struct EnvKeyProvider {
    key: Ed25519KeyPair,
    var_name: String,
}

impl EnvKeyProvider {
    /// Load the signing key from the named environment variable.
    ///
    /// # Errors
    ///
    /// `CryptoError::KeyError` if the variable is not set or contains
    /// invalid hex.
    pub fn from_env(var_name: &str) -> Result<Self, CryptoError> {
        let hex = std::env::var(var_name).map_err(|_| {
            CryptoError::KeyError(format!("environment variable {var_name} not set"))
        })?;
        let key = Ed25519KeyPair::from_seed_hex(&hex)?;
        Ok(Self {
            key,
            var_name: var_name.to_string(),
        })
    }

    /// The environment variable this provider was loaded from.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl KeyProvider for EnvKeyProvider {
    fn sign(&self, data: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError> {
        Ok(self.key.sign(data))
    }

    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        Ok(self.key.public_key())
    }

    fn provider_name(&self) -> &str {
        "EnvKeyProvider"
    }
}
