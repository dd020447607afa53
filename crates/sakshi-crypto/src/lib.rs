//! # sakshi-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the Sakshi stack:
//!
//! - **Evidence hashing** (`hasher`): SHA-256 over raw evidence bytes, with
//!   streaming reader and file variants. Deterministic, pure, no failure
//!   modes beyond upstream I/O.
//! - **Ed25519** (`ed25519`): signing and verification for transaction
//!   envelopes. Signing input is `&CanonicalBytes` only — raw bytes cannot
//!   be signed, so every signature covers a deterministic serialization.
//! - **Address derivation**: a [`ChainAddress`](sakshi_core::ChainAddress)
//!   is the last 20 bytes of the SHA-256 of the Ed25519 public key.
//! - **Key custody** (`key_provider`): signing keys are an injected
//!   dependency behind the [`KeyProvider`] trait, with in-memory and
//!   environment-variable backends. Key material is zeroized on drop and
//!   never serialized.
//!
//! ## Crate Policy
//!
//! - Depends only on `sakshi-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   SHA-256 and real Ed25519.
//! - `unsafe` prohibited.

pub mod ed25519;
pub mod hasher;
pub mod key_provider;

pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use hasher::{hash_bytes, hash_file, hash_reader};
pub use key_provider::{EnvKeyProvider, KeyProvider, LocalKeyProvider};
