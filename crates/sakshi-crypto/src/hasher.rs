//! # Evidence Hashing — SHA-256 Content Digests
//!
//! Computes the [`ContentHash`] that identifies a piece of evidence on the
//! ledger. Evidence is opaque binary — a photo, a video, a disk image — and
//! is hashed exactly as stored, byte for byte. This is content addressing:
//! the same bytes always produce the same digest, and any alteration of the
//! bytes produces a different one.
//!
//! Unlike transaction payloads, evidence bytes do NOT pass through
//! `CanonicalBytes`: canonicalization exists to make structured data
//! deterministic, and file content already is.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use sakshi_core::ContentHash;

/// Chunk size for streaming hash computation.
const READ_BUF_SIZE: usize = 64 * 1024;

/// Hash an in-memory byte sequence.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    ContentHash::from_bytes(out)
}

/// Hash a reader to completion, streaming in 64 KiB chunks.
///
/// # Errors
///
/// Propagates any I/O error from the reader; nothing is hashed partially —
/// a failed read yields no digest.
pub fn hash_reader(mut reader: impl Read) -> io::Result<ContentHash> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Ok(ContentHash::from_bytes(out))
}

/// Hash the contents of a file.
///
/// # Errors
///
/// Propagates open/read failures ("input unreadable" in the seal error
/// taxonomy).
pub fn hash_file(path: impl AsRef<Path>) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    hash_reader(BufReader::new(file))
}
