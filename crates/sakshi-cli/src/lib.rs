//! # sakshi-cli — Sakshi Stack Command-Line Interface
//!
//! Front door for sealing evidence from a workstation: hash a file, sign
//! and broadcast the submission, wait for confirmation, and verify records
//! after the fact.
//!
//! ## Subcommands
//!
//! - `keygen` — Generate an Ed25519 signing key
//! - `seal` — Hash a file and seal it onto the ledger
//! - `receipt` — Look up a transaction receipt
//! - `verify` — Fetch a record and check it against a local file
//! - `fund` — Credit an address from the dev faucet
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no ledger logic here.
//! - Signing keys are read from `SAKSHI_SIGNING_KEY`, never from flags:
//!   command lines leak into shell history and process listings.
//! - Results print as JSON on stdout; diagnostics go to stderr via tracing.

pub mod fund;
pub mod keygen;
pub mod receipt;
pub mod seal;
pub mod verify;

/// Environment variable holding the hex-encoded Ed25519 signing seed.
pub const SIGNING_KEY_VAR: &str = "SAKSHI_SIGNING_KEY";
