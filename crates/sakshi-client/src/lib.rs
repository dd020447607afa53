//! # sakshi-client — Ledger Node Client
//!
//! Bridges the seal workflow to the ledger contract over the node's HTTP
//! API. Two layers:
//!
//! - [`rpc`]: the [`LedgerRpc`] trait (the seam tests substitute) and its
//!   [`HttpLedgerRpc`] implementation over reqwest, with a configurable
//!   [`RetryPolicy`] for transient transport errors.
//! - [`client`]: [`LedgerClient`] — sign-and-broadcast plus confirmation
//!   polling with a caller-controlled timeout.
//!
//! ## Error discipline
//!
//! Every failure maps onto the seal taxonomy
//! ([`SealError`](sakshi_core::SealError)) and is surfaced to the caller;
//! nothing is swallowed and nothing is retried beyond the transport-level
//! backoff. In particular, a receipt that says `Failed` is reported as a
//! rejection **with the fee spent**, distinct from refusals that never
//! reached a block.

pub mod client;
pub mod rpc;

pub use client::LedgerClient;
pub use rpc::{HttpLedgerRpc, LedgerHead, LedgerRpc, RetryPolicy};
