//! # Sakshi Workflow — Typestate Seal Pipeline
//!
//! Drives a piece of evidence from raw bytes to a confirmed ledger record
//! using the typestate pattern. Each phase is a distinct type, so phase
//! skipping is a compile error: a flow that has not been hashed has no
//! `broadcast()` method, and a flow that has not been broadcast has no
//! `confirm()` method.
//!
//! See [`flow`] for the phase diagram and transition semantics.

pub mod flow;

pub use flow::{Broadcast, Hashed, Idle, PhaseRecord, SealFlow, SealPhase, Sealed};
