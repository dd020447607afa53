//! # Verify Subcommand
//!
//! Fetches a confirmed record and, when given a local file, re-hashes it
//! and compares digests. This is the read side of the chain of custody:
//! anyone holding the evidence bytes can check them against the ledger.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use sakshi_client::{HttpLedgerRpc, LedgerRpc};
use sakshi_core::{EvidenceRecord, SequenceId};
use sakshi_crypto::hasher;

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Ledger position of the record to verify.
    pub sequence_id: u64,

    /// Local evidence file to re-hash and compare against the record.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Base URL of the ledger node.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    pub node: String,
}

#[derive(Serialize)]
struct VerifyOutput {
    record: EvidenceRecord,
    /// Digest comparison result; absent when no file was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    file_matches: Option<bool>,
}

pub async fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let rpc = HttpLedgerRpc::new(&args.node)?;
    let record = rpc
        .record(SequenceId(args.sequence_id))
        .await?
        .with_context(|| format!("no record at sequence {} on {}", args.sequence_id, args.node))?;

    let file_matches = match &args.file {
        Some(path) => {
            let local = hasher::hash_file(path)
                .with_context(|| format!("hashing {}", path.display()))?;
            Some(local == record.content_hash)
        }
        None => None,
    };

    let output = VerifyOutput {
        record,
        file_matches,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if file_matches == Some(false) {
        anyhow::bail!("local file digest does not match the sealed record");
    }
    Ok(())
}
