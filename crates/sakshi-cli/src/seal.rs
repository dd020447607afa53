//! # Seal Subcommand
//!
//! Hashes an evidence file, signs and broadcasts the submission, and waits
//! for the ledger to confirm. The signing key comes from
//! `SAKSHI_SIGNING_KEY` — there is no flag for it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use sakshi_client::{HttpLedgerRpc, LedgerClient};
use sakshi_core::{ExternalRef, SealError};
use sakshi_crypto::EnvKeyProvider;
use sakshi_workflow::SealFlow;

use crate::SIGNING_KEY_VAR;

/// Arguments for the seal subcommand.
#[derive(Args, Debug)]
pub struct SealArgs {
    /// Evidence file to hash and seal.
    pub file: PathBuf,

    /// Off-chain locator recorded alongside the hash (e.g. an IPFS CID).
    #[arg(long)]
    pub external_ref: String,

    /// Base URL of the ledger node.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    pub node: String,

    /// Seconds to wait for confirmation before giving up.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Submission fee to attach.
    #[arg(long, default_value_t = 10)]
    pub fee: u64,
}

#[derive(Serialize)]
struct SealOutput {
    content_hash: String,
    transaction_id: String,
    sequence_id: u64,
    block: Option<sakshi_core::BlockRef>,
    submitter: String,
}

pub async fn run(args: SealArgs) -> anyhow::Result<()> {
    let signer = EnvKeyProvider::from_env(SIGNING_KEY_VAR)
        .with_context(|| format!("loading signing key from {SIGNING_KEY_VAR}"))?;
    let rpc = HttpLedgerRpc::new(&args.node)?;
    let client = LedgerClient::new(rpc, Arc::new(signer), args.fee);

    let external_ref = ExternalRef::new(&args.external_ref)?;
    let flow = SealFlow::new(external_ref)
        .hash_file(&args.file)
        .with_context(|| format!("hashing {}", args.file.display()))?;
    tracing::info!(content_hash = %flow.content_hash(), "evidence hashed");

    let flow = flow.broadcast(&client).await?;
    let transaction_id = flow.transaction_id();
    tracing::info!(%transaction_id, "broadcast accepted, awaiting confirmation");

    let sealed = match flow
        .confirm(&client, Duration::from_secs(args.timeout_secs))
        .await
    {
        Ok(sealed) => sealed,
        Err(SealError::Timeout { waited }) => {
            anyhow::bail!(
                "no confirmation after {waited:?}; the transaction may still confirm — \
                 re-check with: sakshi receipt {transaction_id} --node {}",
                args.node
            );
        }
        Err(other) => return Err(other.into()),
    };

    let record = sealed.fetch_record(&client).await?;
    let output = SealOutput {
        content_hash: sealed.content_hash().to_string(),
        transaction_id: sealed.transaction_id().to_string(),
        sequence_id: sealed.sequence_id().value(),
        block: sealed.receipt().block_ref.clone(),
        submitter: record.submitter.to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
