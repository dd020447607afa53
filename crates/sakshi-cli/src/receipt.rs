//! # Receipt Subcommand
//!
//! Looks up the receipt for a broadcast transaction. Useful after a seal
//! timed out: the transaction may have confirmed after the deadline.

use clap::Args;

use sakshi_client::{HttpLedgerRpc, LedgerRpc};
use sakshi_core::TransactionId;

/// Arguments for the receipt subcommand.
#[derive(Args, Debug)]
pub struct ReceiptArgs {
    /// Transaction id (0x-prefixed hex).
    pub transaction_id: String,

    /// Base URL of the ledger node.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    pub node: String,
}

pub async fn run(args: ReceiptArgs) -> anyhow::Result<()> {
    let id = TransactionId::from_hex(&args.transaction_id)?;
    let rpc = HttpLedgerRpc::new(&args.node)?;

    match rpc.receipt(&id).await? {
        Some(receipt) => println!("{}", serde_json::to_string_pretty(&receipt)?),
        None => anyhow::bail!("transaction {id} is unknown to {}", args.node),
    }
    Ok(())
}
