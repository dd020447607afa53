//! # Fund Subcommand
//!
//! Credits an address from the node's dev faucet. Only works against nodes
//! started with the faucet enabled; production nodes answer 403.

use clap::Args;
use serde::Serialize;

use sakshi_client::HttpLedgerRpc;
use sakshi_core::ChainAddress;

/// Arguments for the fund subcommand.
#[derive(Args, Debug)]
pub struct FundArgs {
    /// Address to credit (0x-prefixed hex).
    pub address: String,

    /// Amount to credit.
    #[arg(long, default_value_t = 100)]
    pub amount: u64,

    /// Base URL of the ledger node.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    pub node: String,
}

#[derive(Serialize)]
struct FundOutput {
    address: String,
    balance: u64,
}

pub async fn run(args: FundArgs) -> anyhow::Result<()> {
    let address = ChainAddress::from_hex(&args.address)?;
    let rpc = HttpLedgerRpc::new(&args.node)?;
    let balance = rpc.fund(&address, args.amount).await?;

    let output = FundOutput {
        address: address.to_string(),
        balance,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
