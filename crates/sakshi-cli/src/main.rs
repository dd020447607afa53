//! # sakshi CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Sakshi Stack CLI — evidence sealing toolchain.
///
/// Hashes evidence files, seals them onto a Sakshi ledger node, and
/// verifies records against local copies after the fact.
#[derive(Parser, Debug)]
#[command(name = "sakshi", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate an Ed25519 signing key.
    Keygen(sakshi_cli::keygen::KeygenArgs),
    /// Hash a file and seal it onto the ledger.
    Seal(sakshi_cli::seal::SealArgs),
    /// Look up a transaction receipt.
    Receipt(sakshi_cli::receipt::ReceiptArgs),
    /// Fetch a record and check it against a local file.
    Verify(sakshi_cli::verify::VerifyArgs),
    /// Credit an address from the dev faucet.
    Fund(sakshi_cli::fund::FundArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen(args) => sakshi_cli::keygen::run(args),
        Commands::Seal(args) => sakshi_cli::seal::run(args).await,
        Commands::Receipt(args) => sakshi_cli::receipt::run(args).await,
        Commands::Verify(args) => sakshi_cli::verify::run(args).await,
        Commands::Fund(args) => sakshi_cli::fund::run(args).await,
    }
}
