//! # Keygen Subcommand
//!
//! Generates an Ed25519 signing key and prints the derived chain address.
//! The seed is printed once, for the operator to place in
//! `SAKSHI_SIGNING_KEY`; it is never written to disk here.

use clap::Args;
use sakshi_crypto::Ed25519KeyPair;
use serde::Serialize;

use crate::SIGNING_KEY_VAR;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print only the seed hex, for piping into a secret store.
    #[arg(long)]
    pub seed_only: bool,
}

#[derive(Serialize)]
struct KeygenOutput {
    address: String,
    public_key_hint: String,
    seed_hex: String,
    export_hint: String,
}

pub fn run(args: KeygenArgs) -> anyhow::Result<()> {
    let key = Ed25519KeyPair::generate();
    let seed_hex = key.to_seed_hex();

    if args.seed_only {
        println!("{seed_hex}");
        return Ok(());
    }

    let output = KeygenOutput {
        address: key.public_key().to_address().to_string(),
        public_key_hint: key.public_key().to_string(),
        seed_hex,
        export_hint: format!("export {SIGNING_KEY_VAR}=<seed_hex>"),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
