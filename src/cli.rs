//! # CLI Interface
//!
//! Command-line arguments for `ledger-auth`, defined with `clap` derive.
//! Subcommands: `keygen`, `address`, `digest`, `sign` and `recover`.

use clap::{Args, Parser, Subcommand};
use ledger_auth::config::{env_vars, OutputFormat, SignerSettings};
use ledger_auth::Transaction;
use std::path::PathBuf;

/// Sign ledger transactions and recover their signers.
#[derive(Parser, Debug)]
#[command(name = "ledger-auth", about = "Sign ledger transactions and recover their signers", version)]
pub struct LedgerCli {
    /// Hex key file used for signing.
    #[arg(long, global = true, env = env_vars::KEY_FILE)]
    pub key_file: Option<PathBuf>,

    /// Chain id for transactions built from flags.
    #[arg(long, global = true, env = env_vars::CHAIN_ID)]
    pub chain_id: Option<u32>,

    /// Emit debug logs on stderr.
    #[arg(long, global = true, env = env_vars::DEBUG)]
    pub debug: bool,

    /// Write single-line JSON.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Use the strict profile (sender must match, chain 0 refused).
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new key file and print its address.
    Keygen(KeygenArgs),
    /// Print the address of the configured key.
    Address,
    /// Print the canonical digest of a transaction.
    Digest(TxArgs),
    /// Build and sign a transaction, printing the signed JSON.
    Sign(TxArgs),
    /// Recover the signer of a signed transaction read from a file or stdin.
    Recover(RecoverArgs),
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the new key file. Existing files are never overwritten.
    #[arg(long)]
    pub out: PathBuf,
}

/// Transaction fields (the chain id comes from the global `--chain-id`).
#[derive(Args, Debug)]
pub struct TxArgs {
    /// Sender-supplied sequence number.
    #[arg(long)]
    pub nonce: u64,

    /// Sender account. Defaults to the signing key's address.
    #[arg(long)]
    pub from: Option<String>,

    /// Recipient account.
    #[arg(long)]
    pub to: String,

    /// Amount in the ledger's base unit.
    #[arg(long)]
    pub value: u64,

    /// Tip offered for inclusion.
    #[arg(long, default_value_t = 0)]
    pub tip: u64,

    /// Extra payload as hex (optional `0x`).
    #[arg(long)]
    pub data: Option<String>,
}

impl TxArgs {
    /// Build the transaction, with `default_from` used when `--from` is absent
    pub fn to_transaction(&self, chain_id: u32, default_from: Option<String>) -> anyhow::Result<Transaction> {
        let from = match (&self.from, default_from) {
            (Some(from), _) => from.clone(),
            (None, Some(from)) => from,
            (None, None) => anyhow::bail!("--from is required when no key file is configured"),
        };

        let data = match &self.data {
            Some(hex_data) => {
                let trimmed = hex_data.trim();
                hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))?
            }
            None => Vec::new(),
        };

        Ok(Transaction::new(chain_id, self.nonce, from, self.to.clone(), self.value, self.tip, data))
    }
}

#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Signed transaction JSON file. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Fail unless the recovered signer matches the `from` field.
    #[arg(long)]
    pub verify_sender: bool,
}

impl LedgerCli {
    /// Fold flags and environment into settings
    pub fn settings(&self) -> SignerSettings {
        let mut settings = if self.strict {
            SignerSettings::strict()
        } else {
            SignerSettings::standard()
        };

        if let Some(chain_id) = self.chain_id {
            settings = settings.with_chain_id(chain_id);
        }
        if let Some(path) = &self.key_file {
            settings = settings.with_key_file(path.clone());
        }
        if self.compact {
            settings = settings.with_output(OutputFormat::Compact);
        }
        if let Commands::Recover(args) = &self.command {
            if args.verify_sender {
                settings = settings.with_verify_sender(true);
            }
        }

        settings.with_debug(self.debug)
    }
}
