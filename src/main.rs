mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Commands, LedgerCli, RecoverArgs, TxArgs};
use ledger_auth::config::{OutputFormat, SignerSettings};
use ledger_auth::utils::logging;
use ledger_auth::{keyfile, log_debug, log_error, log_info, log_warn};
use ledger_auth::{ErrorCode, LedgerError, SignedTransaction, TxError};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

#[derive(Serialize)]
struct AddressOutput {
    address: String,
}

#[derive(Serialize)]
struct KeygenOutput {
    address: String,
    key_file: String,
}

#[derive(Serialize)]
struct DigestOutput {
    digest: String,
    preimage: String,
}

#[derive(Serialize)]
struct RecoverOutput {
    address: String,
    from: String,
    sender_matches: bool,
}

fn main() -> ExitCode {
    let cli = LedgerCli::parse();
    let settings = cli.settings();

    if settings.debug {
        logging::enable_debug();
    }

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let ledger_err = to_ledger_error(err);
            log_error!("cli", "Command failed", code = ledger_err.code);
            eprintln!("{}", ledger_err.to_json());
            ExitCode::FAILURE
        }
    }
}

/// Map any failure onto the boundary error reported to the caller
fn to_ledger_error(err: anyhow::Error) -> LedgerError {
    if let Some(ledger_err) = err.downcast_ref::<LedgerError>() {
        return ledger_err.clone();
    }
    if let Some(tx_err) = err.downcast_ref::<TxError>() {
        return LedgerError::from(tx_err.clone());
    }
    if err.downcast_ref::<hex::FromHexError>().is_some() {
        return LedgerError::new(ErrorCode::HexError, format!("{:#}", err));
    }
    LedgerError::new(ErrorCode::InvalidInput, format!("{:#}", err))
}

fn run(command: Commands, settings: &SignerSettings) -> Result<()> {
    for warning in settings.validate()? {
        log_warn!("cli", warning);
    }

    match command {
        Commands::Keygen(args) => {
            let key = keyfile::generate_private_key();
            keyfile::save_private_key(&args.out, &key)?;
            emit(
                settings,
                &KeygenOutput {
                    address: key.address()?.to_string(),
                    key_file: args.out.display().to_string(),
                },
            )
        }
        Commands::Address => {
            let key = keyfile::load_private_key(settings.require_key_file()?)?;
            emit(settings, &AddressOutput { address: key.address()?.to_string() })
        }
        Commands::Digest(args) => digest(&args, settings),
        Commands::Sign(args) => sign(&args, settings),
        Commands::Recover(args) => recover(&args, settings),
    }
}

fn digest(args: &TxArgs, settings: &SignerSettings) -> Result<()> {
    let default_from = match (&args.from, &settings.key_file) {
        (None, Some(path)) => Some(keyfile::load_private_key(path)?.address()?.to_string()),
        _ => None,
    };
    let tx = args.to_transaction(settings.chain_id, default_from)?;

    emit(
        settings,
        &DigestOutput {
            digest: tx.digest_hex(),
            preimage: format!("0x{}", hex::encode(ledger_auth::encode_transaction(&tx))),
        },
    )
}

fn sign(args: &TxArgs, settings: &SignerSettings) -> Result<()> {
    let key = keyfile::load_private_key(settings.require_key_file()?)?;
    let signer = key.address()?;

    let tx = args.to_transaction(settings.chain_id, Some(signer.to_string()))?;
    log_debug!("cli", "Signing transaction", digest = tx.digest_hex());

    let signed = tx.sign(&key)?;
    log_info!(
        "cli",
        "Signed transaction",
        chain_id = tx.chain_id(),
        nonce = tx.nonce(),
        signer = signer,
    );

    emit(settings, &signed)
}

fn recover(args: &RecoverArgs, settings: &SignerSettings) -> Result<()> {
    let payload = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(LedgerError::from)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(LedgerError::from)?;
            buffer
        }
    };

    let signed: SignedTransaction = serde_json::from_str(&payload).map_err(LedgerError::from)?;
    let address = signed.recover_address()?;
    let claimed = signed.transaction().from_id();
    let sender_matches = address.matches_identifier(claimed);

    log_debug!("cli", "Recovered signer", signer = address, sender = claimed);

    if settings.verify_sender && !sender_matches {
        return Err(LedgerError::from(TxError::SenderMismatch {
            claimed: claimed.to_string(),
            recovered: address,
        })
        .into());
    }

    emit(
        settings,
        &RecoverOutput {
            address: address.to_string(),
            from: claimed.to_string(),
            sender_matches,
        },
    )
}

fn emit<T: Serialize>(settings: &SignerSettings, value: &T) -> Result<()> {
    let json = match settings.output {
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
        OutputFormat::Compact => serde_json::to_string(value),
    }
    .map_err(LedgerError::from)?;
    println!("{}", json);
    Ok(())
}
