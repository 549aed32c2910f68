//! Private Key Files
//!
//! Tooling-layer key storage. A key file holds the 32-byte key as 64 hex
//! characters (optionally `0x` prefixed, surrounding whitespace ignored),
//! matching go-ethereum's `LoadECDSA` / `SaveECDSA` layout.

use crate::crypto::PrivateKey;
use crate::error::{LedgerError, LedgerResult};
use crate::{log_debug, log_info};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use zeroize::{Zeroize, Zeroizing};

/// Generate a fresh key from the operating system RNG
pub fn generate_private_key() -> PrivateKey {
    let mut rng = OsRng;
    let mut secret_bytes = Zeroizing::new([0u8; 32]);
    loop {
        rng.fill_bytes(&mut secret_bytes[..]);
        // Zero or >= n has probability ~2^-128; draw again
        if let Ok(key) = PrivateKey::from_slice(&secret_bytes[..]) {
            return key;
        }
    }
}

/// Load a hex-encoded private key from disk
pub fn load_private_key(path: &Path) -> LedgerResult<PrivateKey> {
    let contents = Zeroizing::new(fs::read_to_string(path).map_err(|e| {
        LedgerError::io(format!("cannot read key file {}: {}", path.display(), e))
    })?);

    let key = PrivateKey::from_hex(contents.trim())
        .map_err(|e| LedgerError::from(e).with_details(path.display().to_string()))?;

    log_debug!("keyfile", "Loaded private key", path = path.display());
    Ok(key)
}

/// Write a key file, refusing to overwrite an existing one.
///
/// On Unix the file is created with mode `0600`.
pub fn save_private_key(path: &Path, key: &PrivateKey) -> LedgerResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| {
        LedgerError::io(format!("cannot create key file {}: {}", path.display(), e))
    })?;

    let mut encoded = key.to_hex();
    let written = file.write_all(encoded.as_bytes()).and_then(|_| file.sync_all());
    encoded.zeroize();
    drop(file);
    discard_on_failure(path, written)?;

    log_info!("keyfile", "Saved private key", path = path.display());
    Ok(())
}

/// Remove a half-written key file so a later save to the same path can succeed
fn discard_on_failure(path: &Path, written: io::Result<()>) -> LedgerResult<()> {
    written.map_err(|e| {
        let _ = fs::remove_file(path);
        LedgerError::io(format!("cannot write key file {}: {}", path.display(), e))
    })
}
