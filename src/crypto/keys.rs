//! secp256k1 Private Keys
//!
//! `PrivateKey` is an already-validated scalar in `[1, n)`. The raw bytes
//! are zeroized on drop and never appear in `Debug` output.

use super::address::Address;
use crate::tx::TxError;
use ethers_core::types::U256;
use secp256k1::constants::CURVE_ORDER;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private key length in bytes
pub const PRIVATE_KEY_LEN: usize = 32;

/// The secp256k1 group order `n`
pub fn curve_order() -> U256 {
    U256::from_big_endian(&CURVE_ORDER)
}

/// A validated secp256k1 private key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    /// Create a key from 32 big-endian bytes.
    ///
    /// Fails with `InvalidKey` for the wrong length, zero, or any value
    /// not below the curve order.
    pub fn from_slice(private_key: &[u8]) -> Result<Self, TxError> {
        if private_key.len() != PRIVATE_KEY_LEN {
            return Err(TxError::InvalidKey(format!(
                "invalid private key length: expected {}, got {}",
                PRIVATE_KEY_LEN,
                private_key.len()
            )));
        }

        // Range checks are done by libsecp256k1 (rejects 0 and >= n)
        SecretKey::from_slice(private_key).map_err(|e| TxError::InvalidKey(e.to_string()))?;

        let mut bytes = [0u8; PRIVATE_KEY_LEN];
        bytes.copy_from_slice(private_key);
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded key, with or without `0x`
    pub fn from_hex(hex_key: &str) -> Result<Self, TxError> {
        let trimmed = hex_key.trim();
        let mut raw = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
            .map_err(|e| TxError::InvalidKey(format!("invalid hex: {}", e)))?;
        let result = Self::from_slice(&raw);
        raw.zeroize();
        result
    }

    /// Raw big-endian key bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.bytes
    }

    /// Lowercase hex encoding without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn secret_key(&self) -> Result<SecretKey, TxError> {
        SecretKey::from_slice(&self.bytes).map_err(|e| TxError::InvalidKey(e.to_string()))
    }

    /// The matching public key
    pub fn public_key(&self) -> Result<PublicKey, TxError> {
        let secp = Secp256k1::signing_only();
        Ok(PublicKey::from_secret_key(&secp, &self.secret_key()?))
    }

    /// The address owned by this key
    pub fn address(&self) -> Result<Address, TxError> {
        Ok(Address::from_public_key(&self.public_key()?))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}
