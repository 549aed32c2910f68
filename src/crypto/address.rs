//! Account Addresses
//!
//! An address is the last 20 bytes of the Keccak-256 hash of an
//! uncompressed secp256k1 public key (without the `0x04` prefix).
//! Addresses are displayed in EIP-55 mixed-case checksum form.

use super::hash::keccak256;
use crate::tx::TxError;
use secp256k1::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address derived from a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Wrap raw address bytes
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive the address of a secp256k1 public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        // Get the uncompressed public key (65 bytes, starting with 0x04)
        let pubkey_bytes = public_key.serialize_uncompressed();

        // Hash the public key (excluding the 0x04 prefix)
        let hash = keccak256(&pubkey_bytes[1..]);

        // Take the last 20 bytes
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[12..32]);
        Self(address)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// EIP-55 checksummed hex form, `0x` prefixed
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut result = String::with_capacity(2 + ADDRESS_LEN * 2);
        result.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

            if ch.is_ascii_digit() || nibble < 8 {
                result.push(ch);
            } else {
                result.push(ch.to_ascii_uppercase());
            }
        }

        result
    }

    /// Compare against an opaque account identifier.
    ///
    /// Identifiers that are not address-shaped never match.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let trimmed = identifier.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if hex_part.len() != ADDRESS_LEN * 2 {
            return false;
        }
        match hex::decode(hex_part) {
            Ok(bytes) => bytes[..] == self.0[..],
            Err(_) => false,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = TxError;

    /// Parse a `0x`-prefixed (or bare) 40 character hex address.
    ///
    /// All-lowercase and all-uppercase input is accepted as is. Mixed-case
    /// input must carry a valid EIP-55 checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        if hex_part.len() != ADDRESS_LEN * 2 {
            return Err(TxError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ADDRESS_LEN * 2,
                hex_part.len()
            )));
        }

        let bytes = hex::decode(hex_part).map_err(|e| TxError::InvalidAddress(e.to_string()))?;
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&bytes);
        let address = Self(address);

        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *hex_part {
            return Err(TxError::InvalidAddress(format!("bad EIP-55 checksum: {}", trimmed)));
        }

        Ok(address)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
