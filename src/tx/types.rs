//! Transaction Type Definitions
//!
//! Core data structures for signed ledger transactions.

use crate::crypto::{curve_order, Address};
use crate::serde_hex;
use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// Offset added to `2 * chain_id` when building the recovery identifier
pub const V_CHAIN_OFFSET: u64 = 35;

/// The transactional information between two parties.
///
/// Immutable once constructed; every field takes part in the signing digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger network the transaction is bound to
    chain_id: u32,
    /// Sender-supplied sequence number
    nonce: u64,
    /// Account sending the transaction. Checked against the signature.
    #[serde(rename = "from")]
    from_id: String,
    /// Account receiving the value
    #[serde(rename = "to")]
    to_id: String,
    /// Amount transferred, in the ledger's base unit
    value: u64,
    /// Incentive offered to include the transaction
    tip: u64,
    /// Extra opaque payload
    #[serde(default, with = "serde_hex::opt_bytes")]
    data: Vec<u8>,
}

impl Transaction {
    /// Construct a new transaction
    pub fn new(
        chain_id: u32,
        nonce: u64,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        value: u64,
        tip: u64,
        data: Vec<u8>,
    ) -> Self {
        Self {
            chain_id,
            nonce,
            from_id: from_id.into(),
            to_id: to_id.into(),
            value,
            tip,
            data,
        }
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn tip(&self) -> u64 {
        self.tip
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A signed version of the transaction, as submitted by wallets.
///
/// The signature travels as separate `v`, `r`, `s` components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    tx: Transaction,
    /// Recovery identifier: `recovery_bit + 35 + 2 * chain_id`
    #[serde(with = "serde_hex::u64_flex")]
    v: u64,
    /// First scalar of the ECDSA signature
    #[serde(with = "serde_hex::u256_flex")]
    r: U256,
    /// Second scalar of the ECDSA signature
    #[serde(with = "serde_hex::u256_flex")]
    s: U256,
}

impl SignedTransaction {
    /// Assemble a signed transaction from received parts.
    ///
    /// No checks are made here; see [`SignedTransaction::validate_signature_values`].
    pub fn from_parts(tx: Transaction, v: u64, r: U256, s: U256) -> Self {
        Self { tx, v, r, s }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn v(&self) -> u64 {
        self.v
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// Split back into the transaction and its `(v, r, s)` components
    pub fn into_parts(self) -> (Transaction, u64, U256, U256) {
        (self.tx, self.v, self.r, self.s)
    }

    /// Check `v`, `r`, `s` ranges without performing recovery
    pub fn validate_signature_values(&self) -> Result<(), TxError> {
        check_signature_values(self.tx.chain_id, self.v, self.r, self.s).map(|_| ())
    }

    /// 65-byte `r || s || recovery_bit` form
    pub fn signature_bytes(&self) -> Result<[u8; 65], TxError> {
        let (_, recovery_bit) = decode_v(self.v)?;

        let mut bytes = [0u8; 65];
        self.r.to_big_endian(&mut bytes[0..32]);
        self.s.to_big_endian(&mut bytes[32..64]);
        bytes[64] = recovery_bit;
        Ok(bytes)
    }

    /// Hex string of [`SignedTransaction::signature_bytes`]
    pub fn signature_hex(&self) -> Result<String, TxError> {
        Ok(format!("0x{}", hex::encode(self.signature_bytes()?)))
    }
}

/// The `chain_id` dependent part of `v`
pub fn chain_offset(chain_id: u32) -> u64 {
    V_CHAIN_OFFSET + 2 * u64::from(chain_id)
}

/// Build the recovery identifier from a raw recovery bit
pub fn encode_v(chain_id: u32, recovery_bit: u8) -> Result<u64, TxError> {
    if recovery_bit > 1 {
        return Err(TxError::SigningFailed(format!(
            "recovery id {} cannot be encoded",
            recovery_bit
        )));
    }
    Ok(chain_offset(chain_id) + u64::from(recovery_bit))
}

/// Split a recovery identifier into `(chain_id, recovery_bit)`
pub fn decode_v(v: u64) -> Result<(u32, u8), TxError> {
    if v < V_CHAIN_OFFSET {
        return Err(TxError::RecoveryFailure(format!(
            "v {} carries no chain id (must be at least {})",
            v, V_CHAIN_OFFSET
        )));
    }

    let shifted = v - V_CHAIN_OFFSET;
    let recovery_bit = (shifted % 2) as u8;
    let chain_id = u32::try_from(shifted / 2).map_err(|_| {
        TxError::RecoveryFailure(format!("v {} encodes an out of range chain id", v))
    })?;

    Ok((chain_id, recovery_bit))
}

/// Validate signature components for a transaction declaring `chain_id`.
///
/// Returns the raw recovery bit on success.
pub(crate) fn check_signature_values(
    chain_id: u32,
    v: u64,
    r: U256,
    s: U256,
) -> Result<u8, TxError> {
    let (signed_chain_id, recovery_bit) = decode_v(v)?;
    if signed_chain_id != chain_id {
        return Err(TxError::RecoveryFailure(format!(
            "signature is bound to chain {}, transaction declares chain {}",
            signed_chain_id, chain_id
        )));
    }

    let order = curve_order();
    if r.is_zero() || r >= order {
        return Err(TxError::RecoveryFailure("r is out of range".to_string()));
    }
    if s.is_zero() || s >= order {
        return Err(TxError::RecoveryFailure("s is out of range".to_string()));
    }

    Ok(recovery_bit)
}

/// Errors produced by the signing and recovery core
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Recovery failure: {0}")]
    RecoveryFailure(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Sender mismatch: transaction claims {claimed}, signature recovers {recovered}")]
    SenderMismatch { claimed: String, recovered: Address },
}
