//! Transaction Hashing
//!
//! Canonical pre-image encoding and digest calculation.
//!
//! pre-image = TX_DOMAIN_TAG
//!          || chain_id (u32 BE) || nonce (u64 BE)
//!          || len(from) (u64 BE) || from
//!          || len(to) (u64 BE) || to
//!          || value (u64 BE) || tip (u64 BE)
//!          || len(data) (u64 BE) || data
//!
//! digest = keccak256(pre-image)

use super::types::Transaction;
use crate::crypto::keccak256;

/// Domain separation tag for transaction digests
pub const TX_DOMAIN_TAG: &[u8] = b"\x19Ledger Signed Transaction:\n";

/// Append a length-prefixed variable-size field
fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Build the canonical pre-image of a transaction
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    let variable = tx.from_id().len() + tx.to_id().len() + tx.data().len();
    let mut encoded = Vec::with_capacity(TX_DOMAIN_TAG.len() + 4 + 8 * 6 + variable);

    encoded.extend_from_slice(TX_DOMAIN_TAG);
    encoded.extend_from_slice(&tx.chain_id().to_be_bytes());
    encoded.extend_from_slice(&tx.nonce().to_be_bytes());
    put_bytes(&mut encoded, tx.from_id().as_bytes());
    put_bytes(&mut encoded, tx.to_id().as_bytes());
    encoded.extend_from_slice(&tx.value().to_be_bytes());
    encoded.extend_from_slice(&tx.tip().to_be_bytes());
    put_bytes(&mut encoded, tx.data());

    encoded
}

/// Calculate the digest that gets signed
pub fn transaction_digest(tx: &Transaction) -> [u8; 32] {
    keccak256(&encode_transaction(tx))
}

impl Transaction {
    /// See [`transaction_digest`]
    pub fn digest(&self) -> [u8; 32] {
        transaction_digest(self)
    }

    /// Digest as a `0x` hex string
    pub fn digest_hex(&self) -> String {
        format!("0x{}", hex::encode(self.digest()))
    }
}
