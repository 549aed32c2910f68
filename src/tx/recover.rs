//! Signer Recovery
//!
//! Recovers the signing address from a transaction and its `(v, r, s)`.
//! The digest is always recomputed from the transaction fields.
//!
//! Recovery succeeding is not authentication: a tampered transaction
//! recovers to some other address. Compare the result with the claimed
//! sender, as [`SignedTransaction::verify_sender`] does.

use super::hasher::transaction_digest;
use super::types::*;
use crate::crypto::Address;
use ethers_core::types::U256;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1};

/// Recover the public key that produced `(v, r, s)` over `tx`
pub fn recover_public_key(tx: &Transaction, v: u64, r: U256, s: U256) -> Result<PublicKey, TxError> {
    let recovery_bit = check_signature_values(tx.chain_id(), v, r, s)?;

    let recovery_id = RecoveryId::from_i32(i32::from(recovery_bit))
        .map_err(|e| TxError::RecoveryFailure(e.to_string()))?;

    // Reconstruct the signature bytes
    let mut sig_bytes = [0u8; 64];
    r.to_big_endian(&mut sig_bytes[0..32]);
    s.to_big_endian(&mut sig_bytes[32..64]);

    let recoverable_sig = RecoverableSignature::from_compact(&sig_bytes, recovery_id)
        .map_err(|e| TxError::RecoveryFailure(e.to_string()))?;

    let message = Message::from_digest(transaction_digest(tx));

    let secp = Secp256k1::verification_only();
    secp.recover_ecdsa(&message, &recoverable_sig)
        .map_err(|e| TxError::RecoveryFailure(e.to_string()))
}

/// Recover the signer's address from a signature
pub fn recover_address(tx: &Transaction, v: u64, r: U256, s: U256) -> Result<Address, TxError> {
    let public_key = recover_public_key(tx, v, r, s)?;
    Ok(Address::from_public_key(&public_key))
}

impl SignedTransaction {
    /// Address that produced this signature
    pub fn recover_address(&self) -> Result<Address, TxError> {
        recover_address(self.transaction(), self.v(), self.r(), self.s())
    }

    /// Recover the signer and check it against the claimed `from` field.
    ///
    /// Returns the recovered address when they match.
    pub fn verify_sender(&self) -> Result<Address, TxError> {
        let recovered = self.recover_address()?;
        let claimed = self.transaction().from_id();

        if !recovered.matches_identifier(claimed) {
            return Err(TxError::SenderMismatch {
                claimed: claimed.to_string(),
                recovered,
            });
        }

        Ok(recovered)
    }
}
