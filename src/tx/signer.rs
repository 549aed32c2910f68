//! Transaction Signing
//!
//! Recoverable ECDSA over the transaction digest. Nonces are derived per
//! RFC 6979 by libsecp256k1, so signing never waits on an entropy source.

use super::hasher::transaction_digest;
use super::types::*;
use crate::crypto::PrivateKey;
use ethers_core::types::U256;
use secp256k1::{Message, Secp256k1};

/// Sign a transaction with raw private key bytes.
///
/// The key is validated before anything is hashed.
pub fn sign(tx: &Transaction, private_key: &[u8]) -> Result<SignedTransaction, TxError> {
    let key = PrivateKey::from_slice(private_key)?;
    sign_with_key(tx, &key)
}

/// Sign a transaction with an already-validated key
pub fn sign_with_key(tx: &Transaction, key: &PrivateKey) -> Result<SignedTransaction, TxError> {
    let secret_key = key.secret_key()?;

    let hash = transaction_digest(tx);
    let message = Message::from_digest(hash);

    let secp = Secp256k1::signing_only();
    let (recovery_id, signature) = secp
        .sign_ecdsa_recoverable(&message, &secret_key)
        .serialize_compact();

    let r = U256::from_big_endian(&signature[0..32]);
    let s = U256::from_big_endian(&signature[32..64]);

    // Recovery ids 2 and 3 only occur when r overflows the group order
    let recovery_bit = u8::try_from(recovery_id.to_i32())
        .map_err(|_| TxError::SigningFailed("negative recovery id".to_string()))?;
    let v = encode_v(tx.chain_id(), recovery_bit)?;

    Ok(SignedTransaction::from_parts(tx.clone(), v, r, s))
}

impl Transaction {
    /// Sign this transaction, see [`sign_with_key`]
    pub fn sign(&self, key: &PrivateKey) -> Result<SignedTransaction, TxError> {
        sign_with_key(self, key)
    }
}

#[cfg(test)]
mod signer_tests {
    use super::*;
    use crate::crypto::curve_order;
    use secp256k1::constants::CURVE_ORDER;

    // Known test private key (DO NOT USE IN PRODUCTION)
    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn scenario_tx() -> Transaction {
        Transaction::new(1, 1, "bill", "nathan", 1_000_000, 0, Vec::new())
    }

    #[test]
    fn test_sign_produces_chain_bound_v() {
        let key = hex::decode(TEST_KEY).unwrap();
        let signed = sign(&scenario_tx(), &key).unwrap();

        assert!(signed.v() == 37 || signed.v() == 38);
        assert_eq!(decode_v(signed.v()).unwrap().0, 1);
        assert_eq!(signed.transaction(), &scenario_tx());
    }

    #[test]
    fn test_signature_components_in_range() {
        let key = hex::decode(TEST_KEY).unwrap();
        let signed = sign(&scenario_tx(), &key).unwrap();
        let order = curve_order();

        assert!(!signed.r().is_zero() && signed.r() < order);
        assert!(!signed.s().is_zero() && signed.s() < order);
        // libsecp256k1 always emits low-S signatures
        assert!(signed.s() <= order / 2);
        signed.validate_signature_values().unwrap();
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        let a = scenario_tx().sign(&key).unwrap();
        let b = scenario_tx().sign(&key).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_nonce_gives_different_signature() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        let first = scenario_tx().sign(&key).unwrap();
        let second = Transaction::new(1, 2, "bill", "nathan", 1_000_000, 0, Vec::new())
            .sign(&key)
            .unwrap();
        assert_ne!((first.r(), first.s()), (second.r(), second.s()));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let tx = scenario_tx();
        for bad in [vec![0u8; 32], CURVE_ORDER.to_vec(), vec![0xff; 32], vec![1u8; 16], Vec::new()] {
            assert!(matches!(sign(&tx, &bad), Err(TxError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_chain_id_feeds_v() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        let tx = Transaction::new(1337, 1, "bill", "nathan", 1, 0, Vec::new());
        let signed = tx.sign(&key).unwrap();
        assert_eq!(decode_v(signed.v()).unwrap().0, 1337);
        assert!(signed.v() >= chain_offset(1337));
    }
}
