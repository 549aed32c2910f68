use ledger_auth::{decode_v, PrivateKey, SignedTransaction, Transaction, U256};
use proptest::prelude::*;

fn any_private_key() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>()).prop_filter_map("valid secp256k1 scalar", |bytes| {
        PrivateKey::from_slice(&bytes).ok()
    })
}

fn any_transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<u32>(),
        any::<u64>(),
        "[a-z]{0,12}",
        "[a-z]{0,12}",
        any::<u64>(),
        any::<u64>(),
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(chain_id, nonce, from, to, value, tip, data)| {
            Transaction::new(chain_id, nonce, from, to, value, tip, data)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_transactions_recover_their_signer(key in any_private_key(), tx in any_transaction()) {
        let signed = tx.sign(&key).unwrap();
        prop_assert_eq!(signed.recover_address().unwrap(), key.address().unwrap());

        let (chain_id, bit) = decode_v(signed.v()).unwrap();
        prop_assert_eq!(chain_id, tx.chain_id());
        prop_assert!(bit <= 1);
    }

    #[test]
    fn signature_scalars_are_in_range(key in any_private_key(), tx in any_transaction()) {
        let signed = tx.sign(&key).unwrap();
        let order = ledger_auth::crypto::curve_order();

        prop_assert!(!signed.r().is_zero() && signed.r() < order);
        prop_assert!(!signed.s().is_zero() && signed.s() <= order / U256::from(2u8));
    }

    #[test]
    fn changing_the_value_changes_the_signer(
        key in any_private_key(),
        tx in any_transaction(),
        bump in 1u64..,
    ) {
        let signed = tx.sign(&key).unwrap();
        let tampered = Transaction::new(
            tx.chain_id(),
            tx.nonce(),
            tx.from_id(),
            tx.to_id(),
            tx.value().wrapping_add(bump),
            tx.tip(),
            tx.data().to_vec(),
        );

        let address = ledger_auth::recover_address(&tampered, signed.v(), signed.r(), signed.s()).unwrap();
        prop_assert_ne!(address, key.address().unwrap());
    }

    #[test]
    fn digests_are_deterministic(tx in any_transaction()) {
        prop_assert_eq!(tx.digest(), tx.clone().digest());
        prop_assert_eq!(tx.digest_hex().len(), 66);
    }

    #[test]
    fn signed_json_roundtrips(key in any_private_key(), tx in any_transaction()) {
        let signed = tx.sign(&key).unwrap();
        let json = serde_json::to_string(&signed).unwrap();
        let decoded: SignedTransaction = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&decoded, &signed);
        prop_assert_eq!(decoded.recover_address().unwrap(), key.address().unwrap());
    }
}
