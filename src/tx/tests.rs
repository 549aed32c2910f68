//! Transaction Signing Test Suite
//!
//! End-to-end scenarios across hashing, signing, recovery and the wire format.

use super::*;
use crate::crypto::PrivateKey;
use std::sync::Arc;
use std::thread;

// Known test private key (DO NOT USE IN PRODUCTION)
const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const TEST_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

fn test_key() -> PrivateKey {
    PrivateKey::from_hex(TEST_KEY).unwrap()
}

fn scenario_tx() -> Transaction {
    Transaction::new(1, 1, "bill", "nathan", 1_000_000, 0, Vec::new())
}

/// Every single-field mutation of the scenario transaction
fn single_field_mutations() -> Vec<(&'static str, Transaction)> {
    vec![
        ("chain_id", Transaction::new(2, 1, "bill", "nathan", 1_000_000, 0, Vec::new())),
        ("nonce", Transaction::new(1, 2, "bill", "nathan", 1_000_000, 0, Vec::new())),
        ("from", Transaction::new(1, 1, "bilL", "nathan", 1_000_000, 0, Vec::new())),
        ("to", Transaction::new(1, 1, "bill", "nathaN", 1_000_000, 0, Vec::new())),
        ("value", Transaction::new(1, 1, "bill", "nathan", 1_000_001, 0, Vec::new())),
        ("tip", Transaction::new(1, 1, "bill", "nathan", 1_000_000, 1, Vec::new())),
        ("data", Transaction::new(1, 1, "bill", "nathan", 1_000_000, 0, vec![0])),
    ]
}

/// The bill -> nathan transfer signed with a fixed key
#[test]
fn test_scenario_round_trip() {
    let signed = sign(&scenario_tx(), &test_key().to_bytes()).unwrap();
    let address = recover_address(&scenario_tx(), signed.v(), signed.r(), signed.s()).unwrap();
    assert_eq!(address, test_key().address().unwrap());
    assert_eq!(address.to_string(), TEST_ADDRESS);
}

/// Re-signing with nonce 2 changes (r, s) and still round-trips
#[test]
fn test_scenario_nonce_two() {
    let key = test_key();
    let first = scenario_tx().sign(&key).unwrap();

    let next = Transaction::new(1, 2, "bill", "nathan", 1_000_000, 0, Vec::new());
    let second = next.sign(&key).unwrap();

    assert_ne!((first.r(), first.s()), (second.r(), second.s()));
    assert_eq!(second.recover_address().unwrap().to_string(), TEST_ADDRESS);
}

#[test]
fn test_every_field_is_tamper_evident() {
    let signed = scenario_tx().sign(&test_key()).unwrap();
    let original_digest = scenario_tx().digest();

    for (field, tampered) in single_field_mutations() {
        assert_ne!(tampered.digest(), original_digest, "{} does not affect the digest", field);

        let result = recover_address(&tampered, signed.v(), signed.r(), signed.s());
        if field == "chain_id" {
            // Changing the chain id breaks the v binding outright
            assert!(matches!(result, Err(TxError::RecoveryFailure(_))), "chain_id: {:?}", result);
            continue;
        }

        match result {
            Ok(address) => assert_ne!(address.to_string(), TEST_ADDRESS, "{} tamper undetected", field),
            Err(err) => panic!("{} tamper should recover another address, got {:?}", field, err),
        }
    }
}

#[test]
fn test_chain_binding_across_chains() {
    let key = test_key();
    for chain_id in [0u32, 1, 5, 1337, 11_155_111] {
        let tx = Transaction::new(chain_id, 7, "bill", "nathan", 1, 0, Vec::new());
        let signed = tx.sign(&key).unwrap();

        let (decoded_chain, _) = decode_v(signed.v()).unwrap();
        assert_eq!(decoded_chain, chain_id);

        let other = Transaction::new(chain_id + 1, 7, "bill", "nathan", 1, 0, Vec::new());
        assert!(recover_address(&other, signed.v(), signed.r(), signed.s()).is_err());
    }
}

#[test]
fn test_payload_data_round_trip() {
    let key = test_key();
    let tx = Transaction::new(1, 3, "bill", "nathan", 5, 1, b"memo: rent".to_vec());
    let signed = tx.sign(&key).unwrap();
    assert_eq!(signed.recover_address().unwrap(), key.address().unwrap());
}

#[test]
fn test_wire_json_shape() {
    let signed = scenario_tx().sign(&test_key()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&signed).unwrap();

    assert_eq!(json["chain_id"], 1);
    assert_eq!(json["nonce"], 1);
    assert_eq!(json["from"], "bill");
    assert_eq!(json["to"], "nathan");
    assert_eq!(json["value"], 1_000_000);
    assert_eq!(json["tip"], 0);
    assert!(json["data"].is_null());
    assert_eq!(json["v"], signed.v());
    assert!(json["r"].as_str().unwrap().starts_with("0x"));
    assert!(json["s"].as_str().unwrap().starts_with("0x"));
}

#[test]
fn test_wire_json_round_trip_recovers() {
    let signed = scenario_tx().sign(&test_key()).unwrap();
    let json = serde_json::to_string(&signed).unwrap();
    let parsed: SignedTransaction = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, signed);
    assert_eq!(parsed.recover_address().unwrap().to_string(), TEST_ADDRESS);
}

#[test]
fn test_wire_accepts_decimal_scalars() {
    let signed = scenario_tx().sign(&test_key()).unwrap();
    let json = format!(
        r#"{{"chain_id":1,"nonce":1,"from":"bill","to":"nathan","value":1000000,"tip":0,"data":null,"v":{},"r":"{}","s":"{}"}}"#,
        signed.v(),
        signed.r(),
        signed.s()
    );
    let parsed: SignedTransaction = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, signed);
}

#[test]
fn test_unsigned_transaction_json() {
    let json = r#"{"chain_id":1,"nonce":1,"from":"bill","to":"nathan","value":1000000,"tip":0,"data":null}"#;
    let tx: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(tx, scenario_tx());
    assert_eq!(serde_json::to_string(&tx).unwrap(), json);
}

#[test]
fn test_concurrent_signing_with_shared_key() {
    let key = Arc::new(test_key());
    let expected = scenario_tx().sign(&key).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let key = Arc::clone(&key);
            thread::spawn(move || {
                let signed = scenario_tx().sign(&key).unwrap();
                let address = signed.recover_address().unwrap();
                (signed, address)
            })
        })
        .collect();

    for handle in handles {
        let (signed, address) = handle.join().unwrap();
        assert_eq!(signed, expected);
        assert_eq!(address.to_string(), TEST_ADDRESS);
    }
}
