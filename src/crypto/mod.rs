//! Cryptographic primitives for ledger-auth
//!
//! This module provides the low-level building blocks the transaction
//! signer and recoverer are assembled from:
//! - Keccak-256 hashing
//! - A zeroizing secp256k1 private key handle
//! - 20-byte account addresses with EIP-55 checksum formatting

pub mod address;
pub mod hash;
pub mod keys;

pub use address::Address;
pub use hash::keccak256;
pub use keys::{curve_order, PrivateKey};
