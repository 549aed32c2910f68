//! ledger-auth
//!
//! Authentication of transfer-of-value records for an account-based ledger.
//! A sender signs a transaction with a secp256k1 key; anyone can recover the
//! signer's address from the signature alone.
//!
//! # Architecture
//!
//! The signing core:
//! - **tx**: transaction model, canonical hashing, signing, recovery
//! - **crypto**: Keccak-256, private key handle, addresses
//! - **serde_hex**: lossless JSON encoding of signature scalars
//!
//! The tooling layer around it:
//! - **keyfile**: hex key files on disk
//! - **config**: CLI settings
//! - **error**: serializable boundary errors
//! - **utils**: structured, redacting logs
//!
//! The core is pure: no I/O, no logging, no global state.
//!
//! # Security
//!
//! Private keys are zeroized when dropped and never printed by `Debug`.
//! A successful recovery is not authentication; compare the recovered
//! address with the claimed sender.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_auth::{Transaction, PrivateKey};
//!
//! let key = PrivateKey::from_hex(hex_key)?;
//! let tx = Transaction::new(1, 1, "bill", "nathan", 1_000_000, 0, Vec::new());
//! let signed = tx.sign(&key)?;
//! assert_eq!(signed.recover_address()?, key.address()?);
//! ```

pub mod error;
pub mod crypto;
pub mod tx;
pub mod serde_hex;
pub mod keyfile;
pub mod config;
pub mod utils;

// Re-export key types for convenience
pub use ethers_core::types::U256;
pub use error::{ErrorCode, LedgerError, LedgerResult};
pub use crypto::{keccak256, Address, PrivateKey};
pub use tx::{
    decode_v, encode_transaction, encode_v, recover_address, recover_public_key, sign,
    sign_with_key, transaction_digest, SignedTransaction, Transaction, TxError,
};
