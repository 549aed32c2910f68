//! Transaction Signing and Recovery
//!
//! Canonical hashing of ledger transactions, recoverable secp256k1
//! signatures with a chain-bound recovery identifier, and recovery of the
//! signer's address.
//!
//! # Example
//! ```rust,ignore
//! use ledger_auth::tx::{Transaction, sign, recover_address};
//!
//! let tx = Transaction::new(1, 1, "bill", "nathan", 1_000_000, 0, Vec::new());
//! let signed = sign(&tx, &private_key)?;
//! let signer = recover_address(&tx, signed.v(), signed.r(), signed.s())?;
//! ```

pub mod types;
pub mod hasher;
pub mod signer;
pub mod recover;

pub use types::*;
pub use hasher::*;
pub use signer::*;
pub use recover::*;

#[cfg(test)]
mod tests;
