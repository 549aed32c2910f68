//! Keccak-256 hashing

use tiny_keccak::{Hasher, Keccak};

/// Keccak256 hash (used for digests and addresses)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}
