//! Serde helpers for the transaction wire format
//!
//! Signature scalars must cross JSON without precision loss, so they are
//! written as `0x` hex strings and read from any of: an unsigned JSON
//! number, a decimal string or a `0x` hex string.

use ethers_core::types::U256;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Parse a big integer from a decimal or `0x` hex string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    let trimmed = s.trim();
    if let Some(hex_part) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        if hex_part.is_empty() || hex_part.len() > 64 {
            return Err(format!("invalid hex integer: {}", trimmed));
        }
        U256::from_str_radix(hex_part, 16).map_err(|e| format!("invalid hex integer {}: {:?}", trimmed, e))
    } else {
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid decimal integer: {}", trimmed));
        }
        U256::from_dec_str(trimmed).map_err(|e| format!("invalid decimal integer {}: {:?}", trimmed, e))
    }
}

/// `U256` as a `0x` hex string, read from number / decimal / hex
pub mod u256_flex {
    use super::*;

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U256Visitor)
    }

    struct U256Visitor;

    impl<'de> Visitor<'de> for U256Visitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned integer, decimal string or 0x hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::custom("negative integer"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            parse_u256(v).map_err(E::custom)
        }
    }
}

/// `u64` as a JSON number, read from number / decimal / hex
pub mod u64_flex {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U64Visitor)
    }

    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned integer, decimal string or 0x hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom("negative integer"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            let wide = parse_u256(v).map_err(E::custom)?;
            if wide > U256::from(u64::MAX) {
                return Err(E::custom(format!("integer {} does not fit in 64 bits", v)));
            }
            Ok(wide.as_u64())
        }
    }
}

/// Byte payload as `null` when empty, otherwise an array of byte values.
///
/// Also reads a `0x` hex string.
pub mod opt_bytes {
    use super::*;

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if bytes.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(bytes)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BytesVisitor)
    }

    struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("null, an array of bytes or a 0x hex string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Vec<u8>, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Vec<u8>, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Vec<u8>, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(BytesVisitor)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Vec<u8>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element::<u8>()? {
                out.push(byte);
            }
            Ok(out)
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Vec<u8>, E> {
            let hex_part = v
                .strip_prefix("0x")
                .ok_or_else(|| E::custom("byte string must be 0x prefixed hex"))?;
            hex::decode(hex_part).map_err(E::custom)
        }
    }
}
