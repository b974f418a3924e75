//! Strong type definitions for validator identities.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Length of a validator address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// A 20-byte validator address: the low 20 bytes of Keccak-256 over the
/// uncompressed public key coordinates.
///
/// Ordering is byte-wise, which is the order validators take in genesis.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// Create a new Address from raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Convert to lowercase hex, `0x`-prefixed.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Render with the EIP-55 mixed-case checksum.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Parse from hex. The `0x` prefix is optional and case is ignored.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| CoreError::MalformedAddress(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }

    /// The zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; ADDRESS_LENGTH] = slice.try_into().map_err(|_| {
            CoreError::MalformedAddress(format!(
                "address must be {} bytes, got {}",
                ADDRESS_LENGTH,
                slice.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode hex with an optional `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(strip_hex_prefix(s.trim()))
        .map_err(|e| CoreError::MalformedKeyEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = Address::from_bytes([0x42; 20]);
        let hex = addr.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(Address::from_hex(&hex).unwrap(), addr);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let addr = Address::from_hex("40fbbe484b8ee6139af08446950b088e10b2306a").unwrap();
        assert_eq!(addr.0[0], 0x40);
        assert_eq!(addr.0[19], 0x6a);
    }

    #[test]
    fn test_address_checksum() {
        // Published mixed-case forms round-trip through lowercase bytes.
        for published in [
            "0x40FBBE484b8Ee6139Af08446950B088e10b2306A",
            "0x8C161d85fDC086AC6726bCEDe39f2CCB1Afa3bc8",
            "0x22C21D4F64aabA7ec837b6B93639dB8cF514dAD5",
            "0xBE6805C4c904B9cc39065ADC4cCcF4FCaB167AE6",
        ] {
            let addr = Address::from_hex(published).unwrap();
            assert_eq!(addr.to_checksum(), published);
        }
    }

    #[test]
    fn test_address_wrong_length() {
        let err = Address::from_hex("0x1234").unwrap_err();
        assert!(matches!(err, CoreError::MalformedAddress(_)));

        let err = Address::try_from(&[0u8; 19][..]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedAddress(_)));
    }

    #[test]
    fn test_address_bad_hex() {
        let err = Address::from_hex("0xzz").unwrap_err();
        assert!(matches!(err, CoreError::MalformedAddress(_)));
    }

    #[test]
    fn test_address_ordering_is_bytewise() {
        let low = Address::from_bytes([0x01; 20]);
        let mut high_bytes = [0x01; 20];
        high_bytes[19] = 0x02;
        let high = Address::from_bytes(high_bytes);
        assert!(low < high);
        assert!(Address::ZERO < low);
    }

    #[test]
    fn test_address_serde() {
        let addr = Address::from_hex("0x22c21d4f64aaba7ec837b6b93639db8cf514dad5").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x22C21D4F64aabA7ec837b6B93639dB8cF514dAD5\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
