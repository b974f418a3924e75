//! Node identifiers: the 64-byte `X || Y` form of a public key.
//!
//! A [`NodeId`] must decode back to exactly the key it came from. Anything
//! that is not 64 bytes, or whose coordinates are off the curve, is rejected
//! rather than producing a key that merely looks valid.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::{PublicKey, COORDINATES_LENGTH};
use crate::error::{CoreError, Result};
use crate::types::decode_hex;

/// Length of a node identifier in bytes.
pub const NODE_ID_LENGTH: usize = COORDINATES_LENGTH;

/// A 64-byte node identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub [u8; NODE_ID_LENGTH]);

impl NodeId {
    /// Create from raw bytes without checking the curve equation.
    ///
    /// Use [`NodeId::to_public_key`] to validate.
    pub const fn from_bytes(bytes: [u8; NODE_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NODE_ID_LENGTH] {
        &self.0
    }

    /// Convert to hex string (no prefix), as used in static endpoints.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex (optional `0x` prefix). Only the length is checked.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_hex(s)?;
        Self::try_from(bytes.as_slice())
    }

    /// Recover the public key this identifier encodes.
    pub fn to_public_key(&self) -> Result<PublicKey> {
        id_to_pubkey(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for NodeId {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; NODE_ID_LENGTH] =
            slice
                .try_into()
                .map_err(|_| CoreError::InvalidIdentifierLength {
                    expected: NODE_ID_LENGTH,
                    actual: slice.len(),
                })?;
        Ok(Self(arr))
    }
}

impl FromStr for NodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NodeId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Derive the identifier of a public key.
pub fn pubkey_id(public_key: &PublicKey) -> NodeId {
    NodeId(public_key.coordinates())
}

/// Recover a public key from identifier bytes.
pub fn id_to_pubkey(id: &[u8]) -> Result<PublicKey> {
    if id.len() != NODE_ID_LENGTH {
        return Err(CoreError::InvalidIdentifierLength {
            expected: NODE_ID_LENGTH,
            actual: id.len(),
        });
    }
    PublicKey::from_bytes(id).map_err(|_| CoreError::PointNotOnCurve)
}
