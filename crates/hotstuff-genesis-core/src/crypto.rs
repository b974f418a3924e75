//! Cryptographic primitives for validator identities.
//!
//! Wraps secp256k1 keys (`k256`) and Keccak-256 address derivation with
//! strong types, behind the [`KeyCapability`] seam.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::{decode_hex, Address, ADDRESS_LENGTH};

/// Length of a secp256k1 secret key in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of a SEC1 compressed public key.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a SEC1 uncompressed public key (`0x04 || X || Y`).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Length of the bare `X || Y` coordinate form.
pub const COORDINATES_LENGTH: usize = 64;

/// A secp256k1 public key. Always a valid point on the curve.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Parse a SEC1-encoded point (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CoreError::MalformedKeyEncoding("invalid secp256k1 public key".into()))
    }

    /// Parse any supported public key form: 33-byte compressed,
    /// 65-byte uncompressed, or 64-byte `X || Y`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            COMPRESSED_PUBLIC_KEY_LENGTH | UNCOMPRESSED_PUBLIC_KEY_LENGTH => {
                Self::from_sec1_bytes(bytes)
            }
            COORDINATES_LENGTH => {
                let mut sec1 = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
                sec1[0] = 0x04;
                sec1[1..].copy_from_slice(bytes);
                Self::from_sec1_bytes(&sec1)
            }
            n => Err(CoreError::MalformedKeyEncoding(format!(
                "public key must be 33, 64 or 65 bytes, got {}",
                n
            ))),
        }
    }

    /// Parse from hex (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// SEC1 uncompressed encoding.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.0.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// SEC1 compressed encoding.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.0.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The affine coordinates `X || Y`, each left-padded to 32 bytes.
    pub fn coordinates(&self) -> [u8; COORDINATES_LENGTH] {
        let uncompressed = self.to_uncompressed();
        let mut out = [0u8; COORDINATES_LENGTH];
        out.copy_from_slice(&uncompressed[1..]);
        out
    }

    /// Compressed encoding as `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_compressed()))
    }

    /// The underlying `k256` key.
    pub fn as_k256(&self) -> &k256::PublicKey {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..18])
    }
}

impl From<k256::PublicKey> for PublicKey {
    fn from(key: k256::PublicKey) -> Self {
        Self(key)
    }
}

/// A secp256k1 secret key. Zeroized on drop by `k256`.
#[derive(Clone)]
pub struct SecretKey(k256::SecretKey);

impl SecretKey {
    /// Parse a 32-byte big-endian scalar. Zero and values at or above the
    /// curve order are rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(CoreError::MalformedKeyEncoding(format!(
                "secret key must be {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            )));
        }
        k256::SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CoreError::MalformedKeyEncoding("secret key out of range".into()))
    }

    /// Parse from hex (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&decode_hex(s)?)
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    /// Raw big-endian scalar bytes (secret key material).
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0.to_bytes().into()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({:?})", self.public_key())
    }
}

impl From<k256::SecretKey> for SecretKey {
    fn from(key: k256::SecretKey) -> Self {
        Self(key)
    }
}

/// Compute the Keccak-256 address of a public key.
pub fn keccak_address(public_key: &PublicKey) -> Address {
    let hash = Keccak256::digest(public_key.coordinates());
    let mut out = [0u8; ADDRESS_LENGTH];
    out.copy_from_slice(&hash[32 - ADDRESS_LENGTH..]);
    Address(out)
}

/// Key generation and derivation, supplied to everything that turns key
/// material into identities.
///
/// Only key generation needs randomness; everything else is a pure function
/// of its input.
pub trait KeyCapability: Send + Sync {
    /// Generate a fresh keypair.
    fn generate_key_pair(&self) -> (SecretKey, PublicKey);

    /// Derive the validator address of a public key.
    fn derive_address(&self, public_key: &PublicKey) -> Address;

    /// Serialize a secret key to its raw 32-byte form.
    fn derive_raw_bytes(&self, secret: &SecretKey) -> [u8; SECRET_KEY_LENGTH] {
        secret.to_bytes()
    }

    /// Derive the public key of a secret key.
    fn public_key(&self, secret: &SecretKey) -> PublicKey {
        secret.public_key()
    }

    /// Deserialize a secret key.
    fn secret_from_bytes(&self, bytes: &[u8]) -> Result<SecretKey> {
        SecretKey::from_slice(bytes)
    }

    /// Deserialize a public key.
    fn public_from_bytes(&self, bytes: &[u8]) -> Result<PublicKey> {
        PublicKey::from_bytes(bytes)
    }
}

/// The production capability: secp256k1 keys from the thread RNG, Keccak-256
/// addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl KeyCapability for Secp256k1 {
    fn generate_key_pair(&self) -> (SecretKey, PublicKey) {
        let secret = SecretKey(k256::SecretKey::random(&mut rand::thread_rng()));
        let public = secret.public_key();
        (secret, public)
    }

    fn derive_address(&self, public_key: &PublicKey) -> Address {
        keccak_address(public_key)
    }
}
