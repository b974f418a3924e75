//! Node records: one validator candidate's key material and the identities
//! derived from it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::crypto::{
    KeyCapability, PublicKey, SecretKey, COMPRESSED_PUBLIC_KEY_LENGTH, COORDINATES_LENGTH,
    SECRET_KEY_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use crate::error::{CoreError, Result};
use crate::identity::{pubkey_id, NodeId};
use crate::types::{decode_hex, Address};

/// The key a node is described by.
#[derive(Clone)]
pub enum KeyMaterial {
    /// The node's secret key; the public key is derived from it.
    Private(SecretKey),
    /// Only the node's public key is known.
    Public(PublicKey),
}

impl KeyMaterial {
    /// Whether the secret key is available.
    pub fn is_private(&self) -> bool {
        matches!(self, KeyMaterial::Private(_))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Private(secret) => write!(f, "Private({:?})", secret.public_key()),
            KeyMaterial::Public(public) => write!(f, "Public({:?})", public),
        }
    }
}

/// A validator candidate.
///
/// The public key, address and identifier are derived on first access and
/// cached for the lifetime of the record.
#[derive(Clone)]
pub struct NodeRecord {
    material: KeyMaterial,
    capability: Arc<dyn KeyCapability>,
    public_key: OnceLock<PublicKey>,
    address: OnceLock<Address>,
    node_id: OnceLock<NodeId>,
    static_endpoint: Option<String>,
}

impl NodeRecord {
    /// Create a record from already-decoded key material.
    pub fn from_material(material: KeyMaterial, capability: Arc<dyn KeyCapability>) -> Self {
        Self {
            material,
            capability,
            public_key: OnceLock::new(),
            address: OnceLock::new(),
            node_id: OnceLock::new(),
            static_endpoint: None,
        }
    }

    /// Create a record from a raw 32-byte secret key.
    pub fn from_private_bytes(bytes: &[u8], capability: Arc<dyn KeyCapability>) -> Result<Self> {
        let secret = capability.secret_from_bytes(bytes)?;
        Ok(Self::from_material(KeyMaterial::Private(secret), capability))
    }

    /// Create a record from a raw public key (33, 64 or 65 bytes).
    pub fn from_public_bytes(bytes: &[u8], capability: Arc<dyn KeyCapability>) -> Result<Self> {
        let public = capability.public_from_bytes(bytes)?;
        Ok(Self::from_material(KeyMaterial::Public(public), capability))
    }

    /// Create a record from a hex-encoded secret key (optional `0x`).
    pub fn from_private_hex(s: &str, capability: Arc<dyn KeyCapability>) -> Result<Self> {
        Self::from_private_bytes(&decode_hex(s)?, capability)
    }

    /// Create a record from a hex-encoded public key (optional `0x`).
    pub fn from_public_hex(s: &str, capability: Arc<dyn KeyCapability>) -> Result<Self> {
        Self::from_public_bytes(&decode_hex(s)?, capability)
    }

    /// Create a record from hex key material of either kind.
    ///
    /// 32 bytes is a secret key; 33, 64 and 65 bytes are public keys.
    pub fn parse(s: &str, capability: Arc<dyn KeyCapability>) -> Result<Self> {
        let bytes = decode_hex(s)?;
        match bytes.len() {
            SECRET_KEY_LENGTH => Self::from_private_bytes(&bytes, capability),
            COMPRESSED_PUBLIC_KEY_LENGTH | COORDINATES_LENGTH | UNCOMPRESSED_PUBLIC_KEY_LENGTH => {
                Self::from_public_bytes(&bytes, capability)
            }
            n => Err(CoreError::MalformedKeyEncoding(format!(
                "key material of {} bytes is neither a secret nor a public key",
                n
            ))),
        }
    }

    /// Generate a record with a fresh secret key.
    pub fn generate(capability: Arc<dyn KeyCapability>) -> Self {
        let (secret, public) = capability.generate_key_pair();
        let record = Self::from_material(KeyMaterial::Private(secret), capability);
        let _ = record.public_key.set(public);
        record
    }

    /// The key material this record was built from.
    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// The node's public key.
    pub fn public_key(&self) -> &PublicKey {
        self.public_key.get_or_init(|| match &self.material {
            KeyMaterial::Private(secret) => self.capability.public_key(secret),
            KeyMaterial::Public(public) => *public,
        })
    }

    /// The node's validator address.
    pub fn address(&self) -> Address {
        *self
            .address
            .get_or_init(|| self.capability.derive_address(self.public_key()))
    }

    /// The node's 64-byte identifier.
    pub fn node_id(&self) -> NodeId {
        *self.node_id.get_or_init(|| pubkey_id(self.public_key()))
    }

    /// The raw key as `0x`-prefixed hex: the secret key for private
    /// records, the uncompressed public key otherwise.
    pub fn raw_key_hex(&self) -> String {
        match &self.material {
            KeyMaterial::Private(secret) => {
                format!("0x{}", hex::encode(self.capability.derive_raw_bytes(secret)))
            }
            KeyMaterial::Public(public) => format!("0x{}", hex::encode(public.to_uncompressed())),
        }
    }

    /// Build the `node-id-hex@host:port` descriptor for this node.
    pub fn static_endpoint(&self, host: &str, port: u16) -> Result<String> {
        if host.is_empty() {
            return Err(CoreError::EmptyHost);
        }
        Ok(format!("{}@{}:{}", self.node_id().to_hex(), host, port))
    }

    /// Attach a static endpoint descriptor to the record.
    pub fn with_static_endpoint(mut self, host: &str, port: u16) -> Result<Self> {
        self.static_endpoint = Some(self.static_endpoint(host, port)?);
        Ok(self)
    }

    /// The attached static endpoint descriptor, if any.
    pub fn static_endpoint_descriptor(&self) -> Option<&str> {
        self.static_endpoint.as_deref()
    }
}

impl fmt::Debug for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRecord")
            .field("address", &self.address())
            .field("private", &self.material.is_private())
            .field("static_endpoint", &self.static_endpoint)
            .finish()
    }
}
