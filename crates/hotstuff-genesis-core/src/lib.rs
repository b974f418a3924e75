//! # HotStuff Genesis Core
//!
//! Pure primitives for bootstrapping a HotStuff validator set: node
//! identities, canonical validator ordering, and genesis extra-data encoding.
//!
//! This crate contains no I/O and no persisted state. Key generation is the
//! only operation that touches randomness, and it sits behind
//! [`KeyCapability`].
//!
//! ## Key Types
//!
//! - [`Address`] - 20-byte validator address (Keccak-256 of the public key)
//! - [`NodeId`] - 64-byte `X || Y` node identifier
//! - [`NodeRecord`] - one validator candidate with cached derived identities
//! - [`ValidatorSet`] - validators in canonical (address) order
//! - [`GenesisExtra`] - the structured genesis header extra field
//!
//! ## Flow
//!
//! key material -> [`NodeRecord`] -> [`sort_nodes`] / [`ValidatorSet`] ->
//! [`encode_genesis_extra`]

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod node;
pub mod ordering;
pub mod types;

pub use canonical::{
    decode_genesis_extra, decode_genesis_extra_hex, encode_genesis_extra,
    encode_genesis_extra_hex, GenesisExtra, EXTRA_VANITY,
};
pub use crypto::{keccak_address, KeyCapability, PublicKey, Secp256k1, SecretKey};
pub use error::{CoreError, Result};
pub use identity::{id_to_pubkey, pubkey_id, NodeId, NODE_ID_LENGTH};
pub use node::{KeyMaterial, NodeRecord};
pub use ordering::{nodes_address, sort_nodes, ValidatorSet};
pub use types::{Address, ADDRESS_LENGTH};
