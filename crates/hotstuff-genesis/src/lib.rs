//! # HotStuff Genesis
//!
//! The unified API for bootstrapping a HotStuff network's validator set.
//!
//! ## Overview
//!
//! Every node joining the network must agree, byte for byte, on the genesis
//! header. This crate derives the initial validator set from node keys and
//! produces:
//!
//! - **Genesis extra data**: the canonical encoding of the ordered validator
//!   addresses, embedded in the genesis header
//! - **Static nodes**: `node-id@host:port` descriptors for peer discovery
//!
//! ## Key Concepts
//!
//! - **Address**: 20-byte Keccak-256 derived validator identity.
//! - **Node ID**: 64-byte `X || Y` public key, used on the network.
//! - **Canonical order**: ascending address bytes, independent of input order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hotstuff_genesis::{Bootstrap, BootstrapConfig, Secp256k1};
//!
//! let keys = [
//!     "562aa98da69477996bd82422b97698541f25e71ba2f803970947b3ad8bdb7afa",
//!     "8bea3ce27136df435ada62a40a4226404879b3c42e2e86ba9a236b4a61c99c26",
//! ];
//!
//! let bootstrap =
//!     Bootstrap::from_keys(Arc::new(Secp256k1), BootstrapConfig::default(), &keys).unwrap();
//!
//! println!("extraData: {}", bootstrap.genesis_extra_hex());
//! println!("{}", bootstrap.static_nodes_json().unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `hotstuff_genesis::core` - Core primitives (Address, NodeId, NodeRecord, encoding)

pub mod bootstrap;
pub mod error;

// Re-export component crates
pub use hotstuff_genesis_core as core;

// Re-export main types for convenience
pub use bootstrap::{Bootstrap, BootstrapConfig, BootstrapReport, ValidatorEntry};
pub use error::{BootstrapError, Result};

// Re-export commonly used core types
pub use hotstuff_genesis_core::{
    decode_genesis_extra, encode_genesis_extra, Address, CoreError, GenesisExtra, KeyCapability,
    NodeId, NodeRecord, Secp256k1, ValidatorSet,
};
