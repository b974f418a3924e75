//! # HotStuff Genesis Testkit
//!
//! Testing utilities for genesis tooling.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known keys with their expected addresses, identifiers
//!   and genesis extra bytes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Reference keys and a seeded key capability
//!
//! ## Golden Vectors
//!
//! ```rust
//! use hotstuff_genesis_testkit::vectors::{reference_nodes_extra, REFERENCE_NODES_EXTRA};
//!
//! assert_eq!(reference_nodes_extra().unwrap(), REFERENCE_NODES_EXTRA);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use hotstuff_genesis_testkit::generators::distinct_addresses;
//!
//! proptest! {
//!     #[test]
//!     fn encode_is_deterministic(addrs in distinct_addresses(16)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    capability, generated_nodes, reference_nodes, reference_validators, seeded_capability,
    SeededSecp256k1, REFERENCE_NODE_KEYS, REFERENCE_VALIDATORS,
};
pub use generators::{distinct_addresses, node_record, node_set};
pub use vectors::{identity_vectors, verify_identity_vectors, IdentityVector};
