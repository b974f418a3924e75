//! Proptest generators for property-based testing.

use std::collections::BTreeSet;

use proptest::prelude::*;

use hotstuff_genesis_core::{Address, NodeRecord, SecretKey};

use crate::fixtures::capability;

/// Generate a valid secp256k1 secret key.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    any::<[u8; 32]>().prop_filter_map("scalar out of range", |bytes| {
        SecretKey::from_slice(&bytes).ok()
    })
}

/// Generate a node record backed by a random secret key.
pub fn node_record() -> impl Strategy<Value = NodeRecord> {
    secret_key().prop_map(|secret| {
        NodeRecord::from_private_bytes(&secret.to_bytes(), capability())
            .expect("generated secret key is valid")
    })
}

/// Generate a random address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate between 1 and `max` distinct addresses, in random order.
pub fn distinct_addresses(max: usize) -> impl Strategy<Value = Vec<Address>> {
    prop::collection::btree_set(any::<[u8; 20]>(), 1..=max)
        .prop_map(|set: BTreeSet<[u8; 20]>| set.into_iter().map(Address::from_bytes).collect())
        .prop_shuffle()
}

/// Generate between 1 and `max` node records with distinct keys.
pub fn node_set(max: usize) -> impl Strategy<Value = Vec<NodeRecord>> {
    prop::collection::btree_set(any::<[u8; 32]>(), 1..=max).prop_filter_map(
        "scalar out of range",
        |seeds| {
            let cap = capability();
            seeds
                .iter()
                .map(|seed| NodeRecord::from_private_bytes(seed, cap.clone()).ok())
                .collect::<Option<Vec<_>>>()
        },
    )
}
