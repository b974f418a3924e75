//! Golden tests for cross-implementation agreement.
//!
//! Every genesis tool bootstrapping the same network must produce identical:
//! - validator addresses
//! - canonical validator order
//! - genesis extra bytes
//! - static node descriptors

use hotstuff_genesis::core::decode_genesis_extra_hex;
use hotstuff_genesis::{Bootstrap, BootstrapConfig};
use hotstuff_genesis_testkit::vectors::{
    identity_vectors, REFERENCE_NODES_EXTRA, SORTED_REFERENCE_ADDRESSES,
};
use hotstuff_genesis_testkit::{capability, REFERENCE_NODE_KEYS};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn reference_keys_produce_reference_extra() {
    init_tracing();

    let bootstrap =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();

    let addresses: Vec<String> = bootstrap
        .addresses()
        .iter()
        .map(|a| a.to_checksum())
        .collect();
    assert_eq!(addresses, SORTED_REFERENCE_ADDRESSES);
    assert_eq!(bootstrap.genesis_extra_hex(), REFERENCE_NODES_EXTRA);
}

#[test]
fn reference_static_nodes() {
    let bootstrap =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();

    // Static nodes follow canonical order, so match them up by address.
    let vectors = identity_vectors();
    for (i, address) in SORTED_REFERENCE_ADDRESSES.iter().enumerate() {
        let vector = vectors.iter().find(|v| v.address == *address).unwrap();
        assert_eq!(
            bootstrap.static_nodes()[i],
            format!("{}@127.0.0.1:{}", vector.node_id, 30300 + i)
        );
    }
}

#[test]
fn independent_bootstraps_agree() {
    // Two operators supply the same keys in different orders and encodings.
    let forward =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();

    let shuffled: Vec<String> = [3usize, 1, 0, 2]
        .iter()
        .map(|&i| format!("0x{}", REFERENCE_NODE_KEYS[i].to_uppercase()))
        .collect();
    let other = Bootstrap::from_keys(capability(), BootstrapConfig::default(), &shuffled).unwrap();

    assert_eq!(forward.genesis_extra(), other.genesis_extra());
    assert_eq!(forward.static_nodes(), other.static_nodes());
}

#[test]
fn public_keys_bootstrap_like_private_keys() {
    let private =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();

    let ids: Vec<String> = identity_vectors().iter().map(|v| v.node_id.to_string()).collect();
    let public = Bootstrap::from_keys(capability(), BootstrapConfig::default(), &ids).unwrap();

    assert_eq!(private.genesis_extra_hex(), public.genesis_extra_hex());
}

#[test]
fn extra_decodes_to_canonical_addresses() {
    let bootstrap =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();
    let decoded = decode_genesis_extra_hex(&bootstrap.genesis_extra_hex()).unwrap();
    assert_eq!(decoded, bootstrap.addresses());
}

#[test]
fn report_serializes() {
    let bootstrap =
        Bootstrap::from_keys(capability(), BootstrapConfig::default(), &REFERENCE_NODE_KEYS)
            .unwrap();
    let report = bootstrap.report();
    let json = serde_json::to_string_pretty(&report).unwrap();

    assert!(json.contains(SORTED_REFERENCE_ADDRESSES[0]));
    assert!(json.contains(REFERENCE_NODES_EXTRA));

    let back: hotstuff_genesis::BootstrapReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
