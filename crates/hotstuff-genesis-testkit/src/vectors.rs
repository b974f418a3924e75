//! Golden test vectors for deterministic verification.
//!
//! Every tool that bootstraps the same network must derive these exact
//! identities and these exact genesis bytes.

use hotstuff_genesis_core::{
    encode_genesis_extra_hex, nodes_address, sort_nodes, NodeRecord, Result,
};

use crate::fixtures::{capability, reference_validators};

/// A single node identity vector.
#[derive(Debug, Clone)]
pub struct IdentityVector {
    /// Secret key (hex, no prefix).
    pub secret_key: &'static str,
    /// Expected EIP-55 address.
    pub address: &'static str,
    /// Expected node identifier (hex, no prefix).
    pub node_id: &'static str,
}

/// Identity vectors for the reference node keys, in key order.
pub fn identity_vectors() -> Vec<IdentityVector> {
    vec![
        IdentityVector {
            secret_key: "562aa98da69477996bd82422b97698541f25e71ba2f803970947b3ad8bdb7afa",
            address: "0x09f4E484D43B3D6b20957F7E1760beE3C6F62186",
            node_id: "0187435897ad02f6340915f18a5b5c3879a78968044605e18499d9bef48ba4a8\
                      84ad2449b912cb086c9a77f9fde7e7da95c62d4da5085ebed6ded75aeee1206b",
        },
        IdentityVector {
            secret_key: "8bea3ce27136df435ada62a40a4226404879b3c42e2e86ba9a236b4a61c99c26",
            address: "0x294b8211E7010f457d85942aC874d076D739E32a",
            node_id: "df2a729a896e41e80475525ac93524b041bafe06a22e61d59d9233df6279f4fc\
                      2775ef7c2aa5cb257e43084cf20aa19f860c28a4af4394eeecb5afcf104a02a9",
        },
        IdentityVector {
            secret_key: "53f7d9ec7657cdd3a3eaa8ddd126d36fbc60203448fca1bbfccec0d59d173da6",
            address: "0x9deAD91D8632DCEEC701710bAF7922324DD45F58",
            node_id: "ff211d429616c46ce57b7ff15527b9b1df7e08d1221ea2298eeb530bd0673902\
                      843644f583bd8ea6459bb2b1b2e14e2df836cdcc6d601becc6fef4249e4e7dbb",
        },
        IdentityVector {
            secret_key: "305baf1e19a2da40b413dfb62b206b0ac74cb3d7e975cb70fe8391cbbe174f2a",
            address: "0xc5e2344b875e236b3475e9e4E70448525cA5210F",
            node_id: "139a07905f7cfa2740437d728bf5c60f4c7c4a263edafd4f1437f6f6f712b361\
                      aee12b693b3e3ca404d6b56fe3342205e936617198c872073e367a7430015df8",
        },
    ]
}

/// Reference node addresses after canonical sorting.
pub const SORTED_REFERENCE_ADDRESSES: [&str; 4] = [
    "0x09f4E484D43B3D6b20957F7E1760beE3C6F62186",
    "0x294b8211E7010f457d85942aC874d076D739E32a",
    "0x9deAD91D8632DCEEC701710bAF7922324DD45F58",
    "0xc5e2344b875e236b3475e9e4E70448525cA5210F",
];

/// Genesis extra for the sorted reference nodes.
pub const REFERENCE_NODES_EXTRA: &str = concat!(
    "0x0000000000000000000000000000000000000000000000000000000000000000",
    "f859f85494",
    "09f4e484d43b3d6b20957f7e1760bee3c6f62186",
    "94",
    "294b8211e7010f457d85942ac874d076d739e32a",
    "94",
    "9dead91d8632dceec701710baf7922324dd45f58",
    "94",
    "c5e2344b875e236b3475e9e4e70448525ca5210f",
    "80c080"
);

/// Genesis extra for the published validators, in published order.
pub const REFERENCE_VALIDATORS_EXTRA: &str = concat!(
    "0x0000000000000000000000000000000000000000000000000000000000000000",
    "f859f85494",
    "40fbbe484b8ee6139af08446950b088e10b2306a",
    "94",
    "8c161d85fdc086ac6726bcede39f2ccb1afa3bc8",
    "94",
    "22c21d4f64aaba7ec837b6b93639db8cf514dad5",
    "94",
    "be6805c4c904b9cc39065adc4cccf4fcab167ae6",
    "80c080"
);

/// Check every identity vector, returning `(address, matches, derived)`.
pub fn verify_identity_vectors() -> Vec<(String, bool, String)> {
    let cap = capability();
    identity_vectors()
        .iter()
        .map(|v| {
            let derived = NodeRecord::from_private_hex(v.secret_key, cap.clone())
                .map(|node| (node.address().to_checksum(), node.node_id().to_hex()));
            match derived {
                Ok((address, node_id)) => {
                    let matches = address == v.address && node_id == v.node_id;
                    (v.address.to_string(), matches, address)
                }
                Err(e) => (v.address.to_string(), false, e.to_string()),
            }
        })
        .collect()
}

/// Encode the reference nodes in canonical order.
pub fn reference_nodes_extra() -> Result<String> {
    let cap = capability();
    let nodes = identity_vectors()
        .iter()
        .map(|v| NodeRecord::from_private_hex(v.secret_key, cap.clone()))
        .collect::<Result<Vec<_>>>()?;
    encode_genesis_extra_hex(&nodes_address(&sort_nodes(&nodes)))
}

/// Encode the published validators as given.
pub fn reference_validators_extra() -> Result<String> {
    encode_genesis_extra_hex(&reference_validators())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_vectors_match() {
        for (name, matches, derived) in verify_identity_vectors() {
            assert!(matches, "vector {} derived {}", name, derived);
        }
    }

    #[test]
    fn test_reference_nodes_extra() {
        assert_eq!(reference_nodes_extra().unwrap(), REFERENCE_NODES_EXTRA);
    }

    #[test]
    fn test_reference_validators_extra() {
        assert_eq!(reference_validators_extra().unwrap(), REFERENCE_VALIDATORS_EXTRA);
    }

    #[test]
    fn test_sorted_order() {
        let cap = capability();
        let nodes: Vec<_> = identity_vectors()
            .iter()
            .rev()
            .map(|v| NodeRecord::from_private_hex(v.secret_key, cap.clone()).unwrap())
            .collect();
        let sorted: Vec<String> = sort_nodes(&nodes)
            .iter()
            .map(|n| n.address().to_checksum())
            .collect();
        assert_eq!(sorted, SORTED_REFERENCE_ADDRESSES);
    }
}
