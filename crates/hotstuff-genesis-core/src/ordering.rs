//! Canonical validator ordering.
//!
//! Validators are ordered by ascending address bytes. Every node computing
//! genesis from the same set of keys must arrive at the same sequence, no
//! matter what order the keys were supplied in.

use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::node::NodeRecord;
use crate::types::Address;

/// Return the records sorted by address. The input is left untouched.
///
/// Equal addresses keep their input order.
pub fn sort_nodes(nodes: &[NodeRecord]) -> Vec<NodeRecord> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by_key(NodeRecord::address);
    sorted
}

/// The addresses of the given records, in the order given.
pub fn nodes_address(nodes: &[NodeRecord]) -> Vec<Address> {
    nodes.iter().map(NodeRecord::address).collect()
}

/// Find the first repeated address, reporting both input positions.
pub fn find_duplicate(addresses: &[Address]) -> Option<(Address, usize, usize)> {
    let mut seen: HashMap<Address, usize> = HashMap::with_capacity(addresses.len());
    for (i, address) in addresses.iter().enumerate() {
        if let Some(&first) = seen.get(address) {
            return Some((*address, first, i));
        }
        seen.insert(*address, i);
    }
    None
}

/// A non-empty, duplicate-free set of validators in canonical order.
#[derive(Debug, Clone)]
pub struct ValidatorSet {
    nodes: Vec<NodeRecord>,
}

impl ValidatorSet {
    /// Order the records canonically.
    ///
    /// Fails on an empty input or when two records share an address; the
    /// error carries the input positions of the clash.
    pub fn new(nodes: Vec<NodeRecord>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(CoreError::EmptyValidatorSet);
        }
        if let Some((address, first, second)) = find_duplicate(&nodes_address(&nodes)) {
            return Err(CoreError::DuplicateValidatorAddress {
                address,
                first,
                second,
            });
        }
        Ok(Self {
            nodes: sort_nodes(&nodes),
        })
    }

    /// The records in canonical order.
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// Iterate the records in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter()
    }

    /// The addresses in canonical order.
    pub fn addresses(&self) -> Vec<Address> {
        nodes_address(&self.nodes)
    }

    /// Whether the set contains the address.
    pub fn contains(&self, address: &Address) -> bool {
        self.nodes
            .binary_search_by_key(address, NodeRecord::address)
            .is_ok()
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consume the set, returning the ordered records.
    pub fn into_nodes(self) -> Vec<NodeRecord> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a ValidatorSet {
    type Item = &'a NodeRecord;
    type IntoIter = std::slice::Iter<'a, NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KeyCapability, Secp256k1};
    use std::sync::Arc;

    const KEYS: [&str; 4] = [
        "562aa98da69477996bd82422b97698541f25e71ba2f803970947b3ad8bdb7afa",
        "8bea3ce27136df435ada62a40a4226404879b3c42e2e86ba9a236b4a61c99c26",
        "53f7d9ec7657cdd3a3eaa8ddd126d36fbc60203448fca1bbfccec0d59d173da6",
        "305baf1e19a2da40b413dfb62b206b0ac74cb3d7e975cb70fe8391cbbe174f2a",
    ];

    fn records(keys: &[&str]) -> Vec<NodeRecord> {
        let cap: Arc<dyn KeyCapability> = Arc::new(Secp256k1);
        keys.iter()
            .map(|k| NodeRecord::from_private_hex(k, cap.clone()).unwrap())
            .collect()
    }

    #[test]
    fn test_sort_by_address() {
        let sorted = sort_nodes(&records(&KEYS));
        let addrs: Vec<String> = sorted.iter().map(|n| n.address().to_checksum()).collect();
        assert_eq!(
            addrs,
            vec![
                "0x09f4E484D43B3D6b20957F7E1760beE3C6F62186",
                "0x294b8211E7010f457d85942aC874d076D739E32a",
                "0x9deAD91D8632DCEEC701710bAF7922324DD45F58",
                "0xc5e2344b875e236b3475e9e4E70448525cA5210F",
            ]
        );
    }

    #[test]
    fn test_sort_ignores_input_order() {
        let forward = nodes_address(&sort_nodes(&records(&KEYS)));
        let mut reversed_keys = KEYS;
        reversed_keys.reverse();
        let backward = nodes_address(&sort_nodes(&records(&reversed_keys)));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_nodes(&records(&KEYS));
        let twice = sort_nodes(&once);
        assert_eq!(nodes_address(&once), nodes_address(&twice));
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let input = records(&KEYS);
        let before = nodes_address(&input);
        let _ = sort_nodes(&input);
        assert_eq!(nodes_address(&input), before);
    }

    #[test]
    fn test_sort_keeps_duplicates_stable() {
        let mut input = records(&[KEYS[1], KEYS[0], KEYS[1]]);
        input[0] = input[0].clone().with_static_endpoint("a", 1).unwrap();
        input[2] = input[2].clone().with_static_endpoint("b", 2).unwrap();

        let sorted = sort_nodes(&input);
        assert_eq!(sorted.len(), 3);

        let tied: Vec<Option<&str>> = sorted
            .iter()
            .filter(|n| n.address() == input[0].address())
            .map(|n| n.static_endpoint_descriptor())
            .collect();
        let id = input[0].node_id().to_hex();
        let first = format!("{id}@a:1");
        let second = format!("{id}@b:2");
        assert_eq!(tied, vec![Some(first.as_str()), Some(second.as_str())]);
    }

    #[test]
    fn test_validator_set_rejects_empty() {
        assert_eq!(
            ValidatorSet::new(vec![]).unwrap_err(),
            CoreError::EmptyValidatorSet
        );
    }

    #[test]
    fn test_validator_set_rejects_duplicates() {
        let input = records(&[KEYS[0], KEYS[1], KEYS[0]]);
        let expected = input[0].address();
        match ValidatorSet::new(input).unwrap_err() {
            CoreError::DuplicateValidatorAddress {
                address,
                first,
                second,
            } => {
                assert_eq!(address, expected);
                assert_eq!((first, second), (0, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validator_set_contains() {
        let set = ValidatorSet::new(records(&KEYS)).unwrap();
        assert_eq!(set.len(), 4);
        for node in &set {
            assert!(set.contains(&node.address()));
        }
        assert!(!set.contains(&Address::ZERO));
    }
}
